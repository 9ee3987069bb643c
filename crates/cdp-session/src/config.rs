use std::path::PathBuf;

/// Launch configuration for one browser session.
///
/// The defaults match a containerized deployment: headless, sandbox
/// disabled, fixed viewport. The executable path is optional; when unset
/// the engine's own discovery is used.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub headless: bool,
    pub executable: Option<PathBuf>,
    pub no_sandbox: bool,
    pub window: (u32, u32),
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            headless: true,
            executable: None,
            no_sandbox: true,
            window: (1280, 800),
        }
    }
}

impl SessionConfig {
    /// Extra Chromium flags derived from this config.
    pub fn extra_args(&self) -> Vec<&'static str> {
        let mut args = Vec::new();
        if self.no_sandbox {
            args.push("--no-sandbox");
            args.push("--disable-setuid-sandbox");
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_headless_and_sandboxless() {
        let config = SessionConfig::default();
        assert!(config.headless);
        assert!(config.no_sandbox);
        assert_eq!(config.window, (1280, 800));
        assert_eq!(
            config.extra_args(),
            vec!["--no-sandbox", "--disable-setuid-sandbox"]
        );
    }

    #[test]
    fn sandbox_flags_respect_config() {
        let config = SessionConfig {
            no_sandbox: false,
            ..SessionConfig::default()
        };
        assert!(config.extra_args().is_empty());
    }
}
