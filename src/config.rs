//! Environment-driven configuration.
//!
//! Credentials, the browser executable, and the listen port all come from
//! the deployment environment; CLI flags can override the operational
//! knobs. Secrets are never logged.

use std::env;
use std::fmt;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use cdp_session::SessionConfig;
use chrono::FixedOffset;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BASE_URL: &str = "https://lu.ma";
const DEFAULT_TZ_OFFSET_HOURS: i32 = -7;

/// Operator credentials for the third-party site.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub credentials: Credentials,
    pub browser: SessionConfig,
    pub base_url: String,
    /// Wall-clock offset applied to purchase deadlines before they are fed
    /// to the site's date/time pickers.
    pub deadline_offset: FixedOffset,
}

impl AppConfig {
    /// Load from the process environment.
    ///
    /// Required: `TICKETFLOW_EMAIL`, `TICKETFLOW_PASSWORD`.
    /// Optional: `PORT`, `TICKETFLOW_CHROME`, `TICKETFLOW_HEADLESS`,
    /// `TICKETFLOW_BASE_URL`, `TICKETFLOW_TZ_OFFSET_HOURS`.
    pub fn from_env() -> Result<Self> {
        let email = env::var("TICKETFLOW_EMAIL").context("TICKETFLOW_EMAIL is not set")?;
        let password = env::var("TICKETFLOW_PASSWORD").context("TICKETFLOW_PASSWORD is not set")?;

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().context("PORT is not a valid port")?,
            Err(_) => DEFAULT_PORT,
        };

        let offset_hours = match env::var("TICKETFLOW_TZ_OFFSET_HOURS") {
            Ok(raw) => raw
                .parse::<i32>()
                .context("TICKETFLOW_TZ_OFFSET_HOURS is not an integer")?,
            Err(_) => DEFAULT_TZ_OFFSET_HOURS,
        };
        let deadline_offset = offset_from_hours(offset_hours)?;

        let mut browser = SessionConfig::default();
        if let Ok(path) = env::var("TICKETFLOW_CHROME") {
            browser.executable = Some(PathBuf::from(path));
        }
        if let Ok(raw) = env::var("TICKETFLOW_HEADLESS") {
            browser.headless = raw
                .parse::<bool>()
                .context("TICKETFLOW_HEADLESS is not a boolean")?;
        }

        let base_url = env::var("TICKETFLOW_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            port,
            credentials: Credentials { email, password },
            browser,
            base_url,
            deadline_offset,
        })
    }

    pub fn signin_url(&self) -> String {
        format!("{}/signin", self.base_url)
    }

    /// Location prefix that proves the session is authenticated.
    pub fn authenticated_prefix(&self) -> String {
        format!("{}/home", self.base_url)
    }

    pub fn registration_url(&self, event_id: &str) -> String {
        format!("{}/event/manage/{}/registration", self.base_url, event_id)
    }
}

/// Build a fixed offset from signed hours, rejecting nonsense values.
pub fn offset_from_hours(hours: i32) -> Result<FixedOffset> {
    if !(-23..=23).contains(&hours) {
        bail!("timezone offset {hours}h is out of range");
    }
    FixedOffset::east_opt(hours * 3600)
        .with_context(|| format!("timezone offset {hours}h is not representable"))
}
