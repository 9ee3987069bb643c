//! Request-scoped progress log.

use tracing::{info, warn};

/// Ordered, append-only list of human-readable progress lines for one
/// workflow run. Returned to the caller verbatim on success or failure;
/// each line is also mirrored to the diagnostic tracing stream, which is
/// non-authoritative.
#[derive(Debug, Default)]
pub struct StepLog {
    entries: Vec<String>,
}

impl StepLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!(step = %message, "workflow step");
        self.entries.push(message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(step = %message, "workflow warning");
        self.entries.push(format!("warning: {message}"));
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.entries.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_order_and_duplicates() {
        let mut log = StepLog::new();
        log.record("one");
        log.record("two");
        log.record("two");
        assert_eq!(log.snapshot(), vec!["one", "two", "two"]);
    }

    #[test]
    fn warnings_are_prefixed() {
        let mut log = StepLog::new();
        log.warn("default ticket type not found");
        assert_eq!(
            log.snapshot(),
            vec!["warning: default ticket type not found"]
        );
    }

    #[test]
    fn snapshot_does_not_drain() {
        let mut log = StepLog::new();
        log.record("kept");
        let _ = log.snapshot();
        assert!(!log.is_empty());
        assert_eq!(log.snapshot().len(), 1);
    }
}
