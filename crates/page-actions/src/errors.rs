use thiserror::Error;

/// Errors raised by page interaction primitives.
#[derive(Debug, Error, Clone)]
pub enum ActionError {
    /// A bounded wait expired before its predicate held.
    #[error("wait timeout: {0}")]
    WaitTimeout(String),

    /// Navigation did not complete within its bound.
    #[error("navigation timeout: {0}")]
    NavTimeout(String),

    /// A required element or text-matched target never appeared.
    #[error("target not found: {0}")]
    TargetNotFound(String),

    /// The element exists but cannot receive the interaction.
    #[error("element not interactable: {0}")]
    NotInteractable(String),

    /// CDP communication or protocol error.
    #[error("CDP I/O error: {0}")]
    CdpIo(String),

    /// In-page script misbehaved.
    #[error("internal error: {0}")]
    Internal(String),
}
