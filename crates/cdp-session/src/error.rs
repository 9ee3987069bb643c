use thiserror::Error;

/// Errors raised by the session layer.
#[derive(Debug, Error, Clone)]
pub enum SessionError {
    /// The browser engine could not be started.
    #[error("browser launch failed: {0}")]
    Launch(String),

    /// CDP communication or protocol error after launch.
    #[error("CDP I/O error: {0}")]
    CdpIo(String),
}
