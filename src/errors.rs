//! Workflow error taxonomy.
//!
//! Every step-level error aborts the remaining workflow immediately; the
//! orchestrator catches at the top, closes the session best-effort, and
//! surfaces the message alongside the partial step log. The only carve-out
//! lives in the deletion step: an absent "Standard" row is a logged
//! warning, not an error.

use cdp_session::SessionError;
use page_actions::ActionError;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum WorkflowError {
    /// Request rejected before any session was opened.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The browser engine could not be started.
    #[error("browser launch failed: {0}")]
    Launch(String),

    /// Navigation did not complete within its bound.
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// A bounded wait expired.
    #[error("wait timeout: {0}")]
    WaitTimeout(String),

    /// The post-login location check failed.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// A required UI affordance never appeared.
    #[error("element not found: {0}")]
    ElementNotFound(String),

    /// No calendar day cell matched the requested deadline.
    #[error("calendar day not found: {0}")]
    DateNotFound(String),

    /// No time option matched the requested deadline.
    #[error("time option not found: {0}")]
    TimeNotFound(String),

    /// The creation modal stayed open past its close bound.
    #[error("creation modal did not close: {0}")]
    ModalCloseTimeout(String),

    /// CDP transport or in-page script failure.
    #[error("browser session error: {0}")]
    Session(String),
}

impl From<SessionError> for WorkflowError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Launch(msg) => WorkflowError::Launch(msg),
            SessionError::CdpIo(msg) => WorkflowError::Session(msg),
        }
    }
}

impl From<ActionError> for WorkflowError {
    fn from(err: ActionError) -> Self {
        match err {
            ActionError::NavTimeout(msg) => WorkflowError::Navigation(msg),
            ActionError::WaitTimeout(msg) => WorkflowError::WaitTimeout(msg),
            ActionError::TargetNotFound(msg) | ActionError::NotInteractable(msg) => {
                WorkflowError::ElementNotFound(msg)
            }
            ActionError::CdpIo(msg) | ActionError::Internal(msg) => WorkflowError::Session(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_errors_map_to_launch_and_session() {
        let launch: WorkflowError = SessionError::Launch("no chromium".into()).into();
        assert!(matches!(launch, WorkflowError::Launch(_)));

        let io: WorkflowError = SessionError::CdpIo("pipe closed".into()).into();
        assert!(matches!(io, WorkflowError::Session(_)));
    }

    #[test]
    fn action_timeouts_keep_their_kind() {
        let nav: WorkflowError = ActionError::NavTimeout("slow".into()).into();
        assert!(matches!(nav, WorkflowError::Navigation(_)));

        let wait: WorkflowError = ActionError::WaitTimeout("never".into()).into();
        assert!(matches!(wait, WorkflowError::WaitTimeout(_)));
    }
}
