//! Workflow orchestrator.
//!
//! One request runs one fixed step sequence against one browser session.
//! Any step error moves the run into the absorbing `Failed` phase, after
//! which the session is closed best-effort and the partial log is returned.
//! There are no retries, and the workflow is NOT idempotent: re-running the
//! same event creates additional ticket types.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use cdp_session::{BrowserSession, SessionConfig};
use chrono::{DateTime, Utc};
use page_actions::{CdpPage, PageActions};
use tracing::{info, Instrument};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::WorkflowError;
use crate::steplog::StepLog;
use crate::steps::{self, AuthParams};
use crate::tickets::{DeadlineParts, TicketSpec};

/// One validated-enough incoming request. `event_id` emptiness is checked
/// by the orchestrator before any session is opened.
#[derive(Clone, Debug)]
pub struct WorkflowRequest {
    pub event_id: String,
    pub purchase_deadline: Option<DateTime<Utc>>,
    pub pricing_per_seat: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkflowPhase {
    Idle,
    BrowserLaunching,
    Authenticating,
    Navigating,
    Deleting,
    CreatingEarlyBird,
    CreatingGeneral,
    Closing,
    Done,
    Failed,
}

impl WorkflowPhase {
    fn label(self) -> &'static str {
        match self {
            WorkflowPhase::Idle => "idle",
            WorkflowPhase::BrowserLaunching => "launching browser",
            WorkflowPhase::Authenticating => "authenticating",
            WorkflowPhase::Navigating => "navigating to event",
            WorkflowPhase::Deleting => "deleting default ticket type",
            WorkflowPhase::CreatingEarlyBird => "creating early bird ticket",
            WorkflowPhase::CreatingGeneral => "creating general ticket",
            WorkflowPhase::Closing => "closing session",
            WorkflowPhase::Done => "done",
            WorkflowPhase::Failed => "failed",
        }
    }
}

impl fmt::Display for WorkflowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a run hands back to the HTTP layer: the full ordered log, plus the
/// error message when the run died early.
#[derive(Clone, Debug)]
pub struct WorkflowOutcome {
    pub steps: Vec<String>,
    pub error: Option<String>,
}

impl WorkflowOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Port between the HTTP layer and the browser workflow. The production
/// implementation drives CDP; tests substitute a canned runner.
#[async_trait]
pub trait WorkflowRunner: Send + Sync {
    async fn run(&self, request: WorkflowRequest) -> WorkflowOutcome;
}

/// One open browser session as the orchestrator sees it: a page to drive
/// and a close to call. The seam lets the close/logging paths of
/// [`run_once`] run under test without a live browser.
#[async_trait]
pub(crate) trait WorkflowSession: Send {
    fn actions(&self) -> &dyn PageActions;
    async fn close(self: Box<Self>);
}

#[async_trait]
pub(crate) trait SessionLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn WorkflowSession>, WorkflowError>;
}

struct CdpSession {
    session: BrowserSession,
    page: CdpPage,
}

#[async_trait]
impl WorkflowSession for CdpSession {
    fn actions(&self) -> &dyn PageActions {
        &self.page
    }

    async fn close(self: Box<Self>) {
        self.session.close().await;
    }
}

struct CdpLauncher {
    browser: SessionConfig,
}

#[async_trait]
impl SessionLauncher for CdpLauncher {
    async fn launch(&self) -> Result<Box<dyn WorkflowSession>, WorkflowError> {
        let session = BrowserSession::launch(self.browser.clone()).await?;
        let page = CdpPage::new(session.page());
        Ok(Box::new(CdpSession { session, page }))
    }
}

pub struct CdpWorkflowRunner {
    config: Arc<AppConfig>,
}

impl CdpWorkflowRunner {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl WorkflowRunner for CdpWorkflowRunner {
    async fn run(&self, request: WorkflowRequest) -> WorkflowOutcome {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("workflow", %run_id, event_id = %request.event_id);
        let launcher = CdpLauncher {
            browser: self.config.browser.clone(),
        };
        run_once(Arc::clone(&self.config), request, &launcher)
            .instrument(span)
            .await
    }
}

async fn run_once(
    config: Arc<AppConfig>,
    request: WorkflowRequest,
    launcher: &dyn SessionLauncher,
) -> WorkflowOutcome {
    let mut log = StepLog::new();
    let mut phase = WorkflowPhase::Idle;

    // Reject before any session is opened.
    if request.event_id.trim().is_empty() {
        advance(&mut phase, WorkflowPhase::Failed, &mut log);
        let err = WorkflowError::Validation("eventID must be non-empty".into());
        log.record(format!("workflow failed: {err}"));
        return WorkflowOutcome {
            steps: log.snapshot(),
            error: Some(err.to_string()),
        };
    }

    advance(&mut phase, WorkflowPhase::BrowserLaunching, &mut log);
    let session = match launcher.launch().await {
        Ok(session) => session,
        Err(err) => {
            advance(&mut phase, WorkflowPhase::Failed, &mut log);
            log.record(format!("workflow failed: {err}"));
            return WorkflowOutcome {
                steps: log.snapshot(),
                error: Some(err.to_string()),
            };
        }
    };

    let result = drive(session.actions(), &mut log, &mut phase, &request, &config).await;

    match result {
        Ok(()) => {
            advance(&mut phase, WorkflowPhase::Closing, &mut log);
            session.close().await;
            log.record("browser session closed");
            advance(&mut phase, WorkflowPhase::Done, &mut log);
            info!(phase = %phase, "workflow complete");
            WorkflowOutcome {
                steps: log.snapshot(),
                error: None,
            }
        }
        Err(err) => {
            advance(&mut phase, WorkflowPhase::Failed, &mut log);
            log.record(format!("workflow failed: {err}"));
            // Best-effort cleanup; close never propagates.
            session.close().await;
            log.record("browser session closed (best effort)");
            WorkflowOutcome {
                steps: log.snapshot(),
                error: Some(err.to_string()),
            }
        }
    }
}

/// The fixed step sequence, written against the [`PageActions`] port so the
/// orchestration is testable without a browser.
pub(crate) async fn drive(
    page: &dyn PageActions,
    log: &mut StepLog,
    phase: &mut WorkflowPhase,
    request: &WorkflowRequest,
    config: &AppConfig,
) -> Result<(), WorkflowError> {
    advance(phase, WorkflowPhase::Authenticating, log);
    let signin_url = config.signin_url();
    let authenticated_prefix = config.authenticated_prefix();
    steps::sign_in(
        page,
        log,
        &AuthParams {
            landing_url: &config.base_url,
            signin_url: &signin_url,
            authenticated_prefix: &authenticated_prefix,
            credentials: &config.credentials,
        },
    )
    .await?;

    advance(phase, WorkflowPhase::Navigating, log);
    let registration_url = config.registration_url(&request.event_id);
    log.record(format!(
        "navigating to registration page for event {}",
        request.event_id
    ));
    page.navigate(&registration_url, steps::NAV_TIMEOUT).await?;

    advance(phase, WorkflowPhase::Deleting, log);
    steps::delete_default_ticket(page, log).await?;

    let deadline = request
        .purchase_deadline
        .map(|instant| DeadlineParts::from_instant(instant, config.deadline_offset));

    advance(phase, WorkflowPhase::CreatingEarlyBird, log);
    steps::create_ticket(
        page,
        log,
        &TicketSpec::early_bird(),
        deadline.as_ref(),
        request.pricing_per_seat,
    )
    .await?;

    advance(phase, WorkflowPhase::CreatingGeneral, log);
    steps::create_ticket(
        page,
        log,
        &TicketSpec::general(),
        deadline.as_ref(),
        request.pricing_per_seat,
    )
    .await?;

    Ok(())
}

fn advance(phase: &mut WorkflowPhase, next: WorkflowPhase, log: &mut StepLog) {
    *phase = next;
    log.record(format!("phase: {next}"));
}
