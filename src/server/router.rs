use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use cdp_session::BrowserSession;
use chrono::{DateTime, Utc};
use page_actions::{CdpPage, PageActions};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use super::state::ServeState;
use crate::config::AppConfig;
use crate::errors::WorkflowError;
use crate::workflow::WorkflowRequest;

pub(crate) fn build_router(state: ServeState) -> Router {
    Router::new()
        .route("/create-tickets", post(create_tickets_handler))
        .route("/", get(probe_handler))
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

#[derive(Debug, Deserialize)]
struct CreateTicketsBody {
    #[serde(rename = "eventID")]
    event_id: Option<String>,
    #[serde(rename = "purchaseDeadline")]
    purchase_deadline: Option<String>,
    #[serde(rename = "pricingPerSeat")]
    pricing_per_seat: Option<f64>,
}

async fn create_tickets_handler(
    State(state): State<ServeState>,
    Json(body): Json<CreateTicketsBody>,
) -> Response {
    let event_id = match body.event_id {
        Some(id) if !id.trim().is_empty() => id,
        _ => return (StatusCode::BAD_REQUEST, "Missing eventID").into_response(),
    };

    let purchase_deadline = match body.purchase_deadline.as_deref() {
        None => None,
        Some(raw) => match DateTime::parse_from_rfc3339(raw) {
            Ok(instant) => Some(instant.with_timezone(&Utc)),
            Err(_) => {
                return (StatusCode::BAD_REQUEST, "Invalid purchaseDeadline").into_response()
            }
        },
    };

    // Same-event runs are serialized; the external site has no locking of
    // its own and two interleaved runs corrupt each other's ticket list.
    let _guard = state.lock_event(&event_id).await;

    info!(event_id = %event_id, "starting ticket workflow");
    let outcome = state
        .runner()
        .run(WorkflowRequest {
            event_id,
            purchase_deadline,
            pricing_per_seat: body.pricing_per_seat,
        })
        .await;

    match outcome.error {
        None => Json(json!({
            "status": "success",
            "steps": outcome.steps,
        }))
        .into_response(),
        Some(error) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "status": "error",
                "steps": outcome.steps,
                "error": error,
            })),
        )
            .into_response(),
    }
}

/// Diagnostic probe: launch, load the landing page, close.
async fn probe_handler(State(state): State<ServeState>) -> Response {
    match probe(state.config()).await {
        Ok(location) => format!("ok: loaded {location}").into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("probe failed: {err}"),
        )
            .into_response(),
    }
}

async fn probe(config: &AppConfig) -> Result<String, WorkflowError> {
    let session = BrowserSession::launch(config.browser.clone()).await?;
    let page = CdpPage::new(session.page());
    let loaded = page
        .navigate(&config.base_url, crate::steps::NAV_TIMEOUT)
        .await;
    let location = page.current_url().await.unwrap_or_default();
    session.close().await;
    loaded?;
    Ok(location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{offset_from_hours, Credentials};
    use crate::workflow::{WorkflowOutcome, WorkflowRunner};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use cdp_session::SessionConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tower::util::ServiceExt;

    struct MockRunner {
        calls: AtomicUsize,
        last_request: Mutex<Option<WorkflowRequest>>,
        outcome: WorkflowOutcome,
    }

    impl MockRunner {
        fn with_outcome(outcome: WorkflowOutcome) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
                outcome,
            })
        }

        fn succeeding(steps: &[&str]) -> Arc<Self> {
            Self::with_outcome(WorkflowOutcome {
                steps: steps.iter().map(|s| s.to_string()).collect(),
                error: None,
            })
        }
    }

    #[async_trait]
    impl WorkflowRunner for MockRunner {
        async fn run(&self, request: WorkflowRequest) -> WorkflowOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request);
            self.outcome.clone()
        }
    }

    fn test_config() -> Arc<AppConfig> {
        Arc::new(AppConfig {
            port: 3000,
            credentials: Credentials {
                email: "ops@example.com".into(),
                password: "hunter2".into(),
            },
            browser: SessionConfig::default(),
            base_url: "https://lu.ma".into(),
            deadline_offset: offset_from_hours(-7).unwrap(),
        })
    }

    fn app(runner: Arc<MockRunner>) -> Router {
        build_router(ServeState::new(test_config(), runner))
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/create-tickets")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn missing_event_id_is_400_and_never_runs_the_workflow() {
        let runner = MockRunner::succeeding(&[]);
        let response = app(Arc::clone(&runner))
            .oneshot(post_json("{}"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_string(response).await, "Missing eventID");
        assert_eq!(runner.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn blank_event_id_is_also_rejected() {
        let runner = MockRunner::succeeding(&[]);
        let response = app(Arc::clone(&runner))
            .oneshot(post_json(r#"{"eventID": "   "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(runner.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn success_returns_steps_payload() {
        let runner = MockRunner::succeeding(&["phase: done", "browser session closed"]);
        let response = app(Arc::clone(&runner))
            .oneshot(post_json(
                r#"{"eventID": "evt-1", "pricingPerSeat": 40.0, "purchaseDeadline": "2025-06-10T15:00:00Z"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let payload: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(payload["status"], "success");
        assert_eq!(payload["steps"][1], "browser session closed");

        let request = runner.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.event_id, "evt-1");
        assert_eq!(request.pricing_per_seat, Some(40.0));
        assert_eq!(
            request.purchase_deadline.unwrap().to_rfc3339(),
            "2025-06-10T15:00:00+00:00"
        );
    }

    #[tokio::test]
    async fn workflow_failure_returns_500_with_partial_steps() {
        let runner = MockRunner::with_outcome(WorkflowOutcome {
            steps: vec!["phase: authenticating".into(), "workflow failed: wait timeout".into()],
            error: Some("wait timeout: email input never appeared".into()),
        });
        let response = app(Arc::clone(&runner))
            .oneshot(post_json(r#"{"eventID": "evt-1"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let payload: serde_json::Value =
            serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(payload["status"], "error");
        assert!(payload["error"]
            .as_str()
            .unwrap()
            .contains("wait timeout"));
        assert_eq!(payload["steps"][0], "phase: authenticating");
    }

    #[tokio::test]
    async fn malformed_deadline_is_400() {
        let runner = MockRunner::succeeding(&[]);
        let response = app(Arc::clone(&runner))
            .oneshot(post_json(
                r#"{"eventID": "evt-1", "purchaseDeadline": "next tuesday"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_string(response).await, "Invalid purchaseDeadline");
        assert_eq!(runner.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn event_lock_entries_do_not_outlive_the_request() {
        let state = ServeState::new(test_config(), MockRunner::succeeding(&[]));
        let app = build_router(state.clone());

        for i in 0..20 {
            let response = app
                .clone()
                .oneshot(post_json(&format!(r#"{{"eventID": "evt-{i}"}}"#)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
        assert_eq!(state.active_event_locks(), 0);
    }
}
