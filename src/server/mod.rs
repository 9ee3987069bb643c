//! HTTP surface.

mod router;
mod state;

pub use state::ServeState;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::config::AppConfig;
use crate::workflow::CdpWorkflowRunner;

/// Bind and serve until shutdown.
pub async fn serve(config: AppConfig) -> Result<()> {
    let config = Arc::new(config);
    let runner = Arc::new(CdpWorkflowRunner::new(Arc::clone(&config)));
    let state = ServeState::new(Arc::clone(&config), runner);
    let app = router::build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "ticketflow listening");
    axum::serve(listener, app).await?;
    Ok(())
}
