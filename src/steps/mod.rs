//! Sequential workflow steps.
//!
//! Each step drives the [`page_actions::PageActions`] port and records a
//! log line per sub-step so a partial log survives any failure.

mod auth;
mod create_ticket;
mod delete_ticket;
pub(crate) mod selectors;

pub use auth::{sign_in, AuthParams};
pub use create_ticket::create_ticket;
pub use delete_ticket::{delete_default_ticket, DEFAULT_TICKET_NAME};

use std::time::Duration;

/// Bound for full-page navigations.
pub(crate) const NAV_TIMEOUT: Duration = Duration::from_secs(30);
/// Bound for an element reaching a wanted state.
pub(crate) const WAIT_TIMEOUT: Duration = Duration::from_secs(10);
/// Bound for the post-login location check.
pub(crate) const AUTH_NAV_TIMEOUT: Duration = Duration::from_secs(20);
/// Bound for the creation modal closing after submit.
pub(crate) const MODAL_CLOSE_TIMEOUT: Duration = Duration::from_secs(8);
/// Fixed delay where the site exposes no readiness signal.
pub(crate) const SETTLE_SHORT: Duration = Duration::from_millis(500);
/// Fixed delay after the delete confirm; the row's disappearance is never
/// verified.
pub(crate) const SETTLE_DELETE: Duration = Duration::from_millis(1500);
