//! DOM interaction primitives for driving a third-party page.
//!
//! Workflow steps are written against the [`PageActions`] port; [`CdpPage`]
//! implements it over a live Chromium page. Every wait is a bounded
//! poll-until-predicate, and clicks that must trigger reactive framework
//! handlers go through a synthetic pointer/mouse event sequence rather than
//! a single click call.

mod actions;
mod cdp;
mod errors;
mod scripts;

pub use actions::{ElementState, PageActions};
pub use cdp::CdpPage;
pub use errors::ActionError;
