//! Browser session lifecycle over the Chrome DevTools Protocol.
//!
//! One [`BrowserSession`] owns one Chromium process and one page for the
//! duration of a single workflow run. Sessions are never pooled or reused.

mod config;
mod error;
mod session;

pub use chromiumoxide::Page;
pub use config::SessionConfig;
pub use error::SessionError;
pub use session::BrowserSession;
