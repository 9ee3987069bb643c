use std::time::Duration;

use async_trait::async_trait;

use crate::ActionError;

/// Predicate for bounded element waits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementState {
    /// Attached to the document.
    Present,
    /// Attached and rendered.
    Visible,
    /// Absent or not rendered. Waiting for `Hidden` succeeds when the
    /// element does not exist at all.
    Hidden,
    /// Visible, enabled, and not read-only.
    Interactable,
}

/// Port the workflow steps drive. One implementation talks CDP to a live
/// page; tests substitute a scripted mock.
#[async_trait]
pub trait PageActions: Send + Sync {
    /// Navigate and wait for the load to settle, bounded by `timeout`.
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), ActionError>;

    /// Current location of the page.
    async fn current_url(&self) -> Result<String, ActionError>;

    /// Poll until the element matching `selector` reaches `state`.
    async fn wait_for(
        &self,
        selector: &str,
        state: ElementState,
        timeout: Duration,
    ) -> Result<(), ActionError>;

    /// Poll until the location starts with `prefix`.
    async fn wait_for_url_prefix(&self, prefix: &str, timeout: Duration)
        -> Result<(), ActionError>;

    /// Plain single click through the automation engine.
    async fn click(&self, selector: &str) -> Result<(), ActionError>;

    /// Synthetic pointerdown/mousedown/pointerup/mouseup/click sequence.
    /// A plain click does not reliably trigger the target site's reactive
    /// handlers, so interaction-critical clicks go through this.
    async fn click_sequence(&self, selector: &str) -> Result<(), ActionError>;

    /// Fire the synthetic sequence at the first element under `scope`
    /// whose trimmed text equals `text`.
    async fn click_sequence_by_text(&self, scope: &str, text: &str) -> Result<(), ActionError>;

    /// Among the containers matching `row_selector`, find the one whose
    /// `label_selector` child's trimmed text equals `label`, then fire the
    /// synthetic sequence at its `target_selector` descendant.
    async fn click_sequence_in_row(
        &self,
        row_selector: &str,
        label_selector: &str,
        label: &str,
        target_selector: &str,
    ) -> Result<(), ActionError>;

    /// Whether a row with the given label exists.
    async fn row_exists(
        &self,
        row_selector: &str,
        label_selector: &str,
        label: &str,
    ) -> Result<bool, ActionError>;

    /// Assign a value through the native setter and dispatch `input` and
    /// `change` so virtual-DOM bindings observe the mutation.
    async fn set_value(&self, selector: &str, value: &str) -> Result<(), ActionError>;

    /// Focus, select all, delete, and retype the field contents.
    async fn replace_text(&self, selector: &str, text: &str) -> Result<(), ActionError>;

    /// Idempotent toggle: click only when the checked state differs.
    async fn set_checked(&self, selector: &str, on: bool) -> Result<(), ActionError>;

    /// Fixed settle delay between interactions.
    async fn settle(&self, duration: Duration);
}
