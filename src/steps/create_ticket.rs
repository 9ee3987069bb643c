//! Creation of one ticket type through the multi-screen modal flow.

use page_actions::{ActionError, ElementState, PageActions};

use crate::errors::WorkflowError;
use crate::steplog::StepLog;
use crate::steps::selectors::{
    month_day_cells, APPROVAL_TOGGLE, CAPACITY_INPUT, DATE_PICKER, DESCRIPTION_FIELD,
    DESCRIPTION_REVEAL, LIMITS_PANEL, MODAL_BACK, NAME_INPUT, NEW_TICKET_BUTTON, PRICE_INPUT,
    SALES_END_TOGGLE, SUBMIT_BUTTON, TIME_OPTIONS, TIME_PICKER, TYPE_OPTIONS,
};
use crate::steps::{MODAL_CLOSE_TIMEOUT, SETTLE_SHORT, WAIT_TIMEOUT};
use crate::tickets::{DeadlineParts, TicketSpec};

/// Open the creation form, fill it for `spec`, and submit.
///
/// Strictly sequential; most sub-steps have no network-idle signal from
/// the site, so short fixed settles are interleaved. Field values go in
/// through the native-setter-plus-events technique: a plain value
/// assignment is invisible to the site's virtual-DOM bindings.
pub async fn create_ticket(
    page: &dyn PageActions,
    log: &mut StepLog,
    spec: &TicketSpec,
    deadline: Option<&DeadlineParts>,
    base_price: Option<f64>,
) -> Result<(), WorkflowError> {
    log.record(format!("creating ticket type '{}'", spec.name));

    log.record("ensuring no creation modal is open");
    page.wait_for(NAME_INPUT, ElementState::Hidden, WAIT_TIMEOUT)
        .await?;

    log.record("opening New Ticket Type form");
    page.click_sequence(NEW_TICKET_BUTTON).await?;
    page.wait_for(NAME_INPUT, ElementState::Interactable, WAIT_TIMEOUT)
        .await?;

    log.record(format!("setting name to '{}'", spec.name));
    page.set_value(NAME_INPUT, spec.name).await?;

    log.record("filling description");
    page.click_sequence(DESCRIPTION_REVEAL).await?;
    page.replace_text(DESCRIPTION_FIELD, spec.description)
        .await?;

    log.record("enabling approval requirement");
    page.set_checked(APPROVAL_TOGGLE, true).await?;

    log.record("opening Limits & Sales panel");
    page.click_sequence(LIMITS_PANEL).await?;
    page.settle(SETTLE_SHORT).await;

    let capacity = spec.tier.capacity().to_string();
    log.record(format!("setting capacity to {capacity}"));
    page.replace_text(CAPACITY_INPUT, &capacity).await?;

    log.record("enabling sales end");
    page.set_checked(SALES_END_TOGGLE, true).await?;

    if let Some(parts) = deadline {
        log.record(format!(
            "selecting sales end date: day {} in panel {}",
            parts.day, parts.month_key
        ));
        page.click_sequence(DATE_PICKER).await?;
        page.settle(SETTLE_SHORT).await;
        let day_cells = month_day_cells(&parts.month_key);
        page.click_sequence_by_text(&day_cells, &parts.day)
            .await
            .map_err(|err| match err {
                ActionError::TargetNotFound(msg) => WorkflowError::DateNotFound(msg),
                other => other.into(),
            })?;

        log.record(format!("selecting sales end time {}", parts.time_label));
        page.click_sequence(TIME_PICKER).await?;
        page.settle(SETTLE_SHORT).await;
        page.click_sequence_by_text(TIME_OPTIONS, &parts.time_label)
            .await
            .map_err(|err| match err {
                ActionError::TargetNotFound(msg) => WorkflowError::TimeNotFound(msg),
                other => other.into(),
            })?;
    }

    log.record("selecting Paid ticket type");
    page.click_sequence(MODAL_BACK).await?;
    page.settle(SETTLE_SHORT).await;
    page.click_sequence_by_text(TYPE_OPTIONS, "Paid").await?;

    if let Some(base) = base_price {
        let price = format!("{:.2}", spec.effective_price(base));
        log.record(format!("setting price to {price}"));
        page.set_value(PRICE_INPUT, &price).await?;
    }

    log.record("submitting ticket type");
    page.click_sequence(SUBMIT_BUTTON).await?;
    match page
        .wait_for(NAME_INPUT, ElementState::Hidden, MODAL_CLOSE_TIMEOUT)
        .await
    {
        Ok(()) => {
            log.record(format!("ticket type '{}' created", spec.name));
            Ok(())
        }
        Err(ActionError::WaitTimeout(msg)) => Err(WorkflowError::ModalCloseTimeout(msg)),
        Err(err) => Err(err.into()),
    }
}
