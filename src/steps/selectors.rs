//! CSS anchors into the third-party registration UI.
//!
//! The site's DOM is an uncontrolled dependency; these are observed class
//! and role patterns, kept in one place so a markup change is a one-file
//! fix.

pub const EMAIL_INPUT: &str = "form input[type=\"email\"]";
pub const PASSWORD_INPUT: &str = "form input[type=\"password\"]";
pub const AUTH_CONTINUE: &str = "form button[type=\"submit\"]";

pub const TICKET_LIST: &str = "div[class*=\"ticket-types\"]";
pub const TICKET_ROW: &str = "div[class*=\"ticket-type-row\"]";
pub const TICKET_ROW_NAME: &str = "div[class*=\"ticket-name\"]";
pub const TICKET_ROW_MENU: &str = "button[class*=\"overflow-menu\"]";
pub const MENU_ITEMS: &str = "div[role=\"menu\"] [role=\"menuitem\"]";
pub const MODAL_BUTTONS: &str = "div[role=\"dialog\"] button";

pub const NEW_TICKET_BUTTON: &str = "button[class*=\"add-ticket\"]";
pub const NAME_INPUT: &str = "div[role=\"dialog\"] input[name=\"name\"]";
pub const DESCRIPTION_REVEAL: &str = "div[role=\"dialog\"] button[class*=\"add-description\"]";
pub const DESCRIPTION_FIELD: &str = "div[role=\"dialog\"] textarea[name=\"description\"]";
pub const APPROVAL_TOGGLE: &str = "div[role=\"dialog\"] input[name=\"requires-approval\"]";
pub const LIMITS_PANEL: &str = "div[role=\"dialog\"] button[class*=\"limits-sales\"]";
pub const CAPACITY_INPUT: &str = "div[role=\"dialog\"] input[name=\"capacity\"]";
pub const SALES_END_TOGGLE: &str = "div[role=\"dialog\"] input[name=\"sales-end\"]";
pub const DATE_PICKER: &str = "div[role=\"dialog\"] button[class*=\"date-trigger\"]";
pub const TIME_PICKER: &str = "div[role=\"dialog\"] button[class*=\"time-trigger\"]";
pub const TIME_OPTIONS: &str = "div[class*=\"time-picker\"] [role=\"option\"]";
pub const MODAL_BACK: &str = "div[role=\"dialog\"] button[class*=\"back\"]";
pub const TYPE_OPTIONS: &str = "div[role=\"dialog\"] [role=\"radio\"]";
pub const PRICE_INPUT: &str = "div[role=\"dialog\"] input[class*=\"price\"]";
pub const SUBMIT_BUTTON: &str = "div[role=\"dialog\"] button[type=\"submit\"]";

/// Day cells inside the calendar panel for one month, keyed
/// `"{year}-{month}"`.
pub fn month_day_cells(month_key: &str) -> String {
    format!("div[class*=\"calendar\"] [data-month=\"{month_key}\"] [role=\"gridcell\"]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_day_cells_embed_the_key() {
        let scope = month_day_cells("2025-6");
        assert!(scope.contains("[data-month=\"2025-6\"]"));
        assert!(scope.contains("gridcell"));
    }
}
