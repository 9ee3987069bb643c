//! Sign-in against the external login form.

use page_actions::{ActionError, ElementState, PageActions};

use crate::config::Credentials;
use crate::errors::WorkflowError;
use crate::steplog::StepLog;
use crate::steps::selectors::{AUTH_CONTINUE, EMAIL_INPUT, PASSWORD_INPUT};
use crate::steps::{AUTH_NAV_TIMEOUT, NAV_TIMEOUT, SETTLE_SHORT, WAIT_TIMEOUT};

pub struct AuthParams<'a> {
    pub landing_url: &'a str,
    pub signin_url: &'a str,
    /// Location prefix that proves the session is authenticated. This is
    /// the only correctness check; the site's own error banners are not
    /// inspected.
    pub authenticated_prefix: &'a str,
    pub credentials: &'a Credentials,
}

/// Drive the login form to obtain an authenticated session.
pub async fn sign_in(
    page: &dyn PageActions,
    log: &mut StepLog,
    params: &AuthParams<'_>,
) -> Result<(), WorkflowError> {
    log.record("navigating to landing page");
    page.navigate(params.landing_url, NAV_TIMEOUT).await?;

    log.record("navigating to sign-in page");
    page.navigate(params.signin_url, NAV_TIMEOUT).await?;

    log.record("waiting for email input");
    page.wait_for(EMAIL_INPUT, ElementState::Interactable, WAIT_TIMEOUT)
        .await?;

    log.record("entering email");
    page.set_value(EMAIL_INPUT, &params.credentials.email)
        .await?;
    page.click_sequence(AUTH_CONTINUE).await?;

    // The password field is revealed without any readiness signal.
    log.record("waiting for password input");
    page.settle(SETTLE_SHORT).await;
    page.wait_for(PASSWORD_INPUT, ElementState::Visible, WAIT_TIMEOUT)
        .await?;

    log.record("entering password");
    page.set_value(PASSWORD_INPUT, &params.credentials.password)
        .await?;

    log.record("submitting credentials");
    page.wait_for(AUTH_CONTINUE, ElementState::Interactable, WAIT_TIMEOUT)
        .await?;
    page.click_sequence(AUTH_CONTINUE).await?;

    log.record("waiting for authenticated area");
    match page
        .wait_for_url_prefix(params.authenticated_prefix, AUTH_NAV_TIMEOUT)
        .await
    {
        Ok(()) => {
            log.record("signed in");
            Ok(())
        }
        Err(ActionError::WaitTimeout(_)) => {
            let location = page.current_url().await.unwrap_or_default();
            Err(WorkflowError::Authentication(format!(
                "expected location under {}, got {location:?}",
                params.authenticated_prefix
            )))
        }
        Err(err) => Err(err.into()),
    }
}
