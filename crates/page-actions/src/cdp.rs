use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::Page;
use serde_json::Value;
use tokio::time::{sleep, timeout};
use tracing::debug;

use crate::{scripts, ActionError, ElementState, PageActions};

/// How often bounded waits re-evaluate their predicate.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// [`PageActions`] implementation over a live Chromium page.
pub struct CdpPage {
    page: Page,
}

impl CdpPage {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    async fn eval_value(&self, script: String, context: &str) -> Result<Value, ActionError> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(|err| ActionError::CdpIo(format!("{context}: {err}")))?;
        result
            .into_value::<Value>()
            .map_err(|err| ActionError::Internal(format!("{context}: bad script result: {err}")))
    }

    async fn eval_status(&self, script: String, context: &str) -> Result<(), ActionError> {
        let value = self.eval_value(script, context).await?;
        scripts::decode_status(&value, context)
    }

    /// Poll `probe` until it reports true or the bound expires.
    async fn poll_until<F, Fut>(
        &self,
        bound: Duration,
        context: &str,
        mut probe: F,
    ) -> Result<(), ActionError>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = Result<bool, ActionError>> + Send,
    {
        let waited = timeout(bound, async {
            loop {
                if probe().await? {
                    return Ok(());
                }
                sleep(POLL_INTERVAL).await;
            }
        })
        .await;

        match waited {
            Ok(inner) => inner,
            Err(_) => Err(ActionError::WaitTimeout(format!(
                "{context}: condition not met within {}ms",
                bound.as_millis()
            ))),
        }
    }
}

#[async_trait]
impl PageActions for CdpPage {
    async fn navigate(&self, url: &str, bound: Duration) -> Result<(), ActionError> {
        debug!(url, "navigating");
        match timeout(bound, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(err)) => Err(ActionError::CdpIo(format!("navigate to {url}: {err}"))),
            Err(_) => Err(ActionError::NavTimeout(format!(
                "navigate to {url}: no load within {}ms",
                bound.as_millis()
            ))),
        }
    }

    async fn current_url(&self) -> Result<String, ActionError> {
        let url = self
            .page
            .url()
            .await
            .map_err(|err| ActionError::CdpIo(format!("read url: {err}")))?;
        Ok(url.unwrap_or_default())
    }

    async fn wait_for(
        &self,
        selector: &str,
        state: ElementState,
        bound: Duration,
    ) -> Result<(), ActionError> {
        let script = scripts::state_predicate(selector, state);
        let context = format!("wait for {selector} to be {state:?}");
        self.poll_until(bound, &context, || {
            let script = script.clone();
            let context = context.clone();
            async move {
                let value = self.eval_value(script, &context).await?;
                Ok(value.as_bool().unwrap_or(false))
            }
        })
        .await
    }

    async fn wait_for_url_prefix(
        &self,
        prefix: &str,
        bound: Duration,
    ) -> Result<(), ActionError> {
        let context = format!("wait for url prefix {prefix}");
        self.poll_until(bound, &context, || async move {
            Ok(self.current_url().await?.starts_with(prefix))
        })
        .await
    }

    async fn click(&self, selector: &str) -> Result<(), ActionError> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| ActionError::TargetNotFound(format!("click target {selector}")))?;
        element
            .click()
            .await
            .map_err(|err| ActionError::CdpIo(format!("click {selector}: {err}")))?;
        Ok(())
    }

    async fn click_sequence(&self, selector: &str) -> Result<(), ActionError> {
        self.eval_status(
            scripts::click_sequence(selector),
            &format!("click sequence on {selector}"),
        )
        .await
    }

    async fn click_sequence_by_text(&self, scope: &str, text: &str) -> Result<(), ActionError> {
        self.eval_status(
            scripts::click_sequence_by_text(scope, text),
            &format!("click sequence on {scope} with text {text:?}"),
        )
        .await
    }

    async fn click_sequence_in_row(
        &self,
        row_selector: &str,
        label_selector: &str,
        label: &str,
        target_selector: &str,
    ) -> Result<(), ActionError> {
        self.eval_status(
            scripts::click_sequence_in_row(row_selector, label_selector, label, target_selector),
            &format!("click {target_selector} in row {label:?}"),
        )
        .await
    }

    async fn row_exists(
        &self,
        row_selector: &str,
        label_selector: &str,
        label: &str,
    ) -> Result<bool, ActionError> {
        let value = self
            .eval_value(
                scripts::row_exists(row_selector, label_selector, label),
                &format!("scan rows for {label:?}"),
            )
            .await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn set_value(&self, selector: &str, value: &str) -> Result<(), ActionError> {
        self.eval_status(
            scripts::set_value(selector, value),
            &format!("set value on {selector}"),
        )
        .await
    }

    async fn replace_text(&self, selector: &str, text: &str) -> Result<(), ActionError> {
        self.eval_status(
            scripts::replace_text(selector, text),
            &format!("replace text in {selector}"),
        )
        .await
    }

    async fn set_checked(&self, selector: &str, on: bool) -> Result<(), ActionError> {
        self.eval_status(
            scripts::set_checked(selector, on),
            &format!("set {selector} checked={on}"),
        )
        .await
    }

    async fn settle(&self, duration: Duration) {
        debug!(ms = duration.as_millis() as u64, "settle delay");
        sleep(duration).await;
    }
}
