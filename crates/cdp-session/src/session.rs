use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{SessionConfig, SessionError};

/// One launched browser with a single page, exclusively owned by one
/// workflow run.
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

impl BrowserSession {
    /// Launch Chromium and open a blank page.
    ///
    /// The CDP event handler is drained on a background task for the
    /// lifetime of the session; without it every command would stall.
    pub async fn launch(config: SessionConfig) -> Result<Self, SessionError> {
        let mut builder = BrowserConfig::builder()
            .window_size(config.window.0, config.window.1)
            .args(config.extra_args());
        if !config.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &config.executable {
            builder = builder.chrome_executable(path);
        }
        let browser_config = builder.build().map_err(SessionError::Launch)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|err| SessionError::Launch(err.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    debug!(error = %err, "CDP handler event error");
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(err) => {
                handler_task.abort();
                return Err(SessionError::CdpIo(err.to_string()));
            }
        };

        info!(headless = config.headless, "browser session launched");
        Ok(Self {
            browser,
            page,
            handler_task,
        })
    }

    /// Handle to the session's single page.
    pub fn page(&self) -> Page {
        self.page.clone()
    }

    /// Best-effort shutdown. Close failures are logged and swallowed;
    /// nothing here may propagate past the session boundary.
    pub async fn close(mut self) {
        if let Err(err) = self.browser.close().await {
            warn!(error = %err, "browser close failed; continuing");
        }
        if let Err(err) = self.browser.wait().await {
            warn!(error = %err, "browser process wait failed; continuing");
        }
        self.handler_task.abort();
        info!("browser session closed");
    }
}
