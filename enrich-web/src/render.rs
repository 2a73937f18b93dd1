//! Headless-render capability and its Chromium implementation.
//!
//! A [`PageRenderer`] loads a URL in a real browser and hands back a DOM
//! snapshot that the parsers query with CSS selectors. [`ChromeRenderer`]
//! launches one browser per call and always tears it down before
//! returning, so a hung page can never leak into another lookup.

use chromiumoxide::cdp::browser_protocol::emulation::SetUserAgentOverrideParams;
use chromiumoxide::cdp::browser_protocol::network::{Headers, SetExtraHttpHeadersParams};
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::config::BrowserSettings;
use crate::error::WebError;

/// Interval between DOM snapshots while waiting for a page to settle.
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// What to load and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    /// Page to navigate to.
    pub url: String,
    /// User agent override for this session.
    pub user_agent: Option<String>,
    /// Extra request headers, e.g. `Accept-Language`.
    pub headers: Vec<(String, String)>,
    /// Bound on the initial navigation. Exceeding it fails the render.
    pub navigation_timeout: Duration,
    /// Optional bound on the post-navigation settle wait. Exceeding it is
    /// not an error: the DOM is snapshotted as it stands.
    pub idle_timeout: Option<Duration>,
}

impl RenderRequest {
    /// A request with no overrides and no idle wait.
    pub fn new(url: impl Into<String>, navigation_timeout: Duration) -> Self {
        Self {
            url: url.into(),
            user_agent: None,
            headers: Vec::new(),
            navigation_timeout,
            idle_timeout: None,
        }
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Add an extra request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Wait up to `timeout` for the page to settle after navigation.
    pub fn with_idle_wait(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }
}

/// DOM snapshot of a rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// The URL that was requested.
    pub url: String,
    /// Serialised DOM after scripts ran.
    pub html: String,
}

/// A "render a page and give me its DOM" capability.
///
/// Every call must be isolated: implementations may not share sessions
/// between calls.
pub trait PageRenderer: Send + Sync {
    /// Load `request.url` and return the DOM snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::Timeout`] if navigation exceeds its bound and
    /// [`WebError::Render`] for launch or navigation failures.
    fn render(
        &self,
        request: &RenderRequest,
    ) -> impl Future<Output = Result<RenderedPage, WebError>> + Send;
}

/// [`PageRenderer`] driving a fresh headless Chromium per call.
#[derive(Debug, Clone, Default)]
pub struct ChromeRenderer {
    settings: BrowserSettings,
}

impl ChromeRenderer {
    /// Create a renderer with the given launch settings.
    pub fn new(settings: BrowserSettings) -> Self {
        Self { settings }
    }
}

impl PageRenderer for ChromeRenderer {
    async fn render(&self, request: &RenderRequest) -> Result<RenderedPage, WebError> {
        let session = BrowserSession::launch(&self.settings).await?;
        let outcome = session.load(request).await;
        session.close().await;
        outcome
    }
}

/// One browser process plus the task pumping its CDP event stream.
struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    async fn launch(settings: &BrowserSettings) -> Result<Self, WebError> {
        let mut builder = BrowserConfig::builder();
        if let Some(ref executable) = settings.executable {
            builder = builder.chrome_executable(executable);
        }
        if !settings.headless {
            builder = builder.with_head();
        }
        if settings.no_sandbox {
            builder = builder.no_sandbox();
        }
        let config = builder
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .build()
            .map_err(|e| WebError::Render(format!("browser config failed: {e}")))?;

        let (browser, mut events) = Browser::launch(config)
            .await
            .map_err(|e| WebError::Render(format!("browser launch failed: {e}")))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        tracing::trace!("browser session launched");
        Ok(Self { browser, handler })
    }

    async fn load(&self, request: &RenderRequest) -> Result<RenderedPage, WebError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| WebError::Render(format!("failed to open page: {e}")))?;

        if let Some(ref user_agent) = request.user_agent {
            page.execute(SetUserAgentOverrideParams::new(user_agent.clone()))
                .await
                .map_err(|e| WebError::Render(format!("failed to set user agent: {e}")))?;
        }
        if !request.headers.is_empty() {
            let headers: serde_json::Map<String, serde_json::Value> = request
                .headers
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect();
            page.execute(SetExtraHttpHeadersParams::new(Headers::new(
                serde_json::Value::Object(headers),
            )))
            .await
            .map_err(|e| WebError::Render(format!("failed to set headers: {e}")))?;
        }

        match tokio::time::timeout(request.navigation_timeout, page.goto(request.url.as_str()))
            .await
        {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                return Err(WebError::Render(format!(
                    "navigation to {} failed: {e}",
                    request.url
                )))
            }
            Err(_) => {
                return Err(WebError::Timeout(format!(
                    "navigation to {} exceeded {}s",
                    request.url,
                    request.navigation_timeout.as_secs()
                )))
            }
        }

        if let Some(idle) = request.idle_timeout {
            if tokio::time::timeout(idle, wait_for_settled_dom(&page))
                .await
                .is_err()
            {
                tracing::debug!(url = %request.url, "page still changing after idle wait");
            }
        }

        let html = page
            .content()
            .await
            .map_err(|e| WebError::Render(format!("failed to read DOM: {e}")))?;

        Ok(RenderedPage {
            url: request.url.clone(),
            html,
        })
    }

    async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::debug!(error = %e, "browser close failed, killing process");
            if let Some(Err(e)) = self.browser.kill().await {
                tracing::warn!(error = %e, "browser kill failed");
            }
        }
        if let Err(e) = self.browser.wait().await {
            tracing::debug!(error = %e, "browser wait failed");
        }
        self.handler.abort();
        tracing::trace!("browser session closed");
    }
}

/// Resolve once two consecutive DOM snapshots have the same size.
async fn wait_for_settled_dom(page: &Page) {
    let mut last_len = None;
    loop {
        tokio::time::sleep(IDLE_POLL_INTERVAL).await;
        let Ok(html) = page.content().await else {
            return;
        };
        if last_len == Some(html.len()) {
            return;
        }
        last_len = Some(html.len());
    }
}
