//! Outbound HTTP fetch capability and the `reqwest` implementation.
//!
//! Company-site lookups go through [`HttpFetch`] so the scheme-fallback
//! logic in [`crate::site`] can be exercised without a network.

use rand::seq::SliceRandom;
use std::future::Future;
use std::time::Duration;

use crate::error::WebError;

/// Realistic browser User-Agent strings. Each search session draws one;
/// a [`ReqwestFetcher`] draws one when it is built.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// Maximum number of redirects followed by a site fetch.
const MAX_REDIRECTS: usize = 10;

/// Status code and raw body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Final HTTP status after redirects.
    pub status: u16,
    /// Response body decoded as text.
    pub body: String,
}

/// A GET-with-redirects capability.
///
/// Implementations return `Err` only for transport failures (DNS, connect,
/// TLS, timeout). Any HTTP status, including errors, is a successful fetch.
pub trait HttpFetch: Send + Sync {
    /// Fetch `url`, following redirects, giving up after `timeout`.
    fn get(
        &self,
        url: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<FetchedPage, WebError>> + Send;
}

/// [`HttpFetch`] backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// Build a fetcher with redirect following and gzip/brotli decoding.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::Http`] if the client cannot be constructed.
    pub fn new() -> Result<Self, WebError> {
        let client = reqwest::Client::builder()
            .user_agent(random_user_agent())
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| WebError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl HttpFetch for ReqwestFetcher {
    async fn get(&self, url: &str, timeout: Duration) -> Result<FetchedPage, WebError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| classify(url, e))?;

        tracing::trace!(url, status, bytes = body.len(), "site response received");
        Ok(FetchedPage { status, body })
    }
}

fn classify(url: &str, err: reqwest::Error) -> WebError {
    if err.is_timeout() {
        WebError::Timeout(format!("{url}: {err}"))
    } else {
        WebError::Http(format!("{url}: {err}"))
    }
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // SAFETY: USER_AGENTS is a non-empty const array, choose only returns None on empty slices
        .unwrap_or(USER_AGENTS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_user_agent_returns_valid_ua() {
        let ua = random_user_agent();
        assert!(USER_AGENTS.contains(&ua));
        assert!(ua.contains("Mozilla/5.0"));
    }

    #[test]
    fn build_fetcher() {
        assert!(ReqwestFetcher::new().is_ok());
    }

    #[test]
    fn fetcher_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestFetcher>();
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let fetcher = ReqwestFetcher::new().expect("client");
        // Port 9 (discard) on localhost is closed on CI runners.
        let result = fetcher
            .get("http://127.0.0.1:9/", Duration::from_secs(2))
            .await;
        assert!(result.is_err());
    }
}
