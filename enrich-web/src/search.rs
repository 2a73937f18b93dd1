//! Search client: render an engine's results page and parse it.
//!
//! Each call runs in its own browser session (see [`crate::render`]).
//! Failures never reach the caller: a navigation error or timeout yields
//! whatever was collected, which for a page that never loaded is nothing.

use std::sync::Arc;

use crate::config::WebConfig;
use crate::engine::SearchEngineTrait;
use crate::engines::{BingEngine, GoogleEngine};
use crate::error::WebError;
use crate::http::random_user_agent;
use crate::render::{PageRenderer, RenderRequest};
use crate::types::{SearchEngine, SearchResult};

/// Drives a [`PageRenderer`] against Bing or Google.
pub struct SearchClient<R> {
    renderer: Arc<R>,
    bing: BingEngine,
    google: GoogleEngine,
    accept_language: String,
    navigation_timeout: std::time::Duration,
}

impl<R: PageRenderer> SearchClient<R> {
    /// Build a client sharing `renderer`.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::Parse`] if an engine's selectors fail to compile.
    pub fn new(renderer: Arc<R>, config: &WebConfig) -> Result<Self, WebError> {
        Ok(Self {
            renderer,
            bing: BingEngine::new()?,
            google: GoogleEngine::new(config)?,
            accept_language: config.accept_language.clone(),
            navigation_timeout: config.navigation_timeout(),
        })
    }

    fn engine(&self, engine: SearchEngine) -> &dyn SearchEngineTrait {
        match engine {
            SearchEngine::Bing => &self.bing,
            SearchEngine::Google => &self.google,
        }
    }

    /// The results-page URL that [`search`](Self::search) would load.
    pub fn search_url(&self, query: &str, engine: SearchEngine) -> String {
        self.engine(engine).search_url(query)
    }

    /// Search `query` on `engine`, scanning at most `max_results` result
    /// blocks. Results keep the engine's on-page order.
    pub async fn search(
        &self,
        query: &str,
        engine: SearchEngine,
        max_results: usize,
    ) -> Vec<SearchResult> {
        tracing::debug!(query, %engine, max_results, "search");

        let request = RenderRequest::new(self.search_url(query, engine), self.navigation_timeout)
            .with_user_agent(random_user_agent())
            .with_header("Accept-Language", self.accept_language.as_str());

        match self.renderer.render(&request).await {
            Ok(page) => {
                tracing::trace!(%engine, bytes = page.html.len(), "results page rendered");
                self.engine(engine).parse(&page.html, max_results)
            }
            Err(e) => {
                tracing::warn!(%engine, error = %e, "search page did not load");
                Vec::new()
            }
        }
    }
}
