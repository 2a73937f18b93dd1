//! Bing search engine, used for company-name lookups.
//!
//! Every organic result is kept: candidate filtering happens later, in the
//! enrichment pipeline.

use scraper::{ElementRef, Selector};

use crate::engine::{selector, BlockOutcome, SearchEngineTrait};
use crate::error::WebError;
use crate::probe::{inner_text, non_empty};
use crate::types::{SearchEngine, SearchResult};

/// Bing results-page parser.
pub struct BingEngine {
    block: Selector,
    heading_link: Selector,
    snippet: Selector,
}

impl BingEngine {
    /// Compile Bing's result selectors.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::Parse`] if a built-in selector fails to compile.
    pub fn new() -> Result<Self, WebError> {
        Ok(Self {
            // Bing uses li.b_algo containers for organic search results
            block: selector("li.b_algo")?,
            heading_link: selector("h2 > a")?,
            snippet: selector("p")?,
        })
    }
}

impl SearchEngineTrait for BingEngine {
    fn engine_type(&self) -> SearchEngine {
        SearchEngine::Bing
    }

    fn search_url(&self, query: &str) -> String {
        format!("https://www.bing.com/search?q={}", urlencoding::encode(query))
    }

    fn block_selector(&self) -> &Selector {
        &self.block
    }

    fn parse_block(&self, block: ElementRef<'_>) -> BlockOutcome {
        let anchor = block
            .select(&self.heading_link)
            .next()
            .ok_or_else(|| WebError::Parse("Bing block has no heading link".into()))?;

        let url = anchor
            .value()
            .attr("href")
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .ok_or_else(|| WebError::Parse("Bing heading link has no href".into()))?;

        let title = non_empty(&inner_text(anchor));
        let snippet = block
            .select(&self.snippet)
            .next()
            .and_then(|p| non_empty(&inner_text(p)));

        Ok(Some(SearchResult {
            url: url.to_owned(),
            title,
            snippet,
            source: SearchEngine::Bing,
            result_type: None,
        }))
    }
}
