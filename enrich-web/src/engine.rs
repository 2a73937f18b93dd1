//! Trait definition for per-engine result-page parsing.
//!
//! Each search engine (Bing, Google) implements [`SearchEngineTrait`] to
//! build its results URL and turn a rendered results page into ordered
//! [`SearchResult`] values. Fetching the page is the job of
//! [`crate::search::SearchClient`]; engines only deal with markup.

use scraper::{ElementRef, Html, Selector};

use crate::error::WebError;
use crate::types::{SearchEngine, SearchResult};

/// Outcome of reading one result block.
///
/// `Ok(None)` means the block parsed but was filtered out; `Err` means the
/// block was malformed and is skipped.
pub type BlockOutcome = Result<Option<SearchResult>, WebError>;

/// A search engine's results-page layout.
///
/// All implementations must be `Send + Sync` so a client can be shared
/// across request tasks.
pub trait SearchEngineTrait: Send + Sync {
    /// Returns which [`SearchEngine`] variant this implementation represents.
    fn engine_type(&self) -> SearchEngine;

    /// Results page URL for `query`, with the query percent-encoded.
    fn search_url(&self, query: &str) -> String;

    /// Selector matching one organic result block.
    fn block_selector(&self) -> &Selector;

    /// Read a single result block.
    fn parse_block(&self, block: ElementRef<'_>) -> BlockOutcome;

    /// Parse a results page, scanning at most `max_results` blocks in page
    /// order. Malformed blocks are skipped; scanning continues.
    fn parse(&self, html: &str, max_results: usize) -> Vec<SearchResult> {
        let document = Html::parse_document(html);
        let engine = self.engine_type();
        let mut results = Vec::new();

        for (position, block) in document
            .select(self.block_selector())
            .take(max_results)
            .enumerate()
        {
            match self.parse_block(block) {
                Ok(Some(result)) => results.push(result),
                Ok(None) => tracing::trace!(%engine, position, "result block filtered"),
                Err(e) => tracing::trace!(%engine, position, error = %e, "result block skipped"),
            }
        }

        tracing::debug!(%engine, count = results.len(), "results parsed");
        results
    }
}

/// Compile a fixed selector, mapping failure to [`WebError::Parse`].
pub(crate) fn selector(source: &str) -> Result<Selector, WebError> {
    Selector::parse(source)
        .map_err(|e| WebError::Parse(format!("invalid selector {source:?}: {e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Emits every `<li>` whose text is not "bad"; "skip" is filtered out.
    struct ListEngine {
        block: Selector,
    }

    impl ListEngine {
        fn new() -> Self {
            Self {
                block: selector("li").expect("valid"),
            }
        }
    }

    impl SearchEngineTrait for ListEngine {
        fn engine_type(&self) -> SearchEngine {
            SearchEngine::Bing
        }

        fn search_url(&self, query: &str) -> String {
            format!("https://list.test/?q={query}")
        }

        fn block_selector(&self) -> &Selector {
            &self.block
        }

        fn parse_block(&self, block: ElementRef<'_>) -> BlockOutcome {
            let text = block.text().collect::<String>();
            match text.as_str() {
                "bad" => Err(WebError::Parse("bad block".into())),
                "skip" => Ok(None),
                _ => Ok(Some(SearchResult {
                    url: format!("https://{text}.test"),
                    title: Some(text),
                    snippet: None,
                    source: SearchEngine::Bing,
                    result_type: None,
                })),
            }
        }
    }

    const LIST: &str = "<ul><li>a</li><li>bad</li><li>skip</li><li>b</li><li>c</li></ul>";

    #[test]
    fn bad_blocks_are_skipped_and_order_kept() {
        let results = ListEngine::new().parse(LIST, 10);
        let urls: Vec<_> = results.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a.test", "https://b.test", "https://c.test"]);
    }

    #[test]
    fn cap_counts_scanned_blocks_not_emitted_results() {
        // Blocks a, bad, skip, b are scanned; only a and b are emitted.
        let results = ListEngine::new().parse(LIST, 4);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn invalid_selector_is_parse_error() {
        let err = selector("[[nope").unwrap_err();
        assert!(err.to_string().contains("invalid selector"));
    }
}
