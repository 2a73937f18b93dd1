//! Google search engine, used for profile lookups.
//!
//! Google wraps result links in `/url?q=<target>&...` redirects and ships
//! several snippet layouts at once. Only results whose target URL contains
//! the profile path marker are kept, and those are tagged as profiles.

use scraper::{ElementRef, Selector};
use url::Url;

use crate::config::WebConfig;
use crate::engine::{selector, BlockOutcome, SearchEngineTrait};
use crate::error::WebError;
use crate::probe::{inner_text, non_empty, SelectorChain};
use crate::types::{ResultType, SearchEngine, SearchResult};

/// Prefix of Google's click-tracking redirect links.
const REDIRECT_PREFIX: &str = "/url?q=";

/// Google results-page parser, filtered to profile results.
pub struct GoogleEngine {
    block: Selector,
    link: Selector,
    heading: Selector,
    snippet: SelectorChain,
    profile_marker: String,
}

impl GoogleEngine {
    /// Build a parser using the snippet selectors and profile marker from
    /// `config`.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::Parse`] if a built-in selector fails to compile.
    pub fn new(config: &WebConfig) -> Result<Self, WebError> {
        Ok(Self {
            block: selector("div.g")?,
            link: selector("a")?,
            heading: selector("h3")?,
            snippet: SelectorChain::new(&config.selectors.google_snippet),
            profile_marker: config.profile_path_marker.clone(),
        })
    }

    /// Extract the real target from a `/url?q=...` redirect link.
    ///
    /// Links that are not redirect wrappers are returned unchanged.
    /// Returns `None` only for a wrapper with an empty or missing target.
    ///
    /// # Examples
    ///
    /// ```
    /// use enrich_web::engines::GoogleEngine;
    ///
    /// assert_eq!(
    ///     GoogleEngine::unwrap_redirect("/url?q=https://example.com/in/jdoe&sa=U").as_deref(),
    ///     Some("https://example.com/in/jdoe"),
    /// );
    /// ```
    pub fn unwrap_redirect(href: &str) -> Option<String> {
        if !href.starts_with(REDIRECT_PREFIX) {
            return Some(href.to_owned());
        }
        let parsed = Url::parse("https://www.google.com").ok()?.join(href).ok()?;
        parsed
            .query_pairs()
            .find(|(key, _)| key == "q")
            .map(|(_, value)| value.into_owned())
            .filter(|target| !target.is_empty())
    }
}

impl SearchEngineTrait for GoogleEngine {
    fn engine_type(&self) -> SearchEngine {
        SearchEngine::Google
    }

    fn search_url(&self, query: &str) -> String {
        format!("https://www.google.com/search?q={}", urlencoding::encode(query))
    }

    fn block_selector(&self) -> &Selector {
        &self.block
    }

    fn parse_block(&self, block: ElementRef<'_>) -> BlockOutcome {
        let href = block
            .select(&self.link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .ok_or_else(|| WebError::Parse("Google block has no link".into()))?;

        let url = Self::unwrap_redirect(href)
            .ok_or_else(|| WebError::Parse(format!("redirect without target: {href}")))?;

        if !url.contains(&self.profile_marker) {
            return Ok(None);
        }

        let title = block
            .select(&self.heading)
            .next()
            .and_then(|h| non_empty(&inner_text(h)));
        let snippet = self.snippet.first_text(block);

        Ok(Some(SearchResult {
            url,
            title,
            snippet,
            source: SearchEngine::Google,
            result_type: Some(ResultType::LinkedinProfile),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_GOOGLE_HTML: &str = r#"<!DOCTYPE html>
<html><body><div id="search">
<div class="g">
  <a href="/url?q=https://www.linkedin.com/in/janepublic&amp;sa=U&amp;ved=2ah"><h3>Jane Public - Acme Corp | LinkedIn</h3></a>
  <div class="VwiC3b">Head of Rockets at Acme Corp.</div>
</div>
<div class="g">
  <a href="https://acme.com/team"><h3>Our team</h3></a>
</div>
<div class="g">
  <a href="https://uk.linkedin.com/in/jpublic"><h3>J. Public</h3></a>
  <span class="aCOpRe">Preferred snippet</span>
  <div class="VwiC3b">Secondary snippet</div>
</div>
<div class="g"><h3>No link at all</h3></div>
<div class="g">
  <a href="https://www.linkedin.com/in/fourth"><h3>Fourth</h3></a>
</div>
</div></body></html>"#;

    fn engine() -> GoogleEngine {
        GoogleEngine::new(&WebConfig::default()).expect("selectors compile")
    }

    #[test]
    fn unwraps_redirect_exactly() {
        assert_eq!(
            GoogleEngine::unwrap_redirect("/url?q=https://example.com/in/jdoe&sa=U&ved=xyz")
                .as_deref(),
            Some("https://example.com/in/jdoe")
        );
    }

    #[test]
    fn unwrap_decodes_percent_escapes() {
        assert_eq!(
            GoogleEngine::unwrap_redirect("/url?q=https%3A%2F%2Fexample.com%2Fin%2Fj%C3%A9&sa=U")
                .as_deref(),
            Some("https://example.com/in/jé")
        );
    }

    #[test]
    fn plain_links_pass_through() {
        assert_eq!(
            GoogleEngine::unwrap_redirect("https://example.com/x").as_deref(),
            Some("https://example.com/x")
        );
    }

    #[test]
    fn wrapper_without_target_is_none() {
        assert!(GoogleEngine::unwrap_redirect("/url?q=&sa=U").is_none());
    }

    #[test]
    fn keeps_only_profiles_and_tags_them() {
        let results = engine().parse(MOCK_GOOGLE_HTML, 10);
        let urls: Vec<_> = results.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://www.linkedin.com/in/janepublic",
                "https://uk.linkedin.com/in/jpublic",
                "https://www.linkedin.com/in/fourth",
            ]
        );
        assert!(results.iter().all(SearchResult::is_profile));
        assert!(results.iter().all(|r| r.source == SearchEngine::Google));
    }

    #[test]
    fn snippet_selectors_tried_in_order() {
        let results = engine().parse(MOCK_GOOGLE_HTML, 10);
        assert_eq!(
            results[0].snippet.as_deref(),
            Some("Head of Rockets at Acme Corp.")
        );
        assert_eq!(results[1].snippet.as_deref(), Some("Preferred snippet"));
        assert!(results[2].snippet.is_none());
        assert_eq!(
            results[0].title.as_deref(),
            Some("Jane Public - Acme Corp | LinkedIn")
        );
    }

    #[test]
    fn cap_applies_to_blocks_scanned() {
        // First three blocks scanned; the non-profile one is filtered out.
        let results = engine().parse(MOCK_GOOGLE_HTML, 3);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn search_url_encodes_query() {
        assert_eq!(
            engine().search_url(r#"site:linkedin.com/in "Jane Public""#),
            "https://www.google.com/search?q=site%3Alinkedin.com%2Fin%20%22Jane%20Public%22"
        );
    }

    #[test]
    fn custom_marker_changes_filter() {
        let config = WebConfig {
            profile_path_marker: "acme.com/".into(),
            ..Default::default()
        };
        let engine = GoogleEngine::new(&config).expect("selectors compile");
        let results = engine.parse(MOCK_GOOGLE_HTML, 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url, "https://acme.com/team");
    }
}
