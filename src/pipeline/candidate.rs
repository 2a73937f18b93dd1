//! Candidate-domain selection from company-name search results.
//!
//! The company's own site is assumed to be the first result that is not an
//! aggregator or directory listing.

use enrich_web::SearchResult;
use regex::Regex;
use std::sync::LazyLock;

/// Prefix of a search-engine click-tracking link left unresolved.
const REDIRECT_PREFIX: &str = "/url?q=";

static REDIRECT_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"/url\?q=(https?://[^&]+)")
        .map_err(|e| tracing::error!(error = %e, "redirect pattern failed to compile"))
        .ok()
});

/// Returns `true` if `url` contains any denylisted fragment, ignoring case.
pub fn is_denylisted(url: &str, denylist: &[String]) -> bool {
    let lower = url.to_lowercase();
    denylist
        .iter()
        .any(|fragment| lower.contains(&fragment.to_lowercase()))
}

/// Pull the target out of an unresolved `/url?q=<target>&...` link.
///
/// Anything else, including a wrapper whose target is not an http(s) URL,
/// is returned unchanged. The target is taken verbatim, without
/// percent-decoding.
pub fn unwrap_search_redirect(candidate: &str) -> String {
    if !candidate.starts_with(REDIRECT_PREFIX) {
        return candidate.to_owned();
    }
    REDIRECT_RE
        .as_ref()
        .and_then(|re| re.captures(candidate))
        .and_then(|caps| caps.get(1))
        .map_or_else(|| candidate.to_owned(), |m| m.as_str().to_owned())
}

/// First result, in engine order, with a non-empty URL that is not
/// denylisted. Redirect wrappers are unwrapped after selection.
pub fn select_candidate_domain(results: &[SearchResult], denylist: &[String]) -> Option<String> {
    results
        .iter()
        .map(|r| r.url.trim())
        .filter(|url| !url.is_empty())
        .find(|url| {
            let skip = is_denylisted(url, denylist);
            if skip {
                tracing::trace!(url, "skipping denylisted company result");
            }
            !skip
        })
        .map(unwrap_search_redirect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HeuristicsConfig;
    use enrich_web::SearchEngine;

    fn bing(url: &str) -> SearchResult {
        SearchResult {
            url: url.to_owned(),
            title: None,
            snippet: None,
            source: SearchEngine::Bing,
            result_type: None,
        }
    }

    fn denylist() -> Vec<String> {
        HeuristicsConfig::default().domain_denylist
    }

    #[test]
    fn first_non_denylisted_wins() {
        let results = vec![
            bing("https://www.linkedin.com/company/acme"),
            bing("https://www.Glassdoor.com/Overview/acme"),
            bing("https://www.acme.com/"),
            bing("https://acme-partners.com/"),
        ];
        assert_eq!(
            select_candidate_domain(&results, &denylist()).as_deref(),
            Some("https://www.acme.com/")
        );
    }

    #[test]
    fn only_denylisted_yields_none() {
        let results = vec![
            bing("https://www.crunchbase.com/organization/acme"),
            bing("https://www.indeed.com/cmp/Acme"),
            bing("https://www.yellowpages.com/acme"),
            bing("https://LINKEDIN.COM/company/acme"),
        ];
        assert!(select_candidate_domain(&results, &denylist()).is_none());
    }

    #[test]
    fn empty_urls_are_skipped() {
        let results = vec![bing("  "), bing("https://acme.com")];
        assert_eq!(
            select_candidate_domain(&results, &denylist()).as_deref(),
            Some("https://acme.com")
        );
    }

    #[test]
    fn wrapped_candidate_is_unwrapped() {
        let results = vec![bing("/url?q=https://acme.com/about&sa=U&ved=0")];
        assert_eq!(
            select_candidate_domain(&results, &denylist()).as_deref(),
            Some("https://acme.com/about")
        );
    }

    #[test]
    fn wrapper_without_http_target_is_kept() {
        assert_eq!(unwrap_search_redirect("/url?q=ftp://x&sa=U"), "/url?q=ftp://x&sa=U");
        assert_eq!(unwrap_search_redirect("https://acme.com"), "https://acme.com");
    }

    #[test]
    fn empty_denylist_accepts_first() {
        let results = vec![bing("https://linkedin.com/company/acme")];
        assert_eq!(
            select_candidate_domain(&results, &[]).as_deref(),
            Some("https://linkedin.com/company/acme")
        );
    }
}
