//! Core types for search results, company sites and profiles.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A single search result, in the order the engine ranked it on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Target URL of the result (redirect wrappers already unwrapped).
    pub url: String,
    /// Heading text of the result block.
    pub title: Option<String>,
    /// Snippet text under the heading.
    pub snippet: Option<String>,
    /// Which engine produced this result.
    pub source: SearchEngine,
    /// Classification tag, set when the result is known to be a profile page.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub result_type: Option<ResultType>,
}

impl SearchResult {
    /// Returns `true` when the result was tagged as a professional profile.
    pub fn is_profile(&self) -> bool {
        self.result_type == Some(ResultType::LinkedinProfile)
    }
}

/// Classification tags attached to search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    /// A public professional-network profile page.
    LinkedinProfile,
}

/// Supported search engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchEngine {
    /// Bing: used for company-name lookups. Results are not filtered.
    Bing,
    /// Google: used for profile lookups. Only profile URLs are kept.
    Google,
}

impl SearchEngine {
    /// Returns the lower-case engine name used in payloads and config.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bing => "bing",
            Self::Google => "google",
        }
    }
}

impl fmt::Display for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Metadata scraped from the first company-site variant that answered 200.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteDetails {
    /// The scheme variant that succeeded, e.g. `https://acme.com`.
    pub url: String,
    /// HTTP status of the successful response (always 200).
    pub status: u16,
    /// Trimmed `<title>` text.
    pub title: Option<String>,
    /// Meta description (`name=description`, else `og:description`).
    pub description: Option<String>,
    /// Email addresses found anywhere in the response body.
    pub emails: BTreeSet<String>,
}

/// Outcome of a company-site fetch.
///
/// Serialises untagged: `Found` as the details object, `Unreachable` as
/// `{"error": ...}` and `Empty` as `{}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompanyInfo {
    /// A scheme variant responded with 200 and was parsed.
    Found(SiteDetails),
    /// Every scheme variant failed or answered with a non-200 status.
    Unreachable {
        /// Human-readable failure marker.
        error: String,
    },
    /// No lookup was attempted (no company, no candidate, or empty host).
    Empty {},
}

impl CompanyInfo {
    /// Marker text used when no scheme variant answered with 200.
    pub const UNREACHABLE: &'static str = "could not fetch site or non-200 responses";

    /// Builds the standard unreachable marker.
    pub fn unreachable() -> Self {
        Self::Unreachable {
            error: Self::UNREACHABLE.to_owned(),
        }
    }

    /// The URL of the successful fetch, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Found(details) => Some(&details.url),
            _ => None,
        }
    }

    /// Returns `true` when no lookup was attempted.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty {})
    }
}

impl Default for CompanyInfo {
    fn default() -> Self {
        Self::Empty {}
    }
}

/// Fields extracted from a profile page. Any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDetails {
    /// The profile URL that was loaded.
    pub url: String,
    /// Display name heading.
    pub name: Option<String>,
    /// Headline line under the name.
    pub title: Option<String>,
    /// Location line.
    pub location: Option<String>,
    /// Current company.
    pub company: Option<String>,
    /// Connection count text.
    pub connections: Option<String>,
    /// About / summary section.
    pub summary: Option<String>,
}

/// Outcome of a profile extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileInfo {
    /// The page could not be loaded; the originating URL is preserved.
    Failed {
        /// The profile URL that was attempted.
        url: String,
        /// Why extraction failed.
        error: String,
    },
    /// The page loaded; fields that could not be found are `None`.
    Extracted(ProfileDetails),
}

impl ProfileInfo {
    /// The profile URL, for both outcomes.
    pub fn url(&self) -> &str {
        match self {
            Self::Failed { url, .. } => url,
            Self::Extracted(details) => &details.url,
        }
    }

    /// Returns `true` for the error marker.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_result(url: &str) -> SearchResult {
        SearchResult {
            url: url.into(),
            title: Some("Jane Public - Acme | LinkedIn".into()),
            snippet: None,
            source: SearchEngine::Google,
            result_type: Some(ResultType::LinkedinProfile),
        }
    }

    #[test]
    fn search_result_serialises_type_tag() {
        let json = serde_json::to_value(profile_result("https://linkedin.com/in/jane"))
            .expect("serialize");
        assert_eq!(json["type"], "linkedin_profile");
        assert_eq!(json["source"], "google");
    }

    #[test]
    fn untagged_result_omits_type() {
        let result = SearchResult {
            url: "https://acme.com".into(),
            title: None,
            snippet: None,
            source: SearchEngine::Bing,
            result_type: None,
        };
        let json = serde_json::to_value(&result).expect("serialize");
        assert!(json.get("type").is_none());
        assert!(!result.is_profile());
    }

    #[test]
    fn search_engine_display_matches_serde() {
        for engine in [SearchEngine::Bing, SearchEngine::Google] {
            let json = serde_json::to_value(engine).expect("serialize");
            assert_eq!(json, engine.to_string());
        }
        let parsed: Result<SearchEngine, _> = serde_json::from_str(r#""altavista""#);
        assert!(parsed.is_err());
    }

    #[test]
    fn company_info_shapes() {
        assert_eq!(
            serde_json::to_string(&CompanyInfo::default()).expect("serialize"),
            "{}"
        );

        let unreachable = serde_json::to_value(CompanyInfo::unreachable()).expect("serialize");
        assert_eq!(unreachable["error"], CompanyInfo::UNREACHABLE);

        let found = CompanyInfo::Found(SiteDetails {
            url: "https://acme.com".into(),
            status: 200,
            title: Some("Acme".into()),
            description: None,
            emails: BTreeSet::from(["info@acme.com".to_owned()]),
        });
        let json = serde_json::to_value(&found).expect("serialize");
        assert_eq!(json["url"], "https://acme.com");
        assert_eq!(json["emails"][0], "info@acme.com");
        assert_eq!(found.url(), Some("https://acme.com"));
    }

    #[test]
    fn company_info_deserialises_each_variant() {
        let empty: CompanyInfo = serde_json::from_str("{}").expect("deserialize");
        assert!(empty.is_empty());

        let failed: CompanyInfo =
            serde_json::from_str(r#"{"error":"boom"}"#).expect("deserialize");
        assert_eq!(failed, CompanyInfo::Unreachable { error: "boom".into() });
    }

    #[test]
    fn profile_failure_keeps_url() {
        let failed = ProfileInfo::Failed {
            url: "https://linkedin.com/in/jane".into(),
            error: "timed out".into(),
        };
        assert!(failed.is_failed());
        assert_eq!(failed.url(), "https://linkedin.com/in/jane");

        let json = serde_json::to_string(&failed).expect("serialize");
        let decoded: ProfileInfo = serde_json::from_str(&json).expect("deserialize");
        assert!(decoded.is_failed());
    }
}
