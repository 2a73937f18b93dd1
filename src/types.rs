//! Request and result shapes of the enrichment pipeline.

use enrich_web::{CompanyInfo, ProfileInfo, SearchResult};
use serde::{Deserialize, Serialize};

/// A partially-structured contact record, typically from a scanned card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentRequest {
    /// Person's name. Required; surrounding whitespace is ignored.
    pub name: String,
    /// Company name as printed.
    #[serde(default)]
    pub company: Option<String>,
    /// Email address as printed.
    #[serde(default)]
    pub email: Option<String>,
    /// Phone number as printed.
    #[serde(default)]
    pub phone: Option<String>,
    /// Raw OCR text of the card.
    #[serde(default)]
    pub raw_text: Option<String>,
}

impl EnrichmentRequest {
    /// A request with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the company.
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Trimmed name; empty when the name is blank.
    pub fn trimmed_name(&self) -> &str {
        self.name.trim()
    }

    /// Trimmed company, or `None` when absent or blank.
    pub fn trimmed_company(&self) -> Option<&str> {
        self.company
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Timing and counts for one enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentMeta {
    /// Wall-clock time from the first lookup to assembly.
    pub elapsed_seconds: f64,
    /// Number of entries in `linkedin_profiles`.
    pub linkedin_profiles_found: usize,
    /// Number of entries in `linkedin_candidates`.
    pub total_results: usize,
}

/// Everything found for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    /// The request as received.
    pub input: EnrichmentRequest,
    /// Company-name search results, in engine order.
    pub company_search_results: Vec<SearchResult>,
    /// Company home-page details, failure marker, or `{}`.
    pub company_info: CompanyInfo,
    /// Profile search results, in engine order.
    pub linkedin_candidates: Vec<SearchResult>,
    /// Extraction outcomes for the leading candidates.
    pub linkedin_profiles: Vec<ProfileInfo>,
    /// Timing and counts.
    pub meta: EnrichmentMeta,
}

/// Outcome of a profile search run on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSearch {
    /// The query sent to the engine.
    pub query: String,
    /// Results in engine order.
    pub results: Vec<SearchResult>,
    /// Number of entries in `results`.
    pub count: usize,
}
