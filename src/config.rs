//! Configuration for the enrichment service.
//!
//! Loaded from a TOML file; every section and field falls back to its
//! default, so an empty file is a valid configuration.

use enrich_web::{SearchEngine, WebConfig};
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichConfig {
    /// HTTP API bind address.
    pub server: ServerConfig,
    /// Timeouts, headers, browser launch and selector lists.
    pub web: WebConfig,
    /// Query shapes, caps and candidate filters.
    pub heuristics: HeuristicsConfig,
}

/// HTTP API bind address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind (`0` picks a free port).
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 8000,
        }
    }
}

/// Decision rules of the enrichment pipeline.
///
/// The denylist and site restriction are tied to how third-party sites
/// look today, so they live here rather than in code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicsConfig {
    /// Engine used to look up the company name.
    pub company_engine: SearchEngine,
    /// Result blocks scanned for the company lookup.
    pub company_max_results: usize,
    /// Engine used to look up the person's profile.
    pub profile_engine: SearchEngine,
    /// Result blocks scanned for the profile lookup.
    pub profile_max_results: usize,
    /// Profiles loaded per request, in result order.
    pub max_profile_extractions: usize,
    /// `site:` restriction prefixed to profile queries. Empty disables it.
    pub profile_site: String,
    /// Substrings marking aggregator or directory URLs that are never
    /// taken as the company's own site. Matched case-insensitively.
    pub domain_denylist: Vec<String>,
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self {
            company_engine: SearchEngine::Bing,
            company_max_results: 6,
            profile_engine: SearchEngine::Google,
            profile_max_results: 3,
            max_profile_extractions: 2,
            profile_site: "linkedin.com/in".to_owned(),
            domain_denylist: [
                "linkedin.com",
                "glassdoor.com",
                "crunchbase.com",
                "yellowpages",
                "indeed.com",
            ]
            .iter()
            .map(|s| (*s).to_owned())
            .collect(),
        }
    }
}

impl EnrichConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::error::EnrichError::Config(e.to_string()))
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - every `web` constraint (see [`WebConfig::validate`])
    /// - result caps and the extraction cap must be greater than 0
    pub fn validate(&self) -> crate::error::Result<()> {
        self.web.validate()?;
        let h = &self.heuristics;
        if h.company_max_results == 0 {
            return Err(crate::error::EnrichError::Config(
                "company_max_results must be greater than 0".into(),
            ));
        }
        if h.profile_max_results == 0 {
            return Err(crate::error::EnrichError::Config(
                "profile_max_results must be greater than 0".into(),
            ));
        }
        if h.max_profile_extractions == 0 {
            return Err(crate::error::EnrichError::Config(
                "max_profile_extractions must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
