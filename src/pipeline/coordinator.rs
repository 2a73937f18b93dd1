//! Enrichment orchestrator that runs every lookup for one request.
//!
//! Steps run strictly one after another: company search, candidate
//! selection, site fetch, profile search, then profile extraction. Each
//! browser-driven step finishes (including teardown) before the next
//! starts. No step can fail the enrichment; a failed step only leaves its
//! part of the result empty or marked.

use std::sync::Arc;
use std::time::{Duration, Instant};

use enrich_web::{
    fetch_company_info, resolve_domain, ChromeRenderer, CompanyInfo, HttpFetch, PageRenderer,
    ProfileExtractor, ProfileInfo, ReqwestFetcher, SearchClient, SearchResult,
};
use tracing::{debug, info};

use crate::config::{EnrichConfig, HeuristicsConfig};
use crate::error::Result;
use crate::pipeline::candidate::select_candidate_domain;
use crate::pipeline::query::build_profile_query;
use crate::types::{EnrichmentMeta, EnrichmentRequest, EnrichmentResult, ProfileSearch};

/// Runs the enrichment pipeline against a renderer and a fetcher.
///
/// Holds no per-request state, so one instance can serve concurrent
/// requests behind an [`Arc`].
pub struct Enricher<R, F> {
    search: SearchClient<R>,
    profiles: ProfileExtractor<R>,
    fetcher: F,
    fetch_timeout: Duration,
    profile_marker: String,
    heuristics: HeuristicsConfig,
}

impl Enricher<ChromeRenderer, ReqwestFetcher> {
    /// Build the production pipeline: headless Chromium for search and
    /// profile pages, `reqwest` for company sites.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &EnrichConfig) -> Result<Self> {
        let renderer = Arc::new(ChromeRenderer::new(config.web.browser.clone()));
        Self::new(renderer, ReqwestFetcher::new()?, config)
    }
}

impl<R: PageRenderer, F: HttpFetch> Enricher<R, F> {
    /// Build a pipeline over the given capabilities.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation or an engine's
    /// selectors fail to compile.
    pub fn new(renderer: Arc<R>, fetcher: F, config: &EnrichConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            search: SearchClient::new(Arc::clone(&renderer), &config.web)?,
            profiles: ProfileExtractor::new(renderer, &config.web),
            fetcher,
            fetch_timeout: config.web.fetch_timeout(),
            profile_marker: config.web.profile_path_marker.clone(),
            heuristics: config.heuristics.clone(),
        })
    }

    /// Enrich one contact record.
    pub async fn enrich(&self, request: &EnrichmentRequest) -> EnrichmentResult {
        let started = Instant::now();

        let (company_search_results, company_info) = match request.trimmed_company() {
            Some(company) => self.find_company(company).await,
            None => (Vec::new(), CompanyInfo::Empty {}),
        };

        let name = request.trimmed_name();
        let (linkedin_candidates, linkedin_profiles) = if name.is_empty() {
            (Vec::new(), Vec::new())
        } else {
            let search = self.search_profiles(name, request.trimmed_company()).await;
            let profiles = self.extract_profiles(&search.results).await;
            (search.results, profiles)
        };

        let meta = EnrichmentMeta {
            elapsed_seconds: started.elapsed().as_secs_f64(),
            linkedin_profiles_found: linkedin_profiles.len(),
            total_results: linkedin_candidates.len(),
        };
        info!(
            elapsed_seconds = meta.elapsed_seconds,
            company_results = company_search_results.len(),
            company_site = company_info.url().unwrap_or(""),
            profiles = meta.linkedin_profiles_found,
            candidates = meta.total_results,
            "enrichment finished"
        );

        EnrichmentResult {
            input: request.clone(),
            company_search_results,
            company_info,
            linkedin_candidates,
            linkedin_profiles,
            meta,
        }
    }

    /// Search for the company and fetch the first acceptable site.
    async fn find_company(&self, company: &str) -> (Vec<SearchResult>, CompanyInfo) {
        let h = &self.heuristics;
        let results = self
            .search
            .search(company, h.company_engine, h.company_max_results)
            .await;

        let info = match select_candidate_domain(&results, &h.domain_denylist) {
            Some(candidate) => {
                let host = resolve_domain(&candidate);
                debug!(%candidate, %host, "company candidate selected");
                fetch_company_info(&self.fetcher, &host, self.fetch_timeout).await
            }
            None => {
                debug!(results = results.len(), "no company candidate outside the denylist");
                CompanyInfo::Empty {}
            }
        };
        (results, info)
    }

    /// The profile query for `name` and `company`.
    pub fn profile_query(&self, name: &str, company: Option<&str>) -> String {
        build_profile_query(name, company, &self.heuristics.profile_site)
    }

    /// Run only the profile search for `name` and `company`.
    pub async fn search_profiles(&self, name: &str, company: Option<&str>) -> ProfileSearch {
        let query = self.profile_query(name, company);
        let h = &self.heuristics;
        let results = self
            .search
            .search(&query, h.profile_engine, h.profile_max_results)
            .await;
        ProfileSearch {
            count: results.len(),
            query,
            results,
        }
    }

    /// Extract the leading profile-type results one at a time.
    ///
    /// Tagged results are re-checked against the profile path marker.
    async fn extract_profiles(&self, candidates: &[SearchResult]) -> Vec<ProfileInfo> {
        let urls: Vec<&str> = candidates
            .iter()
            .filter(|c| c.is_profile())
            .map(|c| c.url.as_str())
            .filter(|url| !url.is_empty() && url.contains(&self.profile_marker))
            .take(self.heuristics.max_profile_extractions)
            .collect();

        let mut profiles = Vec::with_capacity(urls.len());
        for url in urls {
            profiles.push(self.profiles.extract_profile(url).await);
        }
        profiles
    }
}
