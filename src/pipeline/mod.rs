//! The enrichment pipeline: candidate selection, query construction and
//! the orchestrator that sequences every lookup.

pub mod candidate;
pub mod coordinator;
pub mod query;

pub use candidate::{is_denylisted, select_candidate_domain, unwrap_search_redirect};
pub use coordinator::Enricher;
pub use query::build_profile_query;
