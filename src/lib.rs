//! Card enrichment: best-effort lookups that fill in a scanned contact
//! record.
//!
//! Given a name and optionally a company, the pipeline:
//!
//! 1. searches the company name and picks the first result that is not an
//!    aggregator or directory site,
//! 2. fetches that site's home page for title, description and emails,
//! 3. searches public profiles for the person,
//! 4. loads the leading profile pages and reads name, headline and
//!    location.
//!
//! # Architecture
//!
//! - [`pipeline::Enricher`] sequences the steps and assembles an
//!   [`EnrichmentResult`]
//! - [`server`] exposes the pipeline over HTTP with `axum`
//! - the web lookups themselves live in the `enrich-web` crate
//!
//! No step can fail an enrichment. Each one degrades to an empty list, an
//! absent field, or an explicit error marker.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod server;
pub mod types;

pub use config::{EnrichConfig, HeuristicsConfig, ServerConfig};
pub use error::{EnrichError, Result};
pub use pipeline::Enricher;
pub use server::EnrichServer;
pub use types::{EnrichmentMeta, EnrichmentRequest, EnrichmentResult, ProfileSearch};
