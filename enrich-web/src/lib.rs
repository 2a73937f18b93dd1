//! # enrich-web
//!
//! Best-effort web lookups used to enrich a contact record.
//!
//! ## Components
//!
//! - [`domain::resolve_domain`]: reduce a URL-like string to a bare host
//! - [`site::fetch_company_info`]: fetch a company home page (https, then
//!   http) and scrape title, description and contact emails
//! - [`search::SearchClient`]: render Bing or Google results in a headless
//!   browser and parse them in page order
//! - [`profile::ProfileExtractor`]: load a public profile page and read its
//!   name, headline and location
//!
//! ## Failure model
//!
//! None of the component entry points return errors. Transport failures,
//! missing markup and browser errors shrink the result (an empty list, an
//! absent field, or an explicit error marker) instead of aborting it.
//! [`WebError`] only travels across the capability seams
//! ([`render::PageRenderer`], [`http::HttpFetch`]).
//!
//! ## Isolation
//!
//! [`render::ChromeRenderer`] starts a fresh browser for every render and
//! closes it before returning. Sessions are never pooled.

pub mod config;
pub mod domain;
pub mod engine;
pub mod engines;
pub mod error;
pub mod http;
pub mod probe;
pub mod profile;
pub mod render;
pub mod search;
pub mod site;
pub mod types;

pub use config::{BrowserSettings, SelectorConfig, WebConfig};
pub use domain::resolve_domain;
pub use engine::SearchEngineTrait;
pub use error::{Result, WebError};
pub use http::{FetchedPage, HttpFetch, ReqwestFetcher};
pub use profile::ProfileExtractor;
pub use render::{ChromeRenderer, PageRenderer, RenderRequest, RenderedPage};
pub use search::SearchClient;
pub use site::fetch_company_info;
pub use types::{
    CompanyInfo, ProfileDetails, ProfileInfo, ResultType, SearchEngine, SearchResult, SiteDetails,
};
