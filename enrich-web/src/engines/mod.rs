//! Search engine implementations.
//!
//! Each module provides a struct implementing [`crate::engine::SearchEngineTrait`]
//! that reads a specific engine's rendered results page.

pub mod bing;
pub mod google;

pub use bing::BingEngine;
pub use google::GoogleEngine;
