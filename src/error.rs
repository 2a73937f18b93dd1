//! Error types for the enrichment service.
//!
//! The pipeline itself is infallible; these errors cover configuration,
//! server startup and enrichment tasks that did not run to completion.

/// Top-level error type for the enrichment service.
#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from a web capability while building the pipeline.
    #[error("web error: {0}")]
    Web(#[from] enrich_web::WebError),

    /// HTTP server bind or serve error.
    #[error("server error: {0}")]
    Server(String),

    /// An enrichment task did not complete.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, EnrichError>;
