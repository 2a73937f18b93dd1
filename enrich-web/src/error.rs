//! Error types for the enrich-web crate.
//!
//! These errors travel across the capability seams (rendering, fetching).
//! Component entry points convert them into explicit outcome types, so a
//! caller of the search, site or profile functions never receives one.

/// Errors raised by the web capabilities.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// An HTTP request failed at the transport level or returned an
    /// unusable status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A bounded wait (navigation, fetch) expired.
    #[error("timed out: {0}")]
    Timeout(String),

    /// Markup or a selector could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// The headless browser failed to launch, navigate or snapshot a page.
    #[error("render error: {0}")]
    Render(String),

    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for enrich-web results.
pub type Result<T> = std::result::Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_http() {
        let err = WebError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_timeout() {
        let err = WebError::Timeout("navigation exceeded 15s".into());
        assert_eq!(err.to_string(), "timed out: navigation exceeded 15s");
    }

    #[test]
    fn display_render() {
        let err = WebError::Render("browser exited early".into());
        assert_eq!(err.to_string(), "render error: browser exited early");
    }

    #[test]
    fn display_config() {
        let err = WebError::Config("fetch_timeout_seconds must be > 0".into());
        assert_eq!(
            err.to_string(),
            "config error: fetch_timeout_seconds must be > 0"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WebError>();
    }
}
