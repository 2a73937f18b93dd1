//! Profile extractor: load a public profile page and read its header card.
//!
//! Profile pages serve reduced markup to non-desktop agents and fill in
//! their content after the initial load, so pages are loaded with a
//! desktop user agent and a post-navigation settle wait.

use scraper::Html;
use std::sync::Arc;
use std::time::Duration;

use crate::config::WebConfig;
use crate::probe::SelectorChain;
use crate::render::{PageRenderer, RenderRequest};
use crate::types::{ProfileDetails, ProfileInfo};

/// Field selectors for a profile page.
#[derive(Debug, Clone)]
pub struct ProfileSelectors {
    name: SelectorChain,
    headline: SelectorChain,
    location: SelectorChain,
}

impl ProfileSelectors {
    /// Compile the selector lists from `config`.
    pub fn from_config(config: &WebConfig) -> Self {
        let s = &config.selectors;
        Self {
            name: SelectorChain::new(&s.profile_name),
            headline: SelectorChain::new(&s.profile_headline),
            location: SelectorChain::new(&s.profile_location),
        }
    }

    /// Read every field from `html`. Each field is independent: a missing
    /// name does not prevent reading the headline or location.
    pub fn parse(&self, url: &str, html: &str) -> ProfileDetails {
        let document = Html::parse_document(html);
        let root = document.root_element();
        ProfileDetails {
            url: url.to_owned(),
            name: self.name.first_text(root),
            title: self.headline.first_text(root),
            location: self.location.first_text(root),
            ..Default::default()
        }
    }
}

/// Loads profile pages through a [`PageRenderer`].
pub struct ProfileExtractor<R> {
    renderer: Arc<R>,
    selectors: ProfileSelectors,
    user_agent: String,
    navigation_timeout: Duration,
    idle_timeout: Duration,
}

impl<R: PageRenderer> ProfileExtractor<R> {
    /// Build an extractor sharing `renderer`.
    pub fn new(renderer: Arc<R>, config: &WebConfig) -> Self {
        Self {
            renderer,
            selectors: ProfileSelectors::from_config(config),
            user_agent: config.profile_user_agent.clone(),
            navigation_timeout: config.navigation_timeout(),
            idle_timeout: config.idle_timeout(),
        }
    }

    /// Load `url` and extract name, headline and location.
    ///
    /// Never fails: a page that cannot be loaded becomes
    /// [`ProfileInfo::Failed`] carrying `url` and the cause.
    pub async fn extract_profile(&self, url: &str) -> ProfileInfo {
        let request = RenderRequest::new(url, self.navigation_timeout)
            .with_user_agent(self.user_agent.as_str())
            .with_idle_wait(self.idle_timeout);

        match self.renderer.render(&request).await {
            Ok(page) => {
                let details = self.selectors.parse(url, &page.html);
                tracing::debug!(
                    url,
                    has_name = details.name.is_some(),
                    has_title = details.title.is_some(),
                    has_location = details.location.is_some(),
                    "profile extracted"
                );
                ProfileInfo::Extracted(details)
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "profile extraction failed");
                ProfileInfo::Failed {
                    url: url.to_owned(),
                    error: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WebError;
    use crate::render::RenderedPage;
    use std::sync::Mutex;

    const PROFILE_HTML: &str = r#"<html><body><main>
  <section class="top-card">
    <h1 class="text-heading-xlarge inline t-24">  Jane Public </h1>
    <div class="text-body-medium break-words">Head of Rockets at Acme Corp</div>
    <span class="text-body-small inline t-black--light break-words">
      Phoenix, Arizona, United States
    </span>
  </section>
</main></body></html>"#;

    struct OneShot {
        outcome: Result<&'static str, &'static str>,
        seen: Mutex<Option<RenderRequest>>,
    }

    impl PageRenderer for OneShot {
        async fn render(&self, request: &RenderRequest) -> Result<RenderedPage, WebError> {
            *self.seen.lock().expect("lock") = Some(request.clone());
            self.outcome
                .map(|html| RenderedPage {
                    url: request.url.clone(),
                    html: html.to_owned(),
                })
                .map_err(|e| WebError::Render(e.to_owned()))
        }
    }

    fn extractor(
        outcome: Result<&'static str, &'static str>,
    ) -> (ProfileExtractor<OneShot>, Arc<OneShot>) {
        let renderer = Arc::new(OneShot {
            outcome,
            seen: Mutex::new(None),
        });
        (
            ProfileExtractor::new(Arc::clone(&renderer), &WebConfig::default()),
            renderer,
        )
    }

    #[test]
    fn parse_reads_all_fields() {
        let selectors = ProfileSelectors::from_config(&WebConfig::default());
        let details = selectors.parse("https://linkedin.com/in/jane", PROFILE_HTML);
        assert_eq!(details.name.as_deref(), Some("Jane Public"));
        assert_eq!(details.title.as_deref(), Some("Head of Rockets at Acme Corp"));
        assert_eq!(
            details.location.as_deref(),
            Some("Phoenix, Arizona, United States")
        );
        assert!(details.company.is_none());
        assert!(details.summary.is_none());
    }

    #[test]
    fn fields_are_independent() {
        let html = r#"<div class="text-body-medium break-words">Headline only</div>"#;
        let selectors = ProfileSelectors::from_config(&WebConfig::default());
        let details = selectors.parse("https://linkedin.com/in/x", html);
        assert!(details.name.is_none());
        assert_eq!(details.title.as_deref(), Some("Headline only"));
        assert!(details.location.is_none());
    }

    #[tokio::test]
    async fn uses_desktop_agent_and_idle_wait() {
        let (extractor, renderer) = extractor(Ok(PROFILE_HTML));
        let info = extractor.extract_profile("https://linkedin.com/in/jane").await;
        assert!(!info.is_failed());

        let seen = renderer.seen.lock().expect("lock").clone().expect("rendered");
        assert!(seen
            .user_agent
            .as_deref()
            .is_some_and(|ua| ua.contains("Windows NT 10.0")));
        assert_eq!(seen.navigation_timeout, Duration::from_secs(15));
        assert_eq!(seen.idle_timeout, Some(Duration::from_secs(10)));
    }

    #[tokio::test]
    async fn render_error_becomes_marker_with_url() {
        let (extractor, _) = extractor(Err("net::ERR_NAME_NOT_RESOLVED"));
        let info = extractor.extract_profile("https://linkedin.com/in/ghost").await;
        match info {
            ProfileInfo::Failed { url, error } => {
                assert_eq!(url, "https://linkedin.com/in/ghost");
                assert!(error.contains("ERR_NAME_NOT_RESOLVED"));
            }
            other => panic!("expected failure marker, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn blank_page_is_extracted_with_no_fields() {
        let (extractor, _) = extractor(Ok("<html><body>authwall</body></html>"));
        match extractor.extract_profile("https://linkedin.com/in/jane").await {
            ProfileInfo::Extracted(details) => {
                assert_eq!(details.url, "https://linkedin.com/in/jane");
                assert!(details.name.is_none());
            }
            other => panic!("expected extraction, got {other:?}"),
        }
    }
}
