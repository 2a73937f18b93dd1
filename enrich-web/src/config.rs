//! Web capability configuration with sensible defaults.
//!
//! [`WebConfig`] controls timeouts, request headers, the headless browser
//! launch and the selector lists used to probe third-party markup. Selector
//! lists are plain data: when a site changes its layout, only these lists
//! need updating.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::WebError;

/// Desktop Chrome user agent sent when loading profile pages.
pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Configuration shared by the search, site and profile components.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Page-load timeout for search and profile navigation.
    pub navigation_timeout_seconds: u64,
    /// How long to wait for a profile page to settle after navigation.
    pub idle_timeout_seconds: u64,
    /// Per-request timeout for company-site fetches.
    pub fetch_timeout_seconds: u64,
    /// `Accept-Language` header sent with search pages.
    pub accept_language: String,
    /// User agent used for profile pages.
    pub profile_user_agent: String,
    /// Substring that marks a URL as a profile page.
    pub profile_path_marker: String,
    /// Headless browser launch settings.
    pub browser: BrowserSettings,
    /// Ordered fallback selectors for layout-dependent fields.
    pub selectors: SelectorConfig,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            navigation_timeout_seconds: 15,
            idle_timeout_seconds: 10,
            fetch_timeout_seconds: 8,
            accept_language: "en-US,en;q=0.9".to_owned(),
            profile_user_agent: DESKTOP_USER_AGENT.to_owned(),
            profile_path_marker: "linkedin.com/in/".to_owned(),
            browser: BrowserSettings::default(),
            selectors: SelectorConfig::default(),
        }
    }
}

impl WebConfig {
    /// Navigation timeout as a [`Duration`].
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_seconds)
    }

    /// Idle-wait timeout as a [`Duration`].
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_seconds)
    }

    /// Site fetch timeout as a [`Duration`].
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - every timeout must be greater than 0
    /// - `profile_path_marker` must not be empty
    /// - each profile field must have at least one selector
    pub fn validate(&self) -> Result<(), WebError> {
        if self.navigation_timeout_seconds == 0 {
            return Err(WebError::Config(
                "navigation_timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.idle_timeout_seconds == 0 {
            return Err(WebError::Config(
                "idle_timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.fetch_timeout_seconds == 0 {
            return Err(WebError::Config(
                "fetch_timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.profile_path_marker.trim().is_empty() {
            return Err(WebError::Config(
                "profile_path_marker must not be empty".into(),
            ));
        }
        let s = &self.selectors;
        if s.profile_name.is_empty() || s.profile_headline.is_empty() || s.profile_location.is_empty()
        {
            return Err(WebError::Config(
                "profile selector lists must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// How the headless browser is launched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Explicit Chrome/Chromium binary. `None` lets the driver locate one.
    pub executable: Option<PathBuf>,
    /// Run without a window.
    pub headless: bool,
    /// Pass `--no-sandbox` (needed when running as root in containers).
    pub no_sandbox: bool,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            executable: None,
            headless: true,
            no_sandbox: false,
        }
    }
}

/// Ordered selector lists. The first selector that matches wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Snippet containers inside a Google result block.
    pub google_snippet: Vec<String>,
    /// Display-name heading on a profile page.
    pub profile_name: Vec<String>,
    /// Headline line on a profile page.
    pub profile_headline: Vec<String>,
    /// Location line on a profile page.
    pub profile_location: Vec<String>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            google_snippet: to_owned_list(&["span.aCOpRe", "div.IsZvec", "div.VwiC3b", "span.st"]),
            profile_name: to_owned_list(&["h1.text-heading-xlarge"]),
            profile_headline: to_owned_list(&[".text-body-medium.break-words"]),
            profile_location: to_owned_list(&[".text-body-small.inline.t-black--light.break-words"]),
        }
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}
