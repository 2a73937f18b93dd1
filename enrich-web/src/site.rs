//! Company-site fetcher: title, description and contact emails.
//!
//! Given a bare host, tries the secure scheme then the insecure one, and
//! scrapes the first variant that answers `200 OK`.

use regex::Regex;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use std::sync::LazyLock;
use std::time::Duration;

use crate::http::HttpFetch;
use crate::types::{CompanyInfo, SiteDetails};

/// Scheme variants tried for each host, in order.
const SCHEMES: &[&str] = &["https", "http"];

static EMAIL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
        .map_err(|e| tracing::error!(error = %e, "email pattern failed to compile"))
        .ok()
});

/// Candidate URLs for `host`, secure first.
pub fn scheme_variants(host: &str) -> Vec<String> {
    SCHEMES
        .iter()
        .map(|scheme| format!("{scheme}://{host}"))
        .collect()
}

/// Fetch and scrape a company's home page.
///
/// - An empty `host` returns [`CompanyInfo::Empty`] without any request.
/// - Each scheme variant is fetched with `timeout`; non-200 statuses and
///   transport errors move on to the next variant.
/// - The first 200 response is parsed and returned immediately.
/// - If no variant answers 200, returns [`CompanyInfo::unreachable`].
pub async fn fetch_company_info<F: HttpFetch>(
    fetcher: &F,
    host: &str,
    timeout: Duration,
) -> CompanyInfo {
    if host.is_empty() {
        return CompanyInfo::Empty {};
    }

    for url in scheme_variants(host) {
        match fetcher.get(&url, timeout).await {
            Ok(page) if page.status == 200 => {
                tracing::debug!(%url, bytes = page.body.len(), "company site responded");
                return CompanyInfo::Found(parse_site(&url, page.status, &page.body));
            }
            Ok(page) => {
                tracing::debug!(%url, status = page.status, "company site returned non-200");
            }
            Err(e) => {
                tracing::debug!(%url, error = %e, "company site fetch failed");
            }
        }
    }

    tracing::info!(host, "no scheme variant of company site answered 200");
    CompanyInfo::unreachable()
}

/// Extract title, meta description and emails from a page body.
pub fn parse_site(url: &str, status: u16, body: &str) -> SiteDetails {
    let document = Html::parse_document(body);
    SiteDetails {
        url: url.to_owned(),
        status,
        title: extract_title(&document),
        description: extract_description(&document),
        emails: extract_emails(body),
    }
}

/// `<title>` text with only the ends trimmed. Present but empty is `Some("")`.
fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_owned())
}

/// `meta[name=description]` first, then `meta[property=og:description]`.
///
/// The first tag present decides, even when its `content` is missing.
fn extract_description(document: &Html) -> Option<String> {
    ["meta[name=\"description\"]", "meta[property=\"og:description\"]"]
        .iter()
        .filter_map(|source| Selector::parse(source).ok())
        .find_map(|selector| document.select(&selector).next())
        .and_then(|meta| meta.value().attr("content"))
        .map(str::to_owned)
}

/// Every email-looking token in `body`, deduplicated.
pub fn extract_emails(body: &str) -> BTreeSet<String> {
    let Some(re) = EMAIL_RE.as_ref() else {
        return BTreeSet::new();
    };
    re.find_iter(body).map(|m| m.as_str().to_owned()).collect()
}
