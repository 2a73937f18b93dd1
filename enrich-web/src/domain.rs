//! Host-name resolution for URL-like strings.
//!
//! Search results and user input arrive as full URLs, scheme-less host
//! names, or garbage. [`resolve_domain`] reduces each to the network
//! location used by the site fetcher, without ever failing.

use url::Url;

/// Scheme prepended when the input has no network location of its own.
const DEFAULT_SCHEME: &str = "https://";

/// Reduce a URL-like string to its network location.
///
/// 1. If `input` parses as a URL with a host, its authority is returned
///    exactly as written (case, port and userinfo included).
/// 2. Otherwise `https://` is prepended and the result is parsed again.
/// 3. If neither parse yields a host, `input` is returned unchanged, so
///    callers must tolerate a non-host string flowing downstream.
///
/// Resolving an already-bare host returns it unchanged.
///
/// # Examples
///
/// ```
/// use enrich_web::domain::resolve_domain;
///
/// assert_eq!(resolve_domain("https://www.acme.com/about?x=1"), "www.acme.com");
/// assert_eq!(resolve_domain("acme.com"), "acme.com");
/// ```
pub fn resolve_domain(input: &str) -> String {
    if let Some(netloc) = network_location(input) {
        return netloc;
    }
    network_location(&format!("{DEFAULT_SCHEME}{input}")).unwrap_or_else(|| input.to_owned())
}

/// Authority text of `raw`, provided `url` sees a host in it.
///
/// The host is taken from the raw text rather than from the parsed URL,
/// which lowercases hosts and drops default ports.
fn network_location(raw: &str) -> Option<String> {
    let raw = raw.trim();
    Url::parse(raw).ok()?.host_str().filter(|h| !h.is_empty())?;
    let (_, rest) = raw.split_once("://")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    Some(&rest[..end])
        .filter(|authority| !authority.is_empty())
        .map(str::to_owned)
}
