//! Profile search query construction.

/// Build the profile search query for `name`, optionally narrowed to
/// `company` and restricted to `site`.
///
/// Names of two or more words are reduced to their first and last word
/// (middle names and initials rarely appear on profiles) and quoted as one
/// phrase. Single-word names are quoted whole. A present company is
/// appended as a second quoted phrase.
///
/// # Examples
///
/// ```
/// use card_enrich::pipeline::query::build_profile_query;
///
/// assert_eq!(
///     build_profile_query("Jane Q. Public", Some("Acme"), "linkedin.com/in"),
///     r#"site:linkedin.com/in "Jane Public" "Acme""#,
/// );
/// ```
pub fn build_profile_query(name: &str, company: Option<&str>, site: &str) -> String {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    let person = match tokens.as_slice() {
        [first, .., last] => format!("\"{first} {last}\""),
        _ => format!("\"{}\"", name.trim()),
    };

    let mut query = if site.is_empty() {
        person
    } else {
        format!("site:{site} {person}")
    };

    if let Some(company) = company.map(str::trim).filter(|c| !c.is_empty()) {
        query.push_str(&format!(" \"{company}\""));
    }
    query
}
