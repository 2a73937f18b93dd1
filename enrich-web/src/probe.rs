//! Ordered selector probing over parsed HTML.
//!
//! Third-party layouts shift often, so each field is read through a list
//! of candidate selectors tried in order. The first selector that matches
//! an element with non-empty text wins.

use scraper::{ElementRef, Selector};

/// A compiled, ordered list of fallback selectors for one field.
#[derive(Debug, Clone)]
pub struct SelectorChain {
    selectors: Vec<Selector>,
}

impl SelectorChain {
    /// Compile `sources` in order. Selectors that fail to parse are logged
    /// and left out; the chain never fails to build.
    pub fn new<S: AsRef<str>>(sources: &[S]) -> Self {
        let selectors = sources
            .iter()
            .filter_map(|source| {
                let source = source.as_ref();
                match Selector::parse(source) {
                    Ok(selector) => Some(selector),
                    Err(e) => {
                        tracing::warn!(selector = source, error = ?e, "ignoring invalid selector");
                        None
                    }
                }
            })
            .collect();
        Self { selectors }
    }

    /// Number of usable selectors in the chain.
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// Returns `true` when no selector compiled.
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Trimmed text of the first matching element with non-empty text.
    pub fn first_text(&self, scope: ElementRef<'_>) -> Option<String> {
        self.selectors.iter().find_map(|selector| {
            scope
                .select(selector)
                .next()
                .and_then(|el| non_empty(&inner_text(el)))
        })
    }
}

/// Concatenated descendant text with runs of whitespace collapsed.
pub fn inner_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// `Some(trimmed)` unless the trimmed string is empty.
pub fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const HTML: &str = r#"<html><body>
        <div class="card">
          <span class="empty">   </span>
          <div class="second">Second   choice
             text</div>
          <p>Paragraph</p>
        </div>
    </body></html>"#;

    #[test]
    fn invalid_selectors_are_skipped() {
        let chain = SelectorChain::new(&["div.second", "[[broken", "p"]);
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn first_match_in_order_wins() {
        let doc = Html::parse_document(HTML);
        let chain = SelectorChain::new(&["p", "div.second"]);
        assert_eq!(chain.first_text(doc.root_element()).as_deref(), Some("Paragraph"));
    }

    #[test]
    fn empty_text_falls_through_to_next_selector() {
        let doc = Html::parse_document(HTML);
        let chain = SelectorChain::new(&["span.empty", "div.second"]);
        assert_eq!(
            chain.first_text(doc.root_element()).as_deref(),
            Some("Second choice text")
        );
    }

    #[test]
    fn no_match_is_none() {
        let doc = Html::parse_document(HTML);
        let chain = SelectorChain::new(&["h1.missing"]);
        assert!(chain.first_text(doc.root_element()).is_none());
    }

    #[test]
    fn empty_chain() {
        let chain = SelectorChain::new::<&str>(&[]);
        assert!(chain.is_empty());
    }
}
