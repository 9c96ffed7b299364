//! Access to one listing card's markup.
//!
//! The extractor only ever asks two questions of a card, captured by
//! [`ListingFragment`]. [`HtmlFragment`] answers them from a parsed HTML
//! element; tests can answer them from a map.

use scraper::{ElementRef, Selector};

/// Capability exposed by one listing card.
pub trait ListingFragment {
    /// Trimmed text of the first descendant matching `pattern`.
    ///
    /// Returns `None` when nothing matches or the pattern cannot be
    /// evaluated. Implementations must not panic.
    fn text_of(&self, pattern: &str) -> Option<String>;

    /// `href` attribute of the first anchor carrying one.
    fn first_href(&self) -> Option<String>;

    /// Trimmed, non-empty text for the first pattern in `patterns` that
    /// matches, trying them in priority order.
    fn first_text(&self, patterns: &[&str]) -> Option<String> {
        patterns
            .iter()
            .find_map(|pattern| self.text_of(pattern).filter(|text| !text.is_empty()))
    }
}

/// A listing card backed by a parsed HTML element.
#[derive(Debug, Clone, Copy)]
pub struct HtmlFragment<'a> {
    element: ElementRef<'a>,
}

impl<'a> HtmlFragment<'a> {
    #[must_use]
    pub fn new(element: ElementRef<'a>) -> Self {
        Self { element }
    }
}

impl ListingFragment for HtmlFragment<'_> {
    fn text_of(&self, pattern: &str) -> Option<String> {
        let selector = match Selector::parse(pattern) {
            Ok(selector) => selector,
            Err(e) => {
                tracing::debug!(pattern, error = %e, "selector rejected — treating field as absent");
                return None;
            }
        };
        self.element
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_owned())
    }

    fn first_href(&self) -> Option<String> {
        let selector = Selector::parse("a[href]").ok()?;
        self.element
            .select(&selector)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| href.trim().to_owned())
    }
}
