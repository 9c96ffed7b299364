//! Listing-card extraction and normalization into [`BusinessRecord`]s.
//!
//! Each field is probed independently with its own ordered list of selector
//! patterns; the first pattern yielding non-empty text wins. A field that no
//! pattern matches is left absent. Only a missing title discards the card.

use std::sync::atomic::{AtomicU32, Ordering};

use bizscan_core::{AreaDescriptor, BusinessRecord};
use chrono::NaiveDate;

use crate::fragment::ListingFragment;
use crate::number::parse_amount;

/// Maximum description length, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Ordered selector patterns for each listing field.
///
/// The defaults track the marketplace's current card markup. They are plain
/// data so a markup change only needs a new value, not new code.
#[derive(Debug, Clone)]
pub struct FieldSelectors {
    pub title: Vec<&'static str>,
    pub description: Vec<&'static str>,
    pub price: Vec<&'static str>,
    pub sde: Vec<&'static str>,
    pub revenue: Vec<&'static str>,
    pub niche: Vec<&'static str>,
}

impl Default for FieldSelectors {
    fn default() -> Self {
        Self {
            title: vec!["h2", "h3", r#"[class*="title"]"#],
            description: vec![
                r#"[class*="description"]"#,
                r#"[class*="summary"]"#,
                "p",
            ],
            price: vec![r#"[class*="price"]"#, r#"[class*="asking"]"#],
            sde: vec![
                r#"[class*="cash"]"#,
                r#"[class*="sde"]"#,
                r#"[class*="cashflow"]"#,
            ],
            revenue: vec![
                r#"[class*="revenue"]"#,
                r#"[class*="gross"]"#,
                r#"[class*="sales"]"#,
            ],
            niche: vec![
                r#"[class*="category"]"#,
                r#"[class*="industry"]"#,
                r#"[class*="type"]"#,
            ],
        }
    }
}

/// Turns listing cards into normalized records for one site.
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    origin: String,
    selectors: FieldSelectors,
}

impl ListingExtractor {
    /// Creates an extractor with the default selectors.
    ///
    /// `origin` (e.g. `"https://www.bizbuysell.com"`) is prepended to
    /// root-relative hrefs.
    #[must_use]
    pub fn new(origin: &str) -> Self {
        Self::with_selectors(origin, FieldSelectors::default())
    }

    #[must_use]
    pub fn with_selectors(origin: &str, selectors: FieldSelectors) -> Self {
        Self {
            origin: origin.trim_end_matches('/').to_owned(),
            selectors,
        }
    }

    /// Builds a record from one card, or `None` if the card has no title.
    pub fn extract<F: ListingFragment + ?Sized>(
        &self,
        fragment: &F,
        area: &AreaDescriptor,
        today: NaiveDate,
    ) -> Option<BusinessRecord> {
        let s = &self.selectors;

        let Some(title) = fragment.first_text(&s.title) else {
            tracing::debug!(area = area.id, "skipping listing card without a title");
            return None;
        };

        let source_url = fragment
            .first_href()
            .and_then(|href| resolve_source_url(&href, &self.origin));
        let id = derive_listing_id(source_url.as_deref());

        let mut record = BusinessRecord::new(id, title, area, today);
        record.description = fragment
            .first_text(&s.description)
            .map(|text| truncate_chars(&text, DESCRIPTION_MAX_CHARS));
        record.price = fragment.first_text(&s.price).and_then(|t| parse_amount(&t));
        record.sde = fragment.first_text(&s.sde).and_then(|t| parse_amount(&t));
        record.revenue = fragment
            .first_text(&s.revenue)
            .and_then(|t| parse_amount(&t));
        record.niche = fragment.first_text(&s.niche);
        record.source_url = source_url;

        Some(record)
    }

    /// Extracts every titled card in `fragments`, preserving input order.
    pub fn extract_page<F: ListingFragment>(
        &self,
        fragments: &[F],
        area: &AreaDescriptor,
        today: NaiveDate,
    ) -> Vec<BusinessRecord> {
        fragments
            .iter()
            .filter_map(|fragment| self.extract(fragment, area, today))
            .collect()
    }
}

/// Resolves a card's href to an absolute URL.
///
/// Root-relative paths are joined to `origin`; `http(s)` URLs pass through
/// unchanged; anything else (`javascript:`, `#`, `mailto:`, bare relative
/// paths) yields `None`.
#[must_use]
pub fn resolve_source_url(href: &str, origin: &str) -> Option<String> {
    let href = href.trim();
    if href.starts_with('/') {
        Some(format!("{}{href}", origin.trim_end_matches('/')))
    } else if href.starts_with("http://") || href.starts_with("https://") {
        Some(href.to_owned())
    } else {
        None
    }
}

/// Derives a listing id from its URL's last path segment.
///
/// A trailing slash is tolerated (`.../abc123/` yields `abc123`). When there
/// is no URL, or neither of the last two segments is usable, a generated
/// `biz_<micros>_<seq>` token is returned instead.
#[must_use]
pub fn derive_listing_id(source_url: Option<&str>) -> String {
    source_url
        .and_then(id_from_url)
        .unwrap_or_else(generate_listing_id)
}

fn id_from_url(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    let segments: Vec<&str> = parsed.path_segments()?.collect();
    let mut tail = segments.iter().rev().take(2);
    let last = tail.next()?;
    let candidate = if last.is_empty() { tail.next()? } else { last };
    (!candidate.is_empty()).then(|| (*candidate).to_owned())
}

/// Best-effort unique fallback id: wall-clock micros plus a process-local
/// sequence number.
fn generate_listing_id() -> String {
    static SEQUENCE: AtomicU32 = AtomicU32::new(0);
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("biz_{}_{seq}", chrono::Utc::now().timestamp_micros())
}

/// Truncates to at most `max` characters on a char boundary.
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => text[..byte_idx].to_owned(),
        None => text.to_owned(),
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
