//! Parsing of one search-results page into records.

use bizscan_core::{AreaDescriptor, BusinessRecord};
use chrono::NaiveDate;
use scraper::{Html, Selector};

use crate::error::ScraperError;
use crate::extract::ListingExtractor;
use crate::fragment::HtmlFragment;

/// Patterns identifying one listing card on a results page.
pub const LISTING_CARD_PATTERNS: &[&str] = &[
    r#"[class*="BusinessProfileCard"]"#,
    r#"article[class*="listing"]"#,
];

/// Pattern for the pager's "next page" link.
pub const NEXT_PAGE_PATTERN: &str = r#"a[rel="next"]"#;

/// Records extracted from one results page.
#[derive(Debug, Clone, Default)]
pub struct PageResult {
    pub records: Vec<BusinessRecord>,
    /// Whether the page links to a following page.
    pub has_next: bool,
}

/// Parses a results page and extracts its listings.
///
/// A page with no recognizable cards yields an empty result rather than an
/// error; the caller treats that as the end of the listings.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidSelector`] if one of the card or pager
/// patterns does not compile.
pub fn parse_listing_page(
    html: &str,
    extractor: &ListingExtractor,
    area: &AreaDescriptor,
    today: NaiveDate,
) -> Result<PageResult, ScraperError> {
    let document = Html::parse_document(html);

    let card_selector = compile(&LISTING_CARD_PATTERNS.join(", "))?;
    let next_selector = compile(NEXT_PAGE_PATTERN)?;

    let fragments: Vec<HtmlFragment<'_>> = document
        .select(&card_selector)
        .map(HtmlFragment::new)
        .collect();
    let records = extractor.extract_page(&fragments, area, today);
    let has_next = document.select(&next_selector).next().is_some();

    tracing::debug!(
        area = area.id,
        cards = fragments.len(),
        records = records.len(),
        has_next,
        "parsed listing page"
    );

    Ok(PageResult { records, has_next })
}

fn compile(pattern: &str) -> Result<Selector, ScraperError> {
    Selector::parse(pattern).map_err(|e| ScraperError::InvalidSelector {
        selector: pattern.to_owned(),
        reason: e.to_string(),
    })
}
