//! Page-by-page collection of one area's listings.
//!
//! Pages are fetched strictly in sequence starting at 1. Collection for the
//! area stops at the first of:
//!
//! | Condition | [`StopReason`] | Current page kept? |
//! |-----------|----------------|--------------------|
//! | `max_pages` pages fetched | `PageLimit` | yes |
//! | page yields no records | `EmptyPage` | n/a |
//! | page has no "next" link | `LastPage` | yes |
//! | fetch or parse fails | `Failed` | no (earlier pages are) |

use std::future::Future;

use bizscan_core::{AreaDescriptor, BusinessRecord};
use chrono::NaiveDate;

use crate::error::ScraperError;
use crate::extract::ListingExtractor;
use crate::page::parse_listing_page;
use crate::politeness::DelayPolicy;

/// Supplies the raw HTML of one results page for an area.
///
/// Page numbers start at 1. Implemented over HTTP by
/// [`crate::ListingsClient`]; tests substitute canned pages.
pub trait PageSource {
    fn fetch_page(
        &self,
        area: &AreaDescriptor,
        page: u32,
    ) -> impl Future<Output = Result<String, ScraperError>>;
}

/// Why collection for an area ended.
#[derive(Debug)]
pub enum StopReason {
    PageLimit,
    EmptyPage { page: u32 },
    LastPage { page: u32 },
    Failed { page: u32, error: ScraperError },
}

/// Everything gathered for one area, including partial results when a later
/// page failed.
#[derive(Debug)]
pub struct AreaCollection {
    pub records: Vec<BusinessRecord>,
    /// Pages successfully fetched (a failed fetch is not counted).
    pub pages_fetched: u32,
    pub stop: StopReason,
}

impl AreaCollection {
    /// The failure that aborted this area, if any.
    #[must_use]
    pub fn error(&self) -> Option<&ScraperError> {
        match &self.stop {
            StopReason::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Collects up to `max_pages` pages of listings for `area`.
///
/// `delay` is applied between consecutive fetches, never before the first.
/// Failures never propagate: they end the area with [`StopReason::Failed`]
/// and the records from earlier pages are returned alongside.
pub async fn collect_area<S: PageSource>(
    source: &S,
    extractor: &ListingExtractor,
    area: &AreaDescriptor,
    max_pages: u32,
    delay: DelayPolicy,
    today: NaiveDate,
) -> AreaCollection {
    let mut records: Vec<BusinessRecord> = Vec::new();
    let mut pages_fetched = 0u32;

    for page in 1..=max_pages {
        if page > 1 {
            delay.pause().await;
        }

        let outcome = match source.fetch_page(area, page).await {
            Ok(html) => parse_listing_page(&html, extractor, area, today),
            Err(error) => Err(error),
        };

        let result = match outcome {
            Ok(result) => result,
            Err(error) => {
                tracing::warn!(
                    area = area.id,
                    page,
                    error = %error,
                    kept = records.len(),
                    "page fetch failed — abandoning remaining pages for area"
                );
                return AreaCollection {
                    records,
                    pages_fetched,
                    stop: StopReason::Failed { page, error },
                };
            }
        };
        pages_fetched += 1;

        if result.records.is_empty() {
            tracing::info!(area = area.id, page, "no listings on page — stopping");
            return AreaCollection {
                records,
                pages_fetched,
                stop: StopReason::EmptyPage { page },
            };
        }

        tracing::info!(
            area = area.id,
            page,
            listings = result.records.len(),
            "collected listing page"
        );
        records.extend(result.records);

        if !result.has_next {
            return AreaCollection {
                records,
                pages_fetched,
                stop: StopReason::LastPage { page },
            };
        }
    }

    AreaCollection {
        records,
        pages_fetched,
        stop: StopReason::PageLimit,
    }
}

#[cfg(test)]
#[path = "pagination_test.rs"]
mod tests;
