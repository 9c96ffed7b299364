use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::areas::{AreaDescriptor, Region};
use crate::valuation::multiplier;

/// Tag identifying the marketplace every record was collected from.
pub const SOURCE_TAG: &str = "BizBuySell";

/// A business-for-sale listing, normalized from one listing card.
///
/// Serialized field names follow the export schema (`sourceUrl`,
/// `foundDate`, `lastModified`); all optional fields serialize as `null`
/// when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    /// Last path segment of `source_url`, or a generated `biz_<micros>` token.
    pub id: String,
    pub title: String,
    /// At most 500 characters.
    pub description: Option<String>,
    /// Asking price in whole dollars.
    pub price: Option<u64>,
    /// Seller's discretionary earnings (cash flow) in whole dollars.
    pub sde: Option<u64>,
    /// Gross revenue in whole dollars.
    pub revenue: Option<u64>,
    /// Category / industry label as shown on the card.
    pub niche: Option<String>,
    pub location: String,
    pub county: String,
    pub county_id: String,
    pub region: Region,
    #[serde(rename = "sourceUrl")]
    pub source_url: Option<String>,
    pub source: String,
    #[serde(rename = "foundDate")]
    pub found_date: NaiveDate,
    #[serde(rename = "lastModified")]
    pub last_modified: NaiveDate,
    /// `revenue / sde`, filled in after collection by [`Self::apply_multiplier`].
    pub multiplier: Option<f64>,
}

impl BusinessRecord {
    /// Creates a record for `area` with only the identity fields set.
    ///
    /// Area-derived fields and dates are stamped here; listing fields start
    /// absent and are filled by the extractor.
    #[must_use]
    pub fn new(id: String, title: String, area: &AreaDescriptor, today: NaiveDate) -> Self {
        Self {
            id,
            title,
            description: None,
            price: None,
            sde: None,
            revenue: None,
            niche: None,
            location: area.location(),
            county: area.display_name.to_owned(),
            county_id: area.id.to_owned(),
            region: area.region,
            source_url: None,
            source: SOURCE_TAG.to_owned(),
            found_date: today,
            last_modified: today,
            multiplier: None,
        }
    }

    /// Recomputes `multiplier` from the current `revenue` and `sde`.
    pub fn apply_multiplier(&mut self) {
        self.multiplier = multiplier(self.revenue, self.sde);
    }

    /// Returns `true` if the record's niche is one of `excluded`.
    ///
    /// Records without a niche are never excluded.
    #[must_use]
    pub fn is_excluded_by<S: AsRef<str>>(&self, excluded: &[S]) -> bool {
        self.niche
            .as_deref()
            .is_some_and(|niche| excluded.iter().any(|c| c.as_ref() == niche))
    }
}
