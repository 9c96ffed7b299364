pub mod client;
pub mod error;
pub mod extract;
pub mod fragment;
pub mod number;
pub mod page;
pub mod pagination;
pub mod politeness;

pub use client::ListingsClient;
pub use error::ScraperError;
pub use extract::{FieldSelectors, ListingExtractor};
pub use fragment::{HtmlFragment, ListingFragment};
pub use number::parse_amount;
pub use page::{parse_listing_page, PageResult};
pub use pagination::{collect_area, AreaCollection, PageSource, StopReason};
pub use politeness::DelayPolicy;
