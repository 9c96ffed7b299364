//! HTTP page source for the marketplace's county search pages.

mod origin;

use std::time::Duration;

use bizscan_core::{AreaDescriptor, STATE_NAME};
use reqwest::Client;

use crate::error::ScraperError;
use crate::pagination::PageSource;

pub use origin::site_origin;
#[cfg(test)]
use origin::host_of;

/// Default wait when a 429 carries no usable `Retry-After` header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// HTTP client for the county "businesses for sale" search pages.
///
/// Each request is a single attempt bounded by the configured timeout.
/// Rate limiting (429), not-found (404) and other non-2xx responses surface
/// as typed errors; the caller abandons the area on any of them.
pub struct ListingsClient {
    client: Client,
    origin: String,
}

impl ListingsClient {
    /// Creates a `ListingsClient` for the site at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidBaseUrl`] if `base_url` has no usable
    /// origin, or [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let origin = site_origin(base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, origin })
    }

    /// The scheme+host all listing URLs are built on.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Builds the search URL for `area`: page 1 is the bare county path,
    /// later pages add `?page=N`.
    #[must_use]
    pub fn listing_url(&self, area_id: &str, page: u32) -> String {
        let state = STATE_NAME.to_lowercase();
        let base = format!(
            "{}/{state}/{area_id}-county-businesses-for-sale/",
            self.origin
        );
        if page <= 1 {
            base
        } else {
            format!("{base}?page={page}")
        }
    }

    /// Fetches one search page and returns its HTML body.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`]: HTTP 429.
    /// - [`ScraperError::NotFound`]: HTTP 404.
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`ScraperError::Http`]: network, TLS or timeout failure.
    pub async fn fetch_listing_page(&self, area_id: &str, page: u32) -> Result<String, ScraperError> {
        let url = self.listing_url(area_id, page);
        tracing::debug!(url = %url, "fetching listing page");

        let response = self
            .client
            .get(&url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);

            return Err(ScraperError::RateLimited {
                domain: origin::host_of(&url),
                retry_after_secs,
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound { url });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response.text().await?)
    }
}

impl PageSource for ListingsClient {
    async fn fetch_page(&self, area: &AreaDescriptor, page: u32) -> Result<String, ScraperError> {
        self.fetch_listing_page(area.id, page).await
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
