//! Site-origin and host helpers for the listings client.

use reqwest::Url;

use crate::error::ScraperError;

/// Reduces `base_url` to its `scheme://host[:port]` origin.
///
/// Any path, query or fragment on the configured base is discarded: listing
/// paths are always built from the site root.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidBaseUrl`] if `base_url` does not parse or
/// is not an `http`/`https` URL with a host.
pub fn site_origin(base_url: &str) -> Result<String, ScraperError> {
    let invalid = |reason: String| ScraperError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason,
    };

    let url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme \"{}\"", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_owned()));
    }
    Ok(url.origin().ascii_serialization())
}

/// Host of `url` for error reporting; the input itself when it has none.
pub(super) fn host_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}
