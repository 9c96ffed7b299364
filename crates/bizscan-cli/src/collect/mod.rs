//! The `collect` command: iterate the selected counties, post-process the
//! gathered records, print a summary and export JSON + CSV.
//!
//! Per-area failures are logged and skipped rather than propagated so a
//! single bad county does not abort the full run.

use std::path::PathBuf;

use bizscan_core::{AppConfig, AreaDescriptor, BusinessRecord, CollectionConfig};
use bizscan_scraper::{collect_area, DelayPolicy, ListingExtractor, ListingsClient, PageSource};
use chrono::NaiveDate;

use crate::{export, report};

/// Resolved command-line options for one `collect` run.
#[derive(Debug)]
pub(crate) struct CollectOptions {
    pub config_path: PathBuf,
    pub output_dir: PathBuf,
    /// Overrides `max_pages_per_county` when set.
    pub max_pages: Option<u32>,
    pub no_delay: bool,
    pub dry_run: bool,
}

/// Records gathered across all areas, before filtering.
#[derive(Debug, Default)]
pub(crate) struct CollectionOutcome {
    pub records: Vec<BusinessRecord>,
    pub failed_areas: Vec<&'static str>,
}

/// Run a full collection pass and write the export files.
///
/// # Errors
///
/// Returns an error if the collection config cannot be loaded, no known
/// county is selected, the HTTP client cannot be built, or an export file
/// cannot be written. Per-area fetch failures are logged, not propagated.
pub(crate) async fn run_collect(app: &AppConfig, options: &CollectOptions) -> anyhow::Result<()> {
    let mut collection = bizscan_core::load_collection_config(&options.config_path)?;
    if let Some(max_pages) = options.max_pages {
        if max_pages == 0 {
            anyhow::bail!("--max-pages must be at least 1");
        }
        collection.max_pages_per_county = max_pages;
    }

    let areas = select_areas(&collection)?;

    if options.dry_run {
        let ids: Vec<&str> = areas.iter().map(|a| a.id).collect();
        println!(
            "dry-run: would collect up to {} pages for {} counties: [{}]",
            collection.max_pages_per_county,
            areas.len(),
            ids.join(", ")
        );
        if !collection.excluded_categories.is_empty() {
            println!(
                "dry-run: would exclude categories: [{}]",
                collection.excluded_categories.join(", ")
            );
        }
        return Ok(());
    }

    let client = ListingsClient::new(
        &app.base_url,
        app.scraper_request_timeout_secs,
        &app.scraper_user_agent,
    )?;
    let extractor = ListingExtractor::new(client.origin());
    let delay = if options.no_delay {
        DelayPolicy::disabled()
    } else {
        DelayPolicy::uniform_ms(app.scraper_min_delay_ms, app.scraper_max_delay_ms)
    };
    let today = chrono::Local::now().date_naive();

    tracing::info!(
        counties = areas.len(),
        max_pages = collection.max_pages_per_county,
        "starting collection"
    );

    let outcome = collect_areas(
        &client,
        &extractor,
        &areas,
        collection.max_pages_per_county,
        delay,
        today,
    )
    .await;

    if !outcome.failed_areas.is_empty() {
        tracing::warn!(
            failed_areas = outcome.failed_areas.len(),
            total_areas = areas.len(),
            "some counties failed during collection"
        );
    }

    let records = finalize_records(outcome.records, &collection.excluded_categories);

    let summary = report::Summary::from_records(&records);
    report::print_summary(&summary);

    if records.is_empty() {
        tracing::warn!("no listings collected; writing empty export");
    }

    let (json_path, csv_path) = export::export_all(&options.output_dir, &records)?;
    println!(
        "exported {} listings to {} and {}",
        records.len(),
        json_path.display(),
        csv_path.display()
    );
    Ok(())
}

/// Resolve the configured county ids against the catalog.
///
/// Unknown ids are warned about and skipped.
///
/// # Errors
///
/// Returns an error when no configured id names a known county.
pub(crate) fn select_areas(
    collection: &CollectionConfig,
) -> anyhow::Result<Vec<&'static AreaDescriptor>> {
    if collection.selected_counties.is_empty() {
        anyhow::bail!("no counties selected; run `bizscan config init` to create a starter config");
    }

    let resolution = bizscan_core::resolve_areas(&collection.selected_counties);
    for id in &resolution.unknown {
        tracing::warn!(county = %id, "skipping county — not in the area catalog");
    }
    if resolution.areas.is_empty() {
        anyhow::bail!(
            "none of the {} selected counties are in the area catalog",
            collection.selected_counties.len()
        );
    }
    Ok(resolution.areas)
}

/// Collect every area in order, pausing between areas as well as between pages.
pub(crate) async fn collect_areas<S: PageSource>(
    source: &S,
    extractor: &ListingExtractor,
    areas: &[&'static AreaDescriptor],
    max_pages: u32,
    delay: DelayPolicy,
    today: NaiveDate,
) -> CollectionOutcome {
    let mut outcome = CollectionOutcome::default();

    for (index, area) in areas.iter().enumerate() {
        if index > 0 {
            delay.pause().await;
        }
        tracing::info!(area = area.id, county = area.display_name, "collecting county");

        let collected = collect_area(source, extractor, area, max_pages, delay, today).await;
        if let Some(error) = collected.error() {
            tracing::warn!(area = area.id, error = %error, "county collection failed");
            outcome.failed_areas.push(area.id);
        }
        tracing::info!(
            area = area.id,
            listings = collected.records.len(),
            pages = collected.pages_fetched,
            "county done"
        );
        outcome.records.extend(collected.records);
    }

    outcome
}

/// Drop records in excluded categories, then compute each survivor's multiplier.
pub(crate) fn finalize_records(
    records: Vec<BusinessRecord>,
    excluded_categories: &[String],
) -> Vec<BusinessRecord> {
    let before = records.len();
    let mut kept: Vec<BusinessRecord> = records
        .into_iter()
        .filter(|r| !r.is_excluded_by(excluded_categories))
        .collect();

    let removed = before - kept.len();
    if removed > 0 {
        tracing::info!(removed, kept = kept.len(), "filtered excluded categories");
    }

    for record in &mut kept {
        record.apply_multiplier();
    }
    kept
}

#[cfg(test)]
#[path = "collect_test.rs"]
mod tests;
