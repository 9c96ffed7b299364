use std::path::PathBuf;

/// Process-level settings read from the environment.
///
/// Distinct from [`crate::CollectionConfig`], which describes *what* to
/// collect and lives in a JSON file the operator edits.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub collection_config_path: PathBuf,
    pub output_dir: PathBuf,
    /// Site origin used to build listing URLs and resolve relative hrefs.
    pub base_url: String,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    /// Lower bound of the randomized pause between page fetches.
    pub scraper_min_delay_ms: u64,
    /// Upper bound of the randomized pause between page fetches.
    pub scraper_max_delay_ms: u64,
}
