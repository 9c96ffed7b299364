use crate::app_config::AppConfig;
use crate::ConfigError;

pub(crate) const DEFAULT_BASE_URL: &str = "https://www.bizbuysell.com";
pub(crate) const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// configuration.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("BIZSCAN_LOG_LEVEL", "info");
    let collection_config_path = PathBuf::from(or_default(
        "BIZSCAN_CONFIG_PATH",
        "./scraper_config.json",
    ));
    let output_dir = PathBuf::from(or_default("BIZSCAN_OUTPUT_DIR", "."));

    let base_url = or_default("BIZSCAN_BASE_URL", DEFAULT_BASE_URL);
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "BIZSCAN_BASE_URL".to_string(),
            reason: format!("expected an http(s) origin, got \"{base_url}\""),
        });
    }
    let base_url = base_url.trim_end_matches('/').to_string();

    let scraper_request_timeout_secs = parse_u64("BIZSCAN_SCRAPER_REQUEST_TIMEOUT_SECS", "30")?;
    if scraper_request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "BIZSCAN_SCRAPER_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }
    let scraper_user_agent = or_default("BIZSCAN_SCRAPER_USER_AGENT", DEFAULT_USER_AGENT);
    let scraper_min_delay_ms = parse_u64("BIZSCAN_SCRAPER_MIN_DELAY_MS", "2000")?;
    let scraper_max_delay_ms = parse_u64("BIZSCAN_SCRAPER_MAX_DELAY_MS", "4000")?;

    if scraper_min_delay_ms > scraper_max_delay_ms {
        return Err(ConfigError::InvalidEnvVar {
            var: "BIZSCAN_SCRAPER_MIN_DELAY_MS".to_string(),
            reason: format!(
                "minimum delay {scraper_min_delay_ms}ms exceeds maximum delay {scraper_max_delay_ms}ms"
            ),
        });
    }

    Ok(AppConfig {
        log_level,
        collection_config_path,
        output_dir,
        base_url,
        scraper_request_timeout_secs,
        scraper_user_agent,
        scraper_min_delay_ms,
        scraper_max_delay_ms,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
