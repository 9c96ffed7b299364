use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.log_level, "info");
    assert_eq!(
        cfg.collection_config_path.to_str(),
        Some("./scraper_config.json")
    );
    assert_eq!(cfg.output_dir.to_str(), Some("."));
    assert_eq!(cfg.base_url, "https://www.bizbuysell.com");
    assert_eq!(cfg.scraper_request_timeout_secs, 30);
    assert_eq!(cfg.scraper_user_agent, DEFAULT_USER_AGENT);
    assert_eq!(cfg.scraper_min_delay_ms, 2000);
    assert_eq!(cfg.scraper_max_delay_ms, 4000);
}

#[test]
fn base_url_override_strips_trailing_slash() {
    let mut map = HashMap::new();
    map.insert("BIZSCAN_BASE_URL", "http://127.0.0.1:8080/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.base_url, "http://127.0.0.1:8080");
}

#[test]
fn base_url_without_scheme_is_rejected() {
    let mut map = HashMap::new();
    map.insert("BIZSCAN_BASE_URL", "www.bizbuysell.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BIZSCAN_BASE_URL"),
        "expected InvalidEnvVar(BIZSCAN_BASE_URL), got: {result:?}"
    );
}

#[test]
fn paths_override() {
    let mut map = HashMap::new();
    map.insert("BIZSCAN_CONFIG_PATH", "/etc/bizscan/config.json");
    map.insert("BIZSCAN_OUTPUT_DIR", "/var/lib/bizscan");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.collection_config_path.to_str(),
        Some("/etc/bizscan/config.json")
    );
    assert_eq!(cfg.output_dir.to_str(), Some("/var/lib/bizscan"));
}

#[test]
fn scraper_request_timeout_secs_override() {
    let mut map = HashMap::new();
    map.insert("BIZSCAN_SCRAPER_REQUEST_TIMEOUT_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper_request_timeout_secs, 60);
}

#[test]
fn scraper_request_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("BIZSCAN_SCRAPER_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BIZSCAN_SCRAPER_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(BIZSCAN_SCRAPER_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn scraper_user_agent_override() {
    let mut map = HashMap::new();
    map.insert("BIZSCAN_SCRAPER_USER_AGENT", "custom-agent/2.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper_user_agent, "custom-agent/2.0");
}

#[test]
fn scraper_delay_override() {
    let mut map = HashMap::new();
    map.insert("BIZSCAN_SCRAPER_MIN_DELAY_MS", "0");
    map.insert("BIZSCAN_SCRAPER_MAX_DELAY_MS", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper_min_delay_ms, 0);
    assert_eq!(cfg.scraper_max_delay_ms, 0);
}

#[test]
fn scraper_max_delay_invalid() {
    let mut map = HashMap::new();
    map.insert("BIZSCAN_SCRAPER_MAX_DELAY_MS", "-5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BIZSCAN_SCRAPER_MAX_DELAY_MS"),
        "expected InvalidEnvVar(BIZSCAN_SCRAPER_MAX_DELAY_MS), got: {result:?}"
    );
}

#[test]
fn scraper_min_delay_above_max_is_rejected() {
    let mut map = HashMap::new();
    map.insert("BIZSCAN_SCRAPER_MIN_DELAY_MS", "5000");
    map.insert("BIZSCAN_SCRAPER_MAX_DELAY_MS", "1000");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BIZSCAN_SCRAPER_MIN_DELAY_MS"),
        "expected InvalidEnvVar(BIZSCAN_SCRAPER_MIN_DELAY_MS), got: {result:?}"
    );
}

#[test]
fn scraper_request_timeout_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("BIZSCAN_SCRAPER_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. })
                if var == "BIZSCAN_SCRAPER_REQUEST_TIMEOUT_SECS"
        ),
        "expected InvalidEnvVar for timeout, got: {result:?}"
    );
}
