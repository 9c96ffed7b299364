//! The operator-edited collection configuration (`scraper_config.json`).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::areas::most_populous;
use crate::ConfigError;

pub const DEFAULT_MAX_PAGES_PER_COUNTY: u32 = 5;

/// What to collect: which areas, how deep, and which categories to drop.
///
/// Every key has a default, so a file that sets only some keys is merged
/// over the defaults rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Area ids, processed in this order.
    pub selected_counties: Vec<String>,
    /// Listings whose niche equals one of these are dropped after collection.
    pub excluded_categories: Vec<String>,
    pub max_pages_per_county: u32,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            selected_counties: Vec::new(),
            excluded_categories: Vec::new(),
            max_pages_per_county: DEFAULT_MAX_PAGES_PER_COUNTY,
        }
    }
}

impl CollectionConfig {
    /// A ready-to-run configuration: the five most populous counties, with
    /// restaurants and retail excluded.
    #[must_use]
    pub fn starter() -> Self {
        Self {
            selected_counties: most_populous(5)
                .into_iter()
                .map(|a| a.id.to_owned())
                .collect(),
            excluded_categories: vec!["Restaurant".to_owned(), "Retail".to_owned()],
            max_pages_per_county: DEFAULT_MAX_PAGES_PER_COUNTY,
        }
    }

    /// Parses a configuration from JSON, merging over defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConfigFileParse`] for malformed JSON and
    /// [`ConfigError::Validation`] if the merged values are invalid.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let mut config: CollectionConfig =
            serde_json::from_str(content).map_err(ConfigError::ConfigFileParse)?;
        config.validate()?;
        config.dedup_categories();
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_pages_per_county == 0 {
            return Err(ConfigError::Validation(
                "max_pages_per_county must be at least 1".to_string(),
            ));
        }
        if self.selected_counties.iter().any(|id| id.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "selected_counties must not contain empty ids".to_string(),
            ));
        }
        Ok(())
    }

    fn dedup_categories(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.excluded_categories
            .retain(|category| seen.insert(category.clone()));
    }
}

/// Load the collection configuration from `path`.
///
/// A missing file is not an error: defaults are returned.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read, parsed, or
/// fails validation.
pub fn load_collection_config(path: &Path) -> Result<CollectionConfig, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(CollectionConfig::default());
        }
        Err(e) => {
            return Err(ConfigError::ConfigFileIo {
                path: path.display().to_string(),
                source: e,
            })
        }
    };

    CollectionConfig::from_json(&content)
}

/// Save `config` to `path` as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`ConfigError::ConfigFileWrite`] if the file cannot be written.
pub fn save_collection_config(path: &Path, config: &CollectionConfig) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(config).map_err(ConfigError::ConfigFileParse)?;
    std::fs::write(path, json).map_err(|e| ConfigError::ConfigFileWrite {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "bizscan-collection-{}-{name}.json",
            std::process::id()
        ))
    }

    #[test]
    fn empty_object_yields_defaults() {
        let config = CollectionConfig::from_json("{}").unwrap();
        assert_eq!(config, CollectionConfig::default());
        assert_eq!(config.max_pages_per_county, 5);
    }

    #[test]
    fn partial_file_merges_over_defaults() {
        let config =
            CollectionConfig::from_json(r#"{"selected_counties": ["lee", "polk"]}"#).unwrap();
        assert_eq!(config.selected_counties, vec!["lee", "polk"]);
        assert!(config.excluded_categories.is_empty());
        assert_eq!(config.max_pages_per_county, 5);
    }

    #[test]
    fn full_file_overrides_everything() {
        let config = CollectionConfig::from_json(
            r#"{
                "selected_counties": ["duval"],
                "excluded_categories": ["Retail"],
                "max_pages_per_county": 2
            }"#,
        )
        .unwrap();
        assert_eq!(config.selected_counties, vec!["duval"]);
        assert_eq!(config.excluded_categories, vec!["Retail"]);
        assert_eq!(config.max_pages_per_county, 2);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = CollectionConfig::from_json(r#"{"headless": false}"#).unwrap();
        assert_eq!(config, CollectionConfig::default());
    }

    #[test]
    fn zero_max_pages_is_rejected() {
        let err = CollectionConfig::from_json(r#"{"max_pages_per_county": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref msg) if msg.contains("at least 1")));
    }

    #[test]
    fn blank_area_id_is_rejected() {
        let err = CollectionConfig::from_json(r#"{"selected_counties": ["lee", " "]}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = CollectionConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::ConfigFileParse(_)));
    }

    #[test]
    fn duplicate_categories_collapse() {
        let config = CollectionConfig::from_json(
            r#"{"excluded_categories": ["Retail", "Restaurant", "Retail"]}"#,
        )
        .unwrap();
        assert_eq!(config.excluded_categories, vec!["Retail", "Restaurant"]);
    }

    #[test]
    fn starter_selects_five_largest_counties() {
        let config = CollectionConfig::starter();
        assert_eq!(
            config.selected_counties,
            vec!["miami-dade", "broward", "palm-beach", "hillsborough", "orange"]
        );
        assert_eq!(config.excluded_categories, vec!["Restaurant", "Retail"]);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = scratch_path("missing");
        let _ = std::fs::remove_file(&path);
        let config = load_collection_config(&path).unwrap();
        assert_eq!(config, CollectionConfig::default());
    }

    #[test]
    fn save_then_load_preserves_config() {
        let path = scratch_path("saved");
        let config = CollectionConfig::starter();
        save_collection_config(&path, &config).unwrap();
        let loaded = load_collection_config(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }
}
