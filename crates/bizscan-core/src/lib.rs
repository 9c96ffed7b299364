pub mod app_config;
pub mod areas;
pub mod collection;
pub mod config;
pub mod listing;
pub mod valuation;

use thiserror::Error;

pub use app_config::AppConfig;
pub use areas::{
    all_areas, find_area, most_populous, resolve_areas, AreaDescriptor, AreaResolution, Region,
    STATE_NAME,
};
pub use collection::{load_collection_config, save_collection_config, CollectionConfig};
pub use config::{load_app_config, load_app_config_from_env};
pub use listing::{BusinessRecord, SOURCE_TAG};
pub use valuation::multiplier;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read collection config {path}: {source}")]
    ConfigFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse collection config: {0}")]
    ConfigFileParse(#[source] serde_json::Error),

    #[error("failed to write collection config {path}: {source}")]
    ConfigFileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config validation failed: {0}")]
    Validation(String),
}
