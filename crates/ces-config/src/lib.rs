//! # ces-config
//!
//! Layered configuration loading for the CES pipeline using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CES_*` prefix, `__` as separator)
//! 2. Project-level `.ces/config.toml`
//! 3. User-level `~/.config/ces/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CES_DATABASE__PATH` -> `database.path`,
//! `CES_SCORING__CREATIVITY` -> `scoring.creativity`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use ces_config::CesConfig;
//!
//! let config = CesConfig::load_with_dotenv().expect("config");
//! config.validate().expect("valid config");
//! println!("writing to {}", config.database.path);
//! ```

mod archive;
mod database;
mod error;
mod pipeline;

pub use archive::ArchiveConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use pipeline::PipelineConfig;

use ces_core::scores::CesWeights;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CesConfig {
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub scoring: CesWeights,
}

impl CesConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be read or a value has
    /// the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading a `.env` file from the current directory.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".ces/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("CES_").split("__"))
    }

    /// Reject values the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero batch size or scoring
    /// weights that are negative or do not sum to 1.0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pipeline.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pipeline.batch_size".into(),
                reason: "must be at least 1".into(),
            });
        }
        self.scoring
            .validate()
            .map_err(|e| ConfigError::InvalidValue {
                field: "scoring".into(),
                reason: e.to_string(),
            })
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ces").join("config.toml"))
    }
}
