//! TOML configuration for the command-line front end.
//!
//! Every key is optional:
//!
//! ```toml
//! log_level = "info"
//! log_file = "tax.log"
//! history_file = "history.toml"
//! history_capacity = 5
//! slab_file = "slabs.csv"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tax_core::{RulesError, TaxEngine, TaxRules};
use tax_data::{SlabLoadError, SlabScheduleLoader};
use thiserror::Error;

use crate::history::DEFAULT_CAPACITY;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("history_capacity must be at least 1")]
    ZeroHistoryCapacity,

    #[error(transparent)]
    Slabs(#[from] SlabLoadError),

    #[error(transparent)]
    Rules(#[from] RulesError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub history_file: PathBuf,
    pub history_capacity: usize,
    /// CSV slab schedule replacing the built-in FY 2025-26 tables.
    pub slab_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
            history_file: PathBuf::from("history.toml"),
            history_capacity: DEFAULT_CAPACITY,
            slab_file: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(
        input: &str,
        origin: &str,
    ) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(input).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;
        if config.history_capacity == 0 {
            return Err(ConfigError::ZeroHistoryCapacity);
        }
        Ok(config)
    }

    /// Reads `path`, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let origin = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: origin.clone(),
            source,
        })?;
        Self::from_toml_str(&contents, &origin)
    }

    /// Reference rules, with the slab schedule swapped for `slab_file` when set.
    pub fn tax_rules(&self) -> Result<TaxRules, ConfigError> {
        let mut rules = TaxRules::default();
        if let Some(slab_file) = &self.slab_file {
            rules.slabs = SlabScheduleLoader::load_from_file(slab_file)?;
            tracing::info!(path = %slab_file.display(), "using slab schedule override");
        }
        Ok(rules)
    }

    pub fn build_engine(&self) -> Result<TaxEngine, ConfigError> {
        Ok(TaxEngine::new(self.tax_rules()?)?)
    }
}
