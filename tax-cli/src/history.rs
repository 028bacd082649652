//! Bounded, newest-first record of past regime comparisons, persisted as TOML.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tax_core::{RegimeComparison, TaxResult, TaxpayerProfile};
use thiserror::Error;

pub const DEFAULT_CAPACITY: usize = 5;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to read history {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write history {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt history file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize history: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// One saved calculation: the inputs and both regime results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub profile: TaxpayerProfile,
    pub old: TaxResult,
    pub new: TaxResult,
}

impl HistoryEntry {
    pub fn new(
        timestamp: DateTime<Utc>,
        profile: TaxpayerProfile,
        comparison: &RegimeComparison,
    ) -> Self {
        Self {
            timestamp,
            profile,
            old: comparison.old.clone(),
            new: comparison.new.clone(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryFile {
    #[serde(default)]
    entries: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationHistory {
    capacity: usize,
    entries: Vec<HistoryEntry>,
}

impl CalculationHistory {
    /// A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds `entry` as the newest record, dropping the oldest past capacity.
    pub fn push(
        &mut self,
        entry: HistoryEntry,
    ) {
        self.entries.insert(0, entry);
        self.entries.truncate(self.capacity);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn from_toml_str(
        input: &str,
        capacity: usize,
    ) -> Result<Self, HistoryError> {
        let file: HistoryFile = toml::from_str(input)?;
        let mut history = Self::new(capacity);
        history.entries = file.entries;
        history.entries.truncate(history.capacity);
        Ok(history)
    }

    pub fn to_toml_string(&self) -> Result<String, HistoryError> {
        let file = HistoryFile {
            entries: self.entries.clone(),
        };
        Ok(toml::to_string(&file)?)
    }

    /// Loads `path`; a file that does not exist yet is an empty history.
    pub fn load(
        path: &Path,
        capacity: usize,
    ) -> Result<Self, HistoryError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents, capacity),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no history file yet");
                Ok(Self::new(capacity))
            }
            Err(source) => Err(HistoryError::Read {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    pub fn save(
        &self,
        path: &Path,
    ) -> Result<(), HistoryError> {
        let contents = self.to_toml_string()?;
        std::fs::write(path, contents).map_err(|source| HistoryError::Write {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), entries = self.len(), "saved history");
        Ok(())
    }
}
