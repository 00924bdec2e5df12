use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ranker::DEFAULT_TOP_N;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Container names used by the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Containers {
    /// uploaded RFPs awaiting extraction
    pub raw_rfp: String,
    /// extracted RFP text awaiting ranking
    pub processed_rfp: String,
    /// uploaded proposals awaiting extraction
    pub raw_proposal: String,
    /// extracted proposal text, the ranking corpus
    pub processed_proposal: String,
    /// ranking output, one JSON blob per RFP
    pub results: String,
}

impl Default for Containers {
    fn default() -> Self {
        Self {
            raw_rfp: "raw-rfp".to_string(),
            processed_rfp: "processed-rfp".to_string(),
            raw_proposal: "raw-proposal".to_string(),
            processed_proposal: "processed-proposal".to_string(),
            results: "results".to_string(),
        }
    }
}

/// Polling settings for asynchronous text extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    pub interval_ms: u64,
    pub max_wait_ms: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1_000,
            max_wait_ms: 120_000,
        }
    }
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn max_wait(&self) -> Duration {
        Duration::from_millis(self.max_wait_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub containers: Containers,
    /// number of matches published per RFP
    pub top_n: usize,
    /// appended to blob links handed to URL based extractors
    pub sas_token: Option<String>,
    /// remove the raw RFP once its text is stored
    pub delete_after_process: bool,
    /// stopword file; the built-in English list when unset
    pub stopwords_path: Option<PathBuf>,
    pub poll: PollConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            containers: Containers::default(),
            top_n: DEFAULT_TOP_N,
            sas_token: None,
            delete_after_process: true,
            stopwords_path: None,
            poll: PollConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
