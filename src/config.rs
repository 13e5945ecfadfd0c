//! Setup configuration
//!
//! All environment-specific constants (service endpoint, poll bounds,
//! compose service name, dataset and notebook paths) live here rather than
//! at their use sites. Config is read from an optional `labup.toml` in the
//! project directory; a missing file yields the defaults below, a malformed
//! file is an error.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Top-level labup configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetupConfig {
    /// Notebook service endpoint and poll bounds
    #[serde(default)]
    pub endpoint: EndpointConfig,
    /// Container orchestration settings
    #[serde(default)]
    pub compose: ComposeConfig,
    /// Input datasets expected on disk
    #[serde(default)]
    pub data: DataConfig,
    /// Notebook file and the data files it depends on
    #[serde(default)]
    pub notebook: NotebookConfig,
}

/// Notebook service endpoint and readiness poll bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// URL probed for liveness and printed in the completion message
    #[serde(default = "default_url")]
    pub url: String,
    /// Maximum number of readiness probes before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Fixed delay between readiness probes, in seconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Per-probe HTTP timeout, in seconds
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
}

fn default_url() -> String {
    "http://localhost:8889/lab".to_string()
}

const fn default_max_attempts() -> u32 {
    30
}

const fn default_poll_interval() -> u64 {
    2
}

const fn default_probe_timeout() -> u64 {
    2
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_attempts: default_max_attempts(),
            poll_interval_secs: default_poll_interval(),
            probe_timeout_secs: default_probe_timeout(),
        }
    }
}

/// Container orchestration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeConfig {
    /// Compose service hosting the notebook server
    #[serde(default = "default_service")]
    pub service: String,
    /// Working directory inside the container
    #[serde(default = "default_workdir")]
    pub workdir: String,
    /// Command run inside the container to extract the data archive
    #[serde(default = "default_extract_command")]
    pub extract_command: String,
    /// Directory (relative to `workdir`) the extraction is expected to create
    #[serde(default = "default_results_dir")]
    pub results_dir: String,
}

fn default_service() -> String {
    "jupyter".to_string()
}

fn default_workdir() -> String {
    "/home/jovyan/work".to_string()
}

fn default_extract_command() -> String {
    "bash docker/extract_data.sh".to_string()
}

fn default_results_dir() -> String {
    "M1 Results".to_string()
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            service: default_service(),
            workdir: default_workdir(),
            extract_command: default_extract_command(),
            results_dir: default_results_dir(),
        }
    }
}

/// Input datasets expected on disk before provisioning starts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Alternative dataset groups; setup proceeds if at least one group is
    /// fully present
    #[serde(default = "default_datasets")]
    pub datasets: Vec<DatasetConfig>,
}

/// One named group of input files
///
/// A group counts as present only when every file in it exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Human-readable dataset name
    pub name: String,
    /// Files that make up the dataset
    pub files: Vec<PathBuf>,
}

fn default_datasets() -> Vec<DatasetConfig> {
    vec![
        DatasetConfig {
            name: "module-3 archive".to_string(),
            files: vec![PathBuf::from("M1 Assignment Data (1).zip")],
        },
        DatasetConfig {
            name: "module-4 databases".to_string(),
            files: vec![PathBuf::from("lyrics.db"), PathBuf::from("twitter.db")],
        },
    ]
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            datasets: default_datasets(),
        }
    }
}

/// Notebook file and the data files the validator checks for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotebookConfig {
    /// The analysis notebook
    #[serde(default = "default_notebook_path")]
    pub path: PathBuf,
    /// Files the notebook expects to find when it runs
    #[serde(default = "default_expected_files")]
    pub expected_files: Vec<PathBuf>,
}

fn default_notebook_path() -> PathBuf {
    PathBuf::from("Group Comparison copy.ipynb")
}

fn default_expected_files() -> Vec<PathBuf> {
    [
        "M1 Results/lyrics/cher",
        "M1 Results/lyrics/robyn",
        "M1 Results/twitter/cher_followers_data.txt",
        "M1 Results/twitter/robynkonichiwa_followers_data.txt",
        "positive-words.txt",
        "negative-words.txt",
        "tidytext_sentiments.txt",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

impl Default for NotebookConfig {
    fn default() -> Self {
        Self {
            path: default_notebook_path(),
            expected_files: default_expected_files(),
        }
    }
}

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "labup.toml";

impl SetupConfig {
    /// Load config from the given path, or defaults if the file is absent
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }
}
