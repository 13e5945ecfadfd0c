//! Input dataset availability
//!
//! Datasets are alternative groups of input files; a group is present only
//! when every file in it exists. Provisioning may proceed as long as at
//! least one group is fully present.

use std::path::{Path, PathBuf};

use crate::config::DataConfig;

/// Presence result for one dataset group
#[derive(Debug, Clone)]
pub struct DatasetStatus {
    /// Dataset name from config
    pub name: String,
    /// Whether every file in the group exists
    pub present: bool,
    /// The files that were not found
    pub missing: Vec<PathBuf>,
}

/// Presence results for all configured datasets
#[derive(Debug, Clone)]
pub struct DataAvailability {
    /// Per-dataset results, in config order
    pub datasets: Vec<DatasetStatus>,
}

impl DataAvailability {
    /// Whether at least one dataset is fully present
    #[must_use]
    pub fn any_present(&self) -> bool {
        self.datasets.iter().any(|d| d.present)
    }

    /// Whether every dataset is fully present
    #[must_use]
    pub fn all_present(&self) -> bool {
        self.datasets.iter().all(|d| d.present)
    }
}

/// Check every configured dataset against the filesystem
///
/// Relative file paths resolve against `base_dir`; absolute paths are
/// checked as-is.
#[must_use]
pub fn check_datasets(config: &DataConfig, base_dir: &Path) -> DataAvailability {
    let datasets = config
        .datasets
        .iter()
        .map(|dataset| {
            let missing: Vec<PathBuf> = dataset
                .files
                .iter()
                .filter(|file| !base_dir.join(file).exists())
                .cloned()
                .collect();
            DatasetStatus {
                name: dataset.name.clone(),
                present: missing.is_empty(),
                missing,
            }
        })
        .collect();
    DataAvailability { datasets }
}
