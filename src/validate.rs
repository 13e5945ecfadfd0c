//! Static precondition validator
//!
//! Read-only checks with no coupling to the provisioning pipeline: the
//! notebook must parse as well-formed JSON, and every expected data file
//! must exist. Existence either holds at call time or it does not; nothing
//! here retries or mutates.

use std::fs;
use std::path::{Path, PathBuf};

/// Well-formedness result for the notebook document
#[derive(Debug, Clone)]
pub struct NotebookCheck {
    /// Path that was checked
    pub path: PathBuf,
    /// Whether the document parsed as JSON
    pub valid: bool,
    /// Read or parse error, when invalid
    pub error: Option<String>,
}

/// Existence result for one expected file
#[derive(Debug, Clone)]
pub struct FileCheck {
    /// Path that was checked
    pub path: PathBuf,
    /// Whether the file exists
    pub exists: bool,
}

/// Check that the notebook parses as well-formed JSON
///
/// An unreadable or unparseable file is reported as invalid with a
/// diagnostic; this never raises beyond the returned value.
#[must_use]
pub fn check_notebook(path: &Path) -> NotebookCheck {
    let outcome = fs::read_to_string(path)
        .map_err(|err| err.to_string())
        .and_then(|content| {
            serde_json::from_str::<serde_json::Value>(&content).map_err(|err| err.to_string())
        });

    match outcome {
        Ok(_) => NotebookCheck {
            path: path.to_path_buf(),
            valid: true,
            error: None,
        },
        Err(error) => NotebookCheck {
            path: path.to_path_buf(),
            valid: false,
            error: Some(error),
        },
    }
}

/// Check each expected path for existence
///
/// Relative entries resolve against `base_dir`; absolute entries are
/// checked as-is.
#[must_use]
pub fn check_files(paths: &[PathBuf], base_dir: &Path) -> Vec<FileCheck> {
    paths
        .iter()
        .map(|path| FileCheck {
            path: path.clone(),
            exists: base_dir.join(path).exists(),
        })
        .collect()
}
