//! Static precondition validation

use std::env;
use std::path::PathBuf;

use labup::config::SetupConfig;
use labup::output::{FileReport, NotebookReport, OutputMode, ValidationReport};
use labup::validate;

/// Check notebook well-formedness and expected data file presence
pub fn validate(
    config: &SetupConfig,
    notebook: Option<PathBuf>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let base_dir = env::current_dir()?;
    let notebook_path = notebook.unwrap_or_else(|| config.notebook.path.clone());

    let notebook_check = validate::check_notebook(&base_dir.join(&notebook_path));
    let file_checks = validate::check_files(&config.notebook.expected_files, &base_dir);

    let passed = notebook_check.valid && file_checks.iter().all(|f| f.exists);
    let report = ValidationReport {
        passed,
        notebook: NotebookReport {
            path: notebook_path.display().to_string(),
            valid: notebook_check.valid,
            error: notebook_check.error,
        },
        files: file_checks
            .into_iter()
            .map(|check| FileReport {
                path: check.path.display().to_string(),
                exists: check.exists,
            })
            .collect(),
    };
    report.render(mode);

    if !passed {
        std::process::exit(1);
    }

    Ok(())
}
