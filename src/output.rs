//! Console and report output for human and JSON modes
//!
//! The color decision is made once at startup and carried in a [`Console`]
//! value handed to everything that prints; nothing toggles global state.
//! Structured results can be rendered either as human-readable text or
//! machine-parseable JSON.

use colored::{Color, Colorize};
use serde::Serialize;

use crate::pipeline::step::StepRecord;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Tagged console printer for pipeline progress
///
/// Prints `[INFO]`-style tagged lines to stdout. Colors are resolved once at
/// construction; in JSON output mode the console is quiet so progress lines
/// do not pollute the machine-readable stream.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    colors: bool,
    quiet: bool,
}

impl Console {
    /// Create a console, resolving the color choice once
    ///
    /// Colors are disabled when requested, on Windows, or in JSON mode
    /// (where the console is fully silenced).
    #[must_use]
    pub const fn new(no_color: bool, mode: OutputMode) -> Self {
        Self {
            colors: !no_color && cfg!(not(windows)),
            quiet: matches!(mode, OutputMode::Json),
        }
    }

    /// Console with colors off and output on, for tests
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            colors: false,
            quiet: false,
        }
    }

    fn emit(self, tag: &str, color: Color, message: &str) {
        if self.quiet {
            return;
        }
        if self.colors {
            println!("{} {message}", tag.color(color));
        } else {
            println!("{tag} {message}");
        }
    }

    /// Print an informational progress line
    pub fn status(self, message: &str) {
        self.emit("[INFO]", Color::Blue, message);
    }

    /// Print a success line
    pub fn success(self, message: &str) {
        self.emit("[SUCCESS]", Color::Green, message);
    }

    /// Print a non-fatal warning line
    pub fn warning(self, message: &str) {
        self.emit("[WARNING]", Color::Yellow, message);
    }

    /// Print an error line
    pub fn error(self, message: &str) {
        self.emit("[ERROR]", Color::Red, message);
    }

    /// Print an untagged line
    pub fn plain_line(self, message: &str) {
        if !self.quiet {
            println!("{message}");
        }
    }
}

/// Final result of a provisioning run
#[derive(Debug, Serialize)]
pub struct SetupSummary {
    /// Whether every gate passed
    pub success: bool,
    /// Failure reason, if any
    pub error: Option<String>,
    /// Service URL to open after a successful run
    pub endpoint: String,
    /// Notebook to open after a successful run
    pub notebook: String,
    /// Per-step outcomes, in execution order
    pub steps: Vec<StepRecord>,
}

impl SetupSummary {
    /// Render the summary based on output mode
    pub fn render(&self, mode: OutputMode, console: Console) {
        match mode {
            OutputMode::Human => self.render_human(console),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self, console: Console) {
        if self.success {
            console.plain_line(&format!("\n{}", "=".repeat(42)));
            console.success("Setup completed successfully!");
            console.plain_line(&"=".repeat(42));
            console.plain_line("\nNext steps:");
            console.plain_line("1. Open your web browser");
            console.plain_line(&format!("2. Navigate to: {}", self.endpoint));
            console.plain_line(&format!("3. Open '{}'", self.notebook));
            console.plain_line("4. Run the notebook cells to perform the analysis");
            console.plain_line("\nTo stop the environment later, run:");
            console.plain_line("  labup down");
        } else if let Some(reason) = &self.error {
            console.error(&format!("Setup failed: {reason}"));
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}

/// Result of the static precondition validator
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    /// Whether the notebook parsed and every expected file exists
    pub passed: bool,
    /// Notebook well-formedness result
    pub notebook: NotebookReport,
    /// Per-file existence results
    pub files: Vec<FileReport>,
}

/// Notebook well-formedness result
#[derive(Debug, Serialize)]
pub struct NotebookReport {
    /// Path that was checked
    pub path: String,
    /// Whether the document parsed as JSON
    pub valid: bool,
    /// Parse or read error, when invalid
    pub error: Option<String>,
}

/// Existence result for one expected file
#[derive(Debug, Serialize)]
pub struct FileReport {
    /// Path that was checked
    pub path: String,
    /// Whether the file exists
    pub exists: bool,
}

impl ValidationReport {
    /// Render the report based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        if self.notebook.valid {
            println!("ok: notebook '{}' is well-formed JSON", self.notebook.path);
        } else {
            let detail = self.notebook.error.as_deref().unwrap_or("unknown error");
            println!("FAIL: notebook '{}': {detail}", self.notebook.path);
        }

        println!("\nExpected data files:");
        for file in &self.files {
            if file.exists {
                println!("  found: {}", file.path);
            } else {
                println!("  MISSING: {}", file.path);
            }
        }

        println!();
        if self.passed {
            println!("All checks passed. The notebook should be ready to run.");
        } else {
            println!("Some checks failed. Fix the issues above and re-run.");
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}
