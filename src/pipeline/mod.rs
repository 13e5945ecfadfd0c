//! Readiness-gated provisioning sequence
//!
//! The pipeline executes an ordered sequence of pass/fail gates: check the
//! container runtime, check input data, build the image, start services,
//! poll for service readiness, extract data in the container, and verify
//! the produced artifacts. The first failing gate halts the sequence, and
//! any failure or interruption triggers exactly one best-effort cleanup
//! (stopping the environment).

pub mod poll;
pub mod step;

use std::fmt;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use thiserror::Error;

use crate::config::SetupConfig;
use crate::data;
use crate::output::Console;
use crate::probe::Probe;
use crate::runtime::{CmdOutput, ContainerRuntime};
use poll::{PollError, ReadinessPoll};
use step::{PipelineError, Step, StepRecord, run_steps};

/// Failures detected by individual pipeline gates
#[derive(Debug, Error)]
pub enum SetupError {
    /// The container runtime CLI is not available
    #[error("container runtime is not installed (install Docker Desktop and retry)")]
    RuntimeMissing,

    /// The container runtime daemon is not running
    #[error("container runtime is not running (start Docker Desktop and retry)")]
    RuntimeStopped,

    /// No configured dataset is fully present on disk
    #[error("no input dataset found (place the data files next to labup.toml and retry)")]
    DataMissing,

    /// An external command exited with failure
    #[error("`{command}` failed: {detail}")]
    CommandFailed {
        /// The command that failed
        command: String,
        /// Captured stderr or a generic exit description
        detail: String,
    },

    /// The service never became reachable within the poll bound
    #[error("service at {url} did not become ready after {attempts} attempts")]
    ReadinessTimeout {
        /// Probed URL
        url: String,
        /// Attempts used
        attempts: u32,
    },

    /// The run was interrupted mid-step
    #[error("interrupted")]
    Interrupted,
}

/// Result of a full pipeline run
#[derive(Debug)]
pub struct SetupOutcome {
    /// Per-step records in execution order
    pub steps: Vec<StepRecord>,
    /// Why the run stopped, if it did not complete
    pub error: Option<PipelineError>,
}

impl SetupOutcome {
    /// Whether every gate passed
    #[must_use]
    pub const fn success(&self) -> bool {
        self.error.is_none()
    }
}

/// The provisioning pipeline
pub struct SetupPipeline<'a> {
    config: &'a SetupConfig,
    base_dir: &'a std::path::Path,
    console: Console,
    runtime: &'a dyn ContainerRuntime,
    probe: &'a dyn Probe,
    interrupt: &'a AtomicBool,
}

impl fmt::Debug for SetupPipeline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetupPipeline")
            .field("config", &self.config)
            .field("base_dir", &self.base_dir)
            .finish_non_exhaustive()
    }
}

impl<'a> SetupPipeline<'a> {
    /// Assemble a pipeline over the given collaborators
    #[must_use]
    pub const fn new(
        config: &'a SetupConfig,
        base_dir: &'a std::path::Path,
        console: Console,
        runtime: &'a dyn ContainerRuntime,
        probe: &'a dyn Probe,
        interrupt: &'a AtomicBool,
    ) -> Self {
        Self {
            config,
            base_dir,
            console,
            runtime,
            probe,
            interrupt,
        }
    }

    /// Run the full sequence
    ///
    /// This is the single place where lower-level failures are translated
    /// into an explicit result: every gate error, interrupt included, ends
    /// up in the returned [`SetupOutcome`], never as a panic or an escaped
    /// error. Cleanup runs exactly once on any failure path.
    pub fn run(&self) -> SetupOutcome {
        let steps = vec![
            Step::new("container runtime", || Ok(self.check_runtime()?)),
            Step::new("input data", || Ok(self.check_data()?)),
            Step::new("build environment", || Ok(self.build_environment()?)),
            Step::new("start services", || Ok(self.start_services()?)),
            Step::new("service readiness", || Ok(self.wait_for_service()?)),
            Step::new("extract data", || Ok(self.extract_data()?)),
            Step::new("verify artifacts", || Ok(self.verify_artifacts()?)),
        ];

        let (records, result) = run_steps(steps, self.interrupt);
        let error = result.err();
        if error.is_some() {
            self.cleanup();
        }
        SetupOutcome {
            steps: records,
            error,
        }
    }

    fn check_runtime(&self) -> Result<(), SetupError> {
        self.console.status("Checking container runtime...");

        let version = self.runtime.version().map_err(|err| {
            log::debug!("runtime version probe failed: {err:#}");
            SetupError::RuntimeMissing
        })?;
        if !version.success {
            return Err(SetupError::RuntimeMissing);
        }

        let info = self.runtime.is_running().map_err(|_| SetupError::RuntimeStopped)?;
        if !info.success {
            return Err(SetupError::RuntimeStopped);
        }

        self.console
            .success(&format!("Container runtime is ready ({})", version.stdout.trim()));
        Ok(())
    }

    fn check_data(&self) -> Result<(), SetupError> {
        self.console.status("Checking for input data...");

        let availability = data::check_datasets(&self.config.data, self.base_dir);
        for dataset in &availability.datasets {
            if dataset.present {
                self.console.success(&format!("Found {}", dataset.name));
            } else {
                let missing: Vec<String> =
                    dataset.missing.iter().map(|p| p.display().to_string()).collect();
                self.console
                    .warning(&format!("Missing {}: {}", dataset.name, missing.join(", ")));
            }
        }

        if availability.any_present() {
            Ok(())
        } else {
            Err(SetupError::DataMissing)
        }
    }

    fn build_environment(&self) -> Result<(), SetupError> {
        self.console.status("Building the environment image...");
        gate(self.runtime.build(), "docker compose build")?;
        self.console.success("Environment image built");
        Ok(())
    }

    fn start_services(&self) -> Result<(), SetupError> {
        self.console.status("Starting services...");

        // Stop any previous instance so the start is idempotent
        if let Err(err) = self.runtime.down() {
            log::debug!("pre-start down failed (ignored): {err:#}");
        }

        gate(self.runtime.up(), "docker compose up -d")?;
        self.console.success("Services started");
        Ok(())
    }

    fn wait_for_service(&self) -> Result<(), SetupError> {
        let endpoint = &self.config.endpoint;
        self.console
            .status(&format!("Waiting for the notebook service at {}...", endpoint.url));

        let poll = ReadinessPoll::new(
            endpoint.max_attempts,
            Duration::from_secs(endpoint.poll_interval_secs),
        );
        let result = poll.run(
            |attempt| {
                if self.probe.is_reachable() {
                    true
                } else {
                    self.console.status(&format!(
                        "waiting... (attempt {attempt}/{})",
                        endpoint.max_attempts
                    ));
                    false
                }
            },
            self.interrupt,
        );

        match result {
            Ok(attempt) => {
                log::debug!("service reachable on attempt {attempt}");
                self.console.success("Notebook service is ready");
                Ok(())
            },
            Err(PollError::Interrupted) => Err(SetupError::Interrupted),
            Err(PollError::Exhausted(attempts)) => Err(SetupError::ReadinessTimeout {
                url: endpoint.url.clone(),
                attempts,
            }),
        }
    }

    fn extract_data(&self) -> Result<(), SetupError> {
        self.console.status("Extracting data files...");

        let compose = &self.config.compose;
        let command = format!("cd '{}' && {}", compose.workdir, compose.extract_command);
        gate(self.runtime.exec(&compose.service, &command), "data extraction")?;

        self.console.success("Data extracted");
        Ok(())
    }

    fn verify_artifacts(&self) -> Result<(), SetupError> {
        self.console.status("Verifying setup...");
        let compose = &self.config.compose;

        let results_check =
            format!("[ -d '{}/{}' ]", compose.workdir, compose.results_dir);
        if exec_ok(self.runtime.exec(&compose.service, &results_check)) {
            self.console.success("Data directories created");
        } else {
            self.console
                .warning("Data directories not found - extraction may have failed");
        }

        let notebook = self.config.notebook.path.display();
        let notebook_check = format!("[ -f '{}/{notebook}' ]", compose.workdir);
        if exec_ok(self.runtime.exec(&compose.service, &notebook_check)) {
            self.console.success("Analysis notebook found");
        } else {
            self.console.warning("Analysis notebook not found");
        }

        // Missing artifacts are reported but never gate the run
        Ok(())
    }

    fn cleanup(&self) {
        self.console.warning("Cleaning up: stopping the environment...");
        if let Err(err) = self.runtime.down() {
            log::debug!("cleanup down failed (ignored): {err:#}");
        }
    }
}

/// Turn a command result into a gate failure with captured detail
fn gate(result: anyhow::Result<CmdOutput>, command: &str) -> Result<CmdOutput, SetupError> {
    let output = result.map_err(|err| SetupError::CommandFailed {
        command: command.to_string(),
        detail: format!("{err:#}"),
    })?;
    if output.success {
        Ok(output)
    } else {
        let stderr = output.stderr.trim();
        Err(SetupError::CommandFailed {
            command: command.to_string(),
            detail: if stderr.is_empty() {
                "command exited with failure".to_string()
            } else {
                stderr.to_string()
            },
        })
    }
}

fn exec_ok(result: anyhow::Result<CmdOutput>) -> bool {
    result.map(|out| out.success).unwrap_or(false)
}
