//! Gated pipeline steps and the short-circuit runner
//!
//! A step is one unit of gated work in the provisioning sequence. Steps run
//! in order; the first failure (or an observed interrupt) causes every
//! remaining step to be recorded as skipped without executing.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use thiserror::Error;

/// Errors that end a pipeline run early
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    /// The process was interrupted (e.g. Ctrl-C)
    #[error("setup interrupted")]
    Interrupted,

    /// A step failed its gate
    #[error("step '{name}' failed: {reason}")]
    StepFailed {
        /// Name of the failing step
        name: String,
        /// Human-readable failure detail
        reason: String,
    },
}

/// Tri-state outcome of one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepOutcome {
    /// The gate passed
    Passed,
    /// The gate failed, halting the sequence
    Failed,
    /// Never executed because a prior gate failed or an interrupt was seen
    Skipped,
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Failed => write!(f, "failed"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

/// Recorded outcome of one step
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    /// Step name
    pub name: String,
    /// What happened to the step
    pub outcome: StepOutcome,
    /// Failure detail, when the step failed
    pub detail: Option<String>,
}

impl StepRecord {
    fn passed(name: &str) -> Self {
        Self {
            name: name.to_string(),
            outcome: StepOutcome::Passed,
            detail: None,
        }
    }

    fn failed(name: &str, detail: String) -> Self {
        Self {
            name: name.to_string(),
            outcome: StepOutcome::Failed,
            detail: Some(detail),
        }
    }

    fn skipped(name: &str) -> Self {
        Self {
            name: name.to_string(),
            outcome: StepOutcome::Skipped,
            detail: None,
        }
    }
}

/// One gated unit of work
pub struct Step<'a> {
    name: &'static str,
    action: Box<dyn Fn() -> anyhow::Result<()> + 'a>,
}

impl<'a> Step<'a> {
    /// Create a named step from a fallible action
    pub fn new(name: &'static str, action: impl Fn() -> anyhow::Result<()> + 'a) -> Self {
        Self {
            name,
            action: Box::new(action),
        }
    }

    /// Step name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for Step<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Run steps in order, short-circuiting on the first failure
///
/// The interrupt flag is consulted before each step, and again after a step
/// error so that an interrupt observed mid-step takes priority over the
/// step's own failure. Every step gets a record; steps after the halt point
/// are recorded as skipped and never execute.
pub fn run_steps<'a>(
    steps: Vec<Step<'a>>,
    interrupt: &AtomicBool,
) -> (Vec<StepRecord>, Result<(), PipelineError>) {
    let mut records = Vec::with_capacity(steps.len());
    let mut halt: Option<PipelineError> = None;

    for step in steps {
        if halt.is_some() {
            records.push(StepRecord::skipped(step.name));
            continue;
        }

        if interrupt.load(Ordering::SeqCst) {
            records.push(StepRecord::skipped(step.name));
            halt = Some(PipelineError::Interrupted);
            continue;
        }

        match (step.action)() {
            Ok(()) => records.push(StepRecord::passed(step.name)),
            Err(err) => {
                let reason = format!("{err:#}");
                log::debug!("step '{}' failed: {reason}", step.name);
                records.push(StepRecord::failed(step.name, reason.clone()));
                halt = Some(if interrupt.load(Ordering::SeqCst) {
                    PipelineError::Interrupted
                } else {
                    PipelineError::StepFailed {
                        name: step.name.to_string(),
                        reason,
                    }
                });
            },
        }
    }

    (records, halt.map_or(Ok(()), Err))
}
