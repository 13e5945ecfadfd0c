//! Container runtime port and docker CLI adapter
//!
//! The pipeline talks to the orchestration tool through the
//! [`ContainerRuntime`] trait so tests can substitute a scripted fake.
//! [`DockerCompose`] is the real adapter over the `docker` CLI.

use std::process::Command;

/// Captured result of one external command
#[derive(Debug, Clone)]
pub struct CmdOutput {
    /// Whether the command exited successfully
    pub success: bool,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

/// Container orchestration abstraction
///
/// Implementations wrap a container CLI (build/up/down/exec) plus the two
/// prerequisite probes (tool present, daemon running).
pub trait ContainerRuntime {
    /// Check that the runtime CLI is installed (`docker --version`)
    fn version(&self) -> anyhow::Result<CmdOutput>;

    /// Check that the runtime daemon is running (`docker info`)
    fn is_running(&self) -> anyhow::Result<CmdOutput>;

    /// Build the environment image (`docker compose build`)
    fn build(&self) -> anyhow::Result<CmdOutput>;

    /// Start services detached (`docker compose up -d`)
    fn up(&self) -> anyhow::Result<CmdOutput>;

    /// Stop and remove services (`docker compose down`)
    fn down(&self) -> anyhow::Result<CmdOutput>;

    /// Run a shell command inside a service container
    fn exec(&self, service: &str, command: &str) -> anyhow::Result<CmdOutput>;
}

/// The docker CLI adapter
#[derive(Debug, Clone, Copy, Default)]
pub struct DockerCompose;

impl DockerCompose {
    /// Create the adapter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn run(args: &[&str]) -> anyhow::Result<CmdOutput> {
        log::debug!("running: docker {}", args.join(" "));
        let output = Command::new("docker").args(args).output()?;
        Ok(CmdOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

impl ContainerRuntime for DockerCompose {
    fn version(&self) -> anyhow::Result<CmdOutput> {
        Self::run(&["--version"])
    }

    fn is_running(&self) -> anyhow::Result<CmdOutput> {
        Self::run(&["info"])
    }

    fn build(&self) -> anyhow::Result<CmdOutput> {
        Self::run(&["compose", "build"])
    }

    fn up(&self) -> anyhow::Result<CmdOutput> {
        Self::run(&["compose", "up", "-d"])
    }

    fn down(&self) -> anyhow::Result<CmdOutput> {
        Self::run(&["compose", "down"])
    }

    fn exec(&self, service: &str, command: &str) -> anyhow::Result<CmdOutput> {
        Self::run(&["compose", "exec", service, "bash", "-c", command])
    }
}
