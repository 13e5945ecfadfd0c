//! Stop the environment

use labup::output::{Console, OperationResult, OutputMode};
use labup::runtime::{ContainerRuntime, DockerCompose};

/// Stop and remove the environment's services
pub fn down(console: Console, mode: OutputMode) -> anyhow::Result<()> {
    console.status("Stopping the environment...");

    let runtime = DockerCompose::new();
    let output = runtime.down()?;

    if !output.success {
        let stderr = output.stderr.trim();
        anyhow::bail!(
            "failed to stop the environment: {}",
            if stderr.is_empty() { "command exited with failure" } else { stderr }
        );
    }

    let result = OperationResult {
        success: true,
        message: "Environment stopped".to_string(),
    };
    match mode {
        OutputMode::Human => console.success(&result.message),
        OutputMode::Json => result.render(mode),
    }

    Ok(())
}
