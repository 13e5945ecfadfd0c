//! Run the full provisioning sequence

use std::env;
use std::time::Duration;

use labup::config::SetupConfig;
use labup::interrupt;
use labup::output::{Console, OutputMode, SetupSummary};
use labup::pipeline::SetupPipeline;
use labup::probe::HttpProbe;
use labup::runtime::DockerCompose;

/// Provision the notebook environment end to end
pub fn up(config: &SetupConfig, console: Console, mode: OutputMode) -> anyhow::Result<()> {
    console.plain_line(&"=".repeat(42));
    console.plain_line("labup: automated environment setup");
    console.plain_line(&format!("{}\n", "=".repeat(42)));

    let interrupt = interrupt::install()?;
    let runtime = DockerCompose::new();
    let probe = HttpProbe::new(
        &config.endpoint.url,
        Duration::from_secs(config.endpoint.probe_timeout_secs),
    )?;
    let base_dir = env::current_dir()?;

    let pipeline = SetupPipeline::new(
        config,
        &base_dir,
        console,
        &runtime,
        &probe,
        interrupt.as_ref(),
    );
    let outcome = pipeline.run();

    let summary = SetupSummary {
        success: outcome.success(),
        error: outcome.error.as_ref().map(ToString::to_string),
        endpoint: config.endpoint.url.clone(),
        notebook: config.notebook.path.display().to_string(),
        steps: outcome.steps,
    };
    summary.render(mode, console);

    if !summary.success {
        std::process::exit(1);
    }

    Ok(())
}
