//! Application entry point and dispatch.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use rfi_cli::output::{format_duration, write_json_report, JsonReport};
use rfi_cli::presenter::CliComparisonPresenter;
use rfi_cli::ui::{is_color_disabled, RunSpinner};
use rfi_client::HttpSimulationClient;
use rfi_core::ScenarioLabel;
use rfi_orchestration::{ComparisonOrchestrator, ComparisonPresenter, ComparisonResult};

use crate::config::AppConfig;
use crate::version::full_version;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        rfi_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let result = runtime.block_on(run_comparison(config))?;
    report(config, &result)
}

async fn run_comparison(config: &AppConfig) -> Result<Arc<ComparisonResult>> {
    let scenario_a = config
        .scenario(ScenarioLabel::A)
        .context("scenario A")?;
    let scenario_b = config
        .scenario(ScenarioLabel::B)
        .context("scenario B")?;

    let policy = config.request_policy();
    debug!(backend = %config.backend_url, ?policy, "creating simulation client");
    let client = HttpSimulationClient::with_policy(config.backend_url.as_str(), policy)?;
    let orchestrator = ComparisonOrchestrator::with_scenarios(client, scenario_a, scenario_b);

    let spinner = RunSpinner::start(
        "Running dynamic and aggregate simulations for A and B",
        config.quiet || config.json,
    );

    let run = orchestrator.run();
    tokio::pin!(run);
    let outcome = tokio::select! {
        outcome = &mut run => outcome,
        Ok(()) = tokio::signal::ctrl_c() => {
            spinner.set_message("Cancelling");
            orchestrator.cancel();
            run.await
        }
    };

    let elapsed = spinner.elapsed();
    spinner.finish();
    let result = outcome?;
    info!(elapsed = %format_duration(elapsed), "comparison complete");
    Ok(result)
}

fn report(config: &AppConfig, result: &ComparisonResult) -> Result<()> {
    if config.json {
        let json = JsonReport::new(result)
            .to_json()
            .context("failed to serialize report")?;
        println!("{json}");
    } else {
        if config.verbose {
            println!("{}", full_version());
        }
        CliComparisonPresenter::new(config.verbose, config.quiet)
            .with_color(!is_color_disabled())
            .present_comparison(result);
    }

    if let Some(ref path) = config.output {
        write_json_report(path, result)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
    }
    Ok(())
}
