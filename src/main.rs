use anyhow::Context;
use fertilizer_probe::configuration::get_configuration;
use fertilizer_probe::probe::run_probe;
use fertilizer_probe::telemetry::{get_subscriber, init_subscriber};
use std::process::ExitCode;

// Logs go to stderr, so stdout carries nothing but the report.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let subscriber = get_subscriber("fertilizer-probe".into(), "warn".into(), std::io::stderr);
    init_subscriber(subscriber);

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let outcome = run_probe(&configuration, std::io::stdout()).await?;
    Ok(outcome.exit_code())
}
