//! `roadwatch-agent` -- predictive alert loop for a simulated vehicle.
//!
//! Replays a speed/temperature dataset through the alert evaluator,
//! renders each reading on the dashboard display and journals every
//! evaluation. See [`roadwatch_agent::config`] for the environment
//! variables it reads.

use roadwatch_agent::config::{AgentConfig, LogFormat};
use roadwatch_agent::display::ConsoleDisplay;
use roadwatch_agent::error::AgentError;
use roadwatch_agent::journal::{JsonlJournal, TracingJournal};
use roadwatch_agent::runner::Runner;
use roadwatch_agent::source::ReplaySource;
use roadwatch_core::{dataset, AlertEvaluator};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();

    let config = AgentConfig::from_env();
    init_tracing(
        config
            .as_ref()
            .map(|c| c.log_format)
            .unwrap_or_default(),
    );

    let config = config.unwrap_or_else(|e| {
        tracing::error!(error = %e, "Configuration rejected");
        std::process::exit(1);
    });

    tracing::info!(
        speed_limit = config.limits.speed_limit,
        temp_alert = config.limits.temp_alert,
        risk_alert = config.limits.risk_alert,
        interval = ?config.sample_interval,
        replay_cycles = config.replay_cycles,
        "Starting roadwatch-agent",
    );

    let runner = build_runner(&config).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Startup failed");
        std::process::exit(1);
    });

    let summary = runner.run(config.sample_interval).await;

    tracing::info!(
        samples = summary.samples,
        overspeed_alerts = summary.overspeed_alerts,
        heat_alerts = summary.heat_alerts,
        completed_cycles = summary.completed_cycles,
        peak_risk = summary.peak_risk,
        "Run complete",
    );
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "roadwatch_agent=info,roadwatch_core=info".into());

    let (text, json) = match format {
        LogFormat::Text => (Some(tracing_subscriber::fmt::layer()), None),
        LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(text)
        .with(json)
        .init();
}

/// Wire dataset, display and journals together. The display is opened
/// before anything is evaluated so a missing screen aborts startup.
fn build_runner(
    config: &AgentConfig,
) -> Result<Runner<ConsoleDisplay<Box<dyn std::io::Write + Send>>>, AgentError> {
    let samples = match &config.dataset_path {
        Some(path) => dataset::load_json(path)?,
        None => dataset::reference_samples(),
    };
    let origin = config
        .dataset_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in".to_string());
    tracing::info!(samples = samples.len(), origin = %origin, "Dataset ready");

    let display = ConsoleDisplay::open(&config.display_target, config.limits, config.display_bell)?;

    let source = ReplaySource::new(samples)?.with_cycle_limit(config.replay_cycles);
    let mut runner = Runner::new(AlertEvaluator::new(config.limits), source, display)
        .with_journal(TracingJournal);

    if let Some(path) = &config.journal_path {
        runner = runner.with_journal(JsonlJournal::open(path)?);
    }

    Ok(runner)
}
