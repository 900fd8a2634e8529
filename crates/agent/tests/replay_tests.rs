//! End-to-end tests for the replay loop.
//!
//! Wires a [`Runner`] the way the binary does -- file-backed display, JSONL
//! journal -- and checks what lands on disk.

use std::time::Duration;

use roadwatch_agent::config::{AgentConfig, DisplayTarget};
use roadwatch_agent::display::ConsoleDisplay;
use roadwatch_agent::journal::{JsonlJournal, TracingJournal};
use roadwatch_agent::runner::Runner;
use roadwatch_agent::source::ReplaySource;
use roadwatch_core::dataset::{self, REFERENCE_LEN};
use roadwatch_core::{AlertEvaluator, AlertLimits, Sample};

fn read_journal(path: &std::path::Path) -> Vec<serde_json::Value> {
    std::fs::read_to_string(path)
        .expect("journal exists")
        .lines()
        .map(|l| serde_json::from_str(l).expect("journal line is JSON"))
        .collect()
}

// ---------------------------------------------------------------------------
// Test: reference drive, one pass
// ---------------------------------------------------------------------------

/// One pass over the built-in drive journals every sample in order and
/// shows at least one alert screen.
#[tokio::test]
async fn reference_drive_single_pass() {
    let dir = tempfile::tempdir().expect("temp dir");
    let display_path = dir.path().join("dash.txt");
    let journal_path = dir.path().join("journal.jsonl");

    let limits = AlertLimits::default();
    let display = ConsoleDisplay::open(&DisplayTarget::File(display_path.clone()), limits, false)
        .expect("display opens");
    let source = ReplaySource::new(dataset::reference_samples())
        .expect("reference drive is non-empty")
        .with_cycle_limit(Some(1));

    let summary = Runner::new(AlertEvaluator::new(limits), source, display)
        .with_journal(TracingJournal)
        .with_journal(JsonlJournal::open(&journal_path).expect("journal opens"))
        .run_until(Duration::from_millis(1), std::future::pending())
        .await;

    assert_eq!(summary.samples, REFERENCE_LEN as u64);
    assert_eq!(summary.completed_cycles, 1);
    assert_eq!(summary.overspeed_alerts, 2);
    assert!(summary.heat_alerts >= 1);

    let lines = read_journal(&journal_path);
    assert_eq!(lines.len(), REFERENCE_LEN);
    let steps: Vec<u64> = lines
        .iter()
        .map(|l| l["step"].as_u64().expect("numeric step"))
        .collect();
    assert_eq!(steps, (1..=REFERENCE_LEN as u64).collect::<Vec<_>>());
    assert_eq!(lines[0]["rate"], 0.0);
    assert_eq!(lines[0]["acceleration"], 0.0);

    let screen = std::fs::read_to_string(&display_path).expect("display file");
    assert!(screen.contains("ALERT"));
    assert!(screen.contains("OVERSPEED"));
}

// ---------------------------------------------------------------------------
// Test: replay keeps evaluator state
// ---------------------------------------------------------------------------

/// Across a wrap the journal keeps counting steps, tags the second pass
/// with cycle 1, and the first sample of the second pass is differenced
/// against the last sample of the first.
#[tokio::test]
async fn replay_continues_state_across_wrap() {
    let dir = tempfile::tempdir().expect("temp dir");
    let journal_path = dir.path().join("journal.jsonl");

    let samples = vec![Sample::new(90.0, 60.0), Sample::new(90.0, 64.0)];
    let source = ReplaySource::new(samples)
        .expect("non-empty")
        .with_cycle_limit(Some(2));
    let display = ConsoleDisplay::open(
        &DisplayTarget::File(dir.path().join("dash.txt")),
        AlertLimits::default(),
        false,
    )
    .expect("display opens");

    let summary = Runner::new(AlertEvaluator::default(), source, display)
        .with_journal(JsonlJournal::open(&journal_path).expect("journal opens"))
        .run_until(Duration::from_millis(1), std::future::pending())
        .await;

    // Speed stays above the limit the whole time: a single overspeed.
    assert_eq!(summary.overspeed_alerts, 1);

    let lines = read_journal(&journal_path);
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[2]["step"], 3);
    assert_eq!(lines[2]["cycle"], 1);
    assert_eq!(lines[2]["rate"], -4.0);
}

// ---------------------------------------------------------------------------
// Test: configuration drives the loop
// ---------------------------------------------------------------------------

/// A dataset file named in the configuration is loaded and its limits
/// applied.
#[tokio::test]
async fn configured_dataset_and_limits() {
    let dir = tempfile::tempdir().expect("temp dir");
    let dataset_path = dir.path().join("drive.json");
    std::fs::write(
        &dataset_path,
        r#"{"speed": [0, 60, 95], "temperature": [35, 80, 95]}"#,
    )
    .expect("write dataset");

    let dataset_str = dataset_path.display().to_string();
    let display_str = dir.path().join("dash.txt").display().to_string();
    let config = AgentConfig::from_lookup(|key| match key {
        "DATASET_PATH" => Some(dataset_str.clone()),
        "DISPLAY_TARGET" => Some(display_str.clone()),
        "SPEED_LIMIT" => Some("100".to_string()),
        "REPLAY_CYCLES" => Some("1".to_string()),
        "DISPLAY_BELL" => Some("false".to_string()),
        _ => None,
    })
    .expect("valid configuration");

    let samples = dataset::load_json(config.dataset_path.as_ref().expect("path set"))
        .expect("dataset loads");
    let display = ConsoleDisplay::open(&config.display_target, config.limits, config.display_bell)
        .expect("display opens");
    let source = ReplaySource::new(samples)
        .expect("non-empty")
        .with_cycle_limit(config.replay_cycles);

    let summary = Runner::new(AlertEvaluator::new(config.limits), source, display)
        .run_until(Duration::from_millis(1), std::future::pending())
        .await;

    assert_eq!(summary.samples, 3);
    // 95 km/h is under the raised limit.
    assert_eq!(summary.overspeed_alerts, 0);
    assert_eq!(summary.heat_alerts, 1);
    assert_eq!(summary.peak_risk, Some(715.0));
}
