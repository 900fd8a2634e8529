//! Agent configuration, read once from the environment at startup.
//!
//! | Variable             | Default  | Description                                   |
//! |----------------------|----------|-----------------------------------------------|
//! | `SPEED_LIMIT`        | `80`     | Overspeed threshold in km/h                   |
//! | `TEMP_ALERT`         | `95`     | Critical temperature reference in °C          |
//! | `RISK_ALERT`         | `55`     | Predictive heat threshold                     |
//! | `SAMPLE_INTERVAL_MS` | `1000`   | Milliseconds between samples                  |
//! | `DATASET_PATH`       | --       | JSON dataset; built-in drive when unset       |
//! | `REPLAY_CYCLES`      | `0`      | Passes over the dataset, `0` replays forever  |
//! | `DISPLAY_TARGET`     | `stdout` | `stdout` or a file path                       |
//! | `DISPLAY_BELL`       | `true`   | Ring the terminal bell on alerts              |
//! | `JOURNAL_PATH`       | --       | Append-only JSONL journal                     |
//! | `LOG_FORMAT`         | `text`   | `text` or `json`                              |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use roadwatch_core::limits::{DEFAULT_RISK_ALERT, DEFAULT_SPEED_LIMIT, DEFAULT_TEMP_ALERT};
use roadwatch_core::AlertLimits;

use crate::error::AgentError;

/// Default pacing between samples.
const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 1000;

/// Where the display renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayTarget {
    Stdout,
    File(PathBuf),
}

impl DisplayTarget {
    fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "stdout" | "-" => Self::Stdout,
            path => Self::File(PathBuf::from(path)),
        }
    }
}

impl std::fmt::Display for DisplayTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(AgentError::Config(format!(
                "LOG_FORMAT must be 'text' or 'json', got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub limits: AlertLimits,
    pub sample_interval: Duration,
    pub dataset_path: Option<PathBuf>,
    /// `None` replays the dataset forever.
    pub replay_cycles: Option<u64>,
    pub display_target: DisplayTarget,
    pub display_bell: bool,
    pub journal_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl AgentConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, AgentError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AgentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let limits = AlertLimits {
            speed_limit: parse_or(&lookup, "SPEED_LIMIT", DEFAULT_SPEED_LIMIT)?,
            temp_alert: parse_or(&lookup, "TEMP_ALERT", DEFAULT_TEMP_ALERT)?,
            risk_alert: parse_or(&lookup, "RISK_ALERT", DEFAULT_RISK_ALERT)?,
        };
        limits.validate()?;

        let interval_ms: u64 = parse_or(&lookup, "SAMPLE_INTERVAL_MS", DEFAULT_SAMPLE_INTERVAL_MS)?;
        if interval_ms == 0 {
            return Err(AgentError::Config(
                "SAMPLE_INTERVAL_MS must be greater than zero".into(),
            ));
        }

        let replay_cycles: u64 = parse_or(&lookup, "REPLAY_CYCLES", 0)?;

        let log_format = match non_empty(&lookup, "LOG_FORMAT") {
            Some(raw) => raw.parse::<LogFormat>()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            limits,
            sample_interval: Duration::from_millis(interval_ms),
            dataset_path: non_empty(&lookup, "DATASET_PATH").map(PathBuf::from),
            replay_cycles: (replay_cycles > 0).then_some(replay_cycles),
            display_target: non_empty(&lookup, "DISPLAY_TARGET")
                .map(|raw| DisplayTarget::parse(&raw))
                .unwrap_or(DisplayTarget::Stdout),
            display_bell: parse_bool_or(&lookup, "DISPLAY_BELL", true)?,
            journal_path: non_empty(&lookup, "JOURNAL_PATH").map(PathBuf::from),
            log_format,
        })
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AgentError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match non_empty(lookup, key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AgentError::Config(format!("{key} must be a number, got '{raw}'"))),
        None => Ok(default),
    }
}

fn parse_bool_or<F>(lookup: &F, key: &str, default: bool) -> Result<bool, AgentError>
where
    F: Fn(&str) -> Option<String>,
{
    match non_empty(lookup, key) {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(AgentError::Config(format!(
                "{key} must be true or false, got '{raw}'"
            ))),
        },
        None => Ok(default),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
