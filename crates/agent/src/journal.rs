//! Evaluation journals.
//!
//! Every [`EvaluationResult`] is handed to each configured [`Journal`] in
//! sample order. [`TracingJournal`] turns it into structured log events;
//! [`JsonlJournal`] appends one JSON object per line to a writer.

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use roadwatch_core::{AlertEvent, EvaluationResult};
use serde::Serialize;

use crate::error::AgentError;

/// Position of an evaluation within the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepInfo {
    /// 1-based count of samples evaluated so far.
    pub step: u64,
    /// Number of completed passes over the dataset when the sample was read.
    pub cycle: u64,
}

pub trait Journal {
    fn record(&mut self, info: StepInfo, result: &EvaluationResult) -> io::Result<()>;
}

// ---------------------------------------------------------------------------
// TracingJournal
// ---------------------------------------------------------------------------

/// Logs each evaluation through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingJournal;

impl Journal for TracingJournal {
    fn record(&mut self, info: StepInfo, result: &EvaluationResult) -> io::Result<()> {
        tracing::info!(
            step = info.step,
            cycle = info.cycle,
            speed = result.speed,
            temperature = result.temperature,
            rate = result.rate,
            acceleration = result.acceleration,
            risk = result.risk,
            "Sample evaluated",
        );

        for event in &result.events {
            match event {
                AlertEvent::Overspeed { speed } => {
                    tracing::warn!(step = info.step, speed, "Overspeed alert");
                }
                AlertEvent::PredictiveHeat { risk } => {
                    tracing::warn!(step = info.step, risk, "Predictive overheat alert");
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JsonlJournal
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct JournalLine<'a> {
    #[serde(flatten)]
    info: StepInfo,
    recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    result: &'a EvaluationResult,
}

/// Append-only JSON Lines journal.
pub struct JsonlJournal<W: Write> {
    out: W,
}

impl JsonlJournal<BufWriter<std::fs::File>> {
    /// Open (or create) `path` for appending.
    pub fn open(path: &Path) -> Result<Self, AgentError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| AgentError::JournalInit {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::info!(path = %path.display(), "Journal opened");
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonlJournal<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Journal for JsonlJournal<W> {
    fn record(&mut self, info: StepInfo, result: &EvaluationResult) -> io::Result<()> {
        let line = JournalLine {
            info,
            recorded_at: Utc::now(),
            result,
        };
        serde_json::to_writer(&mut self.out, &line)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
