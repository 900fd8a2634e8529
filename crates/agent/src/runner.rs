//! The evaluation loop.
//!
//! [`Runner`] owns the single [`AlertEvaluator`] of a run together with its
//! sample source and output collaborators. Each [`step`](Runner::step)
//! pulls one sample, evaluates it, and fans the result out to the presenter
//! and the journals before the next sample is read. [`run`](Runner::run)
//! paces steps on a fixed interval until the source finishes or the
//! process receives Ctrl-C.

use std::future::Future;
use std::time::Duration;

use roadwatch_core::{AlertEvaluator, AlertKind, EvaluationResult};
use serde::Serialize;

use crate::display::Presenter;
use crate::journal::{Journal, StepInfo};
use crate::source::{Poll, ReplaySource};

/// Counters accumulated over a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub samples: u64,
    pub overspeed_alerts: u64,
    pub heat_alerts: u64,
    pub completed_cycles: u64,
    /// Highest risk score seen, `None` before the first sample.
    pub peak_risk: Option<f64>,
}

impl RunSummary {
    fn absorb(&mut self, result: &EvaluationResult) {
        self.samples += 1;
        for event in &result.events {
            match event.kind() {
                AlertKind::Overspeed => self.overspeed_alerts += 1,
                AlertKind::PredictiveHeat => self.heat_alerts += 1,
            }
        }
        self.peak_risk = Some(match self.peak_risk {
            Some(peak) => peak.max(result.risk),
            None => result.risk,
        });
    }
}

/// What a single step did.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Evaluated(EvaluationResult),
    /// The dataset wrapped; the display held its last reading.
    Held,
    Finished,
}

pub struct Runner<P: Presenter> {
    evaluator: AlertEvaluator,
    source: ReplaySource,
    presenter: P,
    journals: Vec<Box<dyn Journal + Send>>,
    summary: RunSummary,
}

impl<P: Presenter> Runner<P> {
    pub fn new(evaluator: AlertEvaluator, source: ReplaySource, presenter: P) -> Self {
        Self {
            evaluator,
            source,
            presenter,
            journals: Vec::new(),
            summary: RunSummary::default(),
        }
    }

    /// Add a journal that receives every evaluation.
    pub fn with_journal(mut self, journal: impl Journal + Send + 'static) -> Self {
        self.journals.push(Box::new(journal));
        self
    }

    pub fn evaluator(&self) -> &AlertEvaluator {
        &self.evaluator
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Process one poll of the source.
    ///
    /// Presenter and journal failures are logged and do not stop the run;
    /// evaluator state has already advanced by then.
    pub fn step(&mut self) -> StepOutcome {
        let cycle = self.source.completed_cycles();

        match self.source.poll() {
            Poll::Sample(sample) => {
                let result = self.evaluator.evaluate(sample);
                self.summary.absorb(&result);
                self.present(&result);
                self.journal(
                    StepInfo {
                        step: self.summary.samples,
                        cycle,
                    },
                    &result,
                );
                StepOutcome::Evaluated(result)
            }
            Poll::Exhausted { completed_cycles } => {
                self.summary.completed_cycles = completed_cycles;
                tracing::debug!(completed_cycles, "Dataset exhausted, replaying from start");
                if let Err(e) = self.presenter.hold() {
                    tracing::warn!(error = %e, "Display hold failed");
                }
                StepOutcome::Held
            }
            Poll::Finished => {
                self.summary.completed_cycles = self.source.completed_cycles();
                StepOutcome::Finished
            }
        }
    }

    fn present(&mut self, result: &EvaluationResult) {
        let shown = if result.has_alerts() {
            self.presenter.show_alert(result)
        } else {
            self.presenter.show_normal(result)
        };
        if let Err(e) = shown {
            tracing::warn!(error = %e, "Display update failed");
        }
    }

    fn journal(&mut self, info: StepInfo, result: &EvaluationResult) {
        for journal in &mut self.journals {
            if let Err(e) = journal.record(info, result) {
                tracing::warn!(step = info.step, error = %e, "Journal write failed");
            }
        }
    }

    /// Step on every tick of `interval` until the source finishes or
    /// Ctrl-C is received.
    pub async fn run(self, interval: Duration) -> RunSummary {
        self.run_until(interval, ctrl_c()).await
    }

    /// Step on every tick of `interval` until the source finishes or
    /// `shutdown` resolves. The first tick fires immediately.
    pub async fn run_until<F>(mut self, interval: Duration, shutdown: F) -> RunSummary
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(interval);
        tokio::pin!(shutdown);

        tracing::info!(
            samples = self.source.samples_per_cycle(),
            interval = ?interval,
            "Evaluation loop started",
        );

        loop {
            // A pending shutdown takes priority over the next tick.
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    tracing::info!("Shutdown requested");
                    break;
                }
                _ = ticker.tick() => {
                    if self.step() == StepOutcome::Finished {
                        tracing::info!("Replay budget spent");
                        break;
                    }
                }
            }
        }

        self.summary
    }
}

/// Resolves on Ctrl-C. If the handler cannot be installed it never
/// resolves, leaving the cycle budget as the only way out.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Ctrl-C handler unavailable");
        std::future::pending::<()>().await;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
