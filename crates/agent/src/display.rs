//! Dashboard presentation.
//!
//! [`Presenter`] is the seam between the evaluation loop and whatever shows
//! the readings to the driver. [`ConsoleDisplay`] renders to any
//! [`Write`] target: a compact line in normal mode, a framed multi-line
//! screen with an audible cue when an alert fires.
//!
//! Presenters only consume results; they have no path back into the
//! evaluator.

use std::fs::OpenOptions;
use std::io::{self, Write};

use roadwatch_core::{AlertLimits, EvaluationResult};

use crate::config::DisplayTarget;
use crate::error::AgentError;

/// ASCII BEL, the terminal's audible cue.
const BELL: &str = "\x07";

const ALERT_RULE: &str = "================ ALERT ================";
const CLOSING_RULE: &str = "=======================================";

pub trait Presenter {
    /// Render a reading that raised no alert.
    fn show_normal(&mut self, result: &EvaluationResult) -> io::Result<()>;

    /// Render a reading that raised at least one alert.
    fn show_alert(&mut self, result: &EvaluationResult) -> io::Result<()>;

    /// Keep the last known reading on screen while no new sample is
    /// available.
    fn hold(&mut self) -> io::Result<()>;
}

pub struct ConsoleDisplay<W: Write> {
    out: W,
    limits: AlertLimits,
    bell: bool,
    last: Option<EvaluationResult>,
}

impl ConsoleDisplay<Box<dyn Write + Send>> {
    /// Open the configured display target.
    ///
    /// Files are opened in append mode. Failure here is fatal for the
    /// agent: nothing is evaluated without somewhere to show it.
    pub fn open(target: &DisplayTarget, limits: AlertLimits, bell: bool) -> Result<Self, AgentError> {
        let out: Box<dyn Write + Send> = match target {
            DisplayTarget::Stdout => Box::new(io::stdout()),
            DisplayTarget::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|source| AgentError::DisplayInit {
                        target: target.to_string(),
                        source,
                    })?;
                Box::new(file)
            }
        };
        tracing::info!(display = %target, bell, "Display ready");
        Ok(Self::new(out, limits, bell))
    }
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn new(out: W, limits: AlertLimits, bell: bool) -> Self {
        Self {
            out,
            limits,
            bell,
            last: None,
        }
    }

    /// The most recent reading that was shown, if any.
    pub fn last_shown(&self) -> Option<&EvaluationResult> {
        self.last.as_ref()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn readout(&self, result: &EvaluationResult) -> String {
        let marker = if result.temperature >= self.limits.temp_alert {
            " !"
        } else {
            ""
        };
        format!(
            "SPD {:>5.0} km/h | TEMP {:>5.1} C{marker}",
            result.speed, result.temperature
        )
    }
}

impl<W: Write> Presenter for ConsoleDisplay<W> {
    fn show_normal(&mut self, result: &EvaluationResult) -> io::Result<()> {
        writeln!(self.out, "{}", self.readout(result))?;
        self.out.flush()?;
        self.last = Some(result.clone());
        Ok(())
    }

    fn show_alert(&mut self, result: &EvaluationResult) -> io::Result<()> {
        if self.bell {
            write!(self.out, "{BELL}")?;
        }
        writeln!(self.out, "{ALERT_RULE}")?;
        for event in &result.events {
            writeln!(self.out, "  {event}")?;
        }
        writeln!(self.out, "  {}", self.readout(result))?;
        writeln!(
            self.out,
            "  limit {:.0} km/h | critical {:.0} C | risk {:.1}",
            self.limits.speed_limit, self.limits.temp_alert, result.risk
        )?;
        writeln!(self.out, "{CLOSING_RULE}")?;
        self.out.flush()?;
        self.last = Some(result.clone());
        Ok(())
    }

    fn hold(&mut self) -> io::Result<()> {
        let line = match &self.last {
            Some(last) => format!("{} (holding)", self.readout(last)),
            None => "waiting for telemetry...".to_string(),
        };
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
