//! Alert event types emitted by the evaluator.

use std::fmt;

use serde::Serialize;

use crate::types::Speed;

/// Which latch produced an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Overspeed,
    PredictiveHeat,
}

impl AlertKind {
    /// Short uppercase label used on the display and in log lines.
    pub fn label(self) -> &'static str {
        match self {
            Self::Overspeed => "OVERSPEED",
            Self::PredictiveHeat => "OVERHEAT RISK",
        }
    }
}

/// A rising-edge alert together with the value that triggered it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlertEvent {
    /// Speed crossed above the configured limit.
    Overspeed { speed: Speed },
    /// Predicted overheating risk reached the alert threshold.
    PredictiveHeat { risk: f64 },
}

impl AlertEvent {
    pub fn kind(&self) -> AlertKind {
        match self {
            Self::Overspeed { .. } => AlertKind::Overspeed,
            Self::PredictiveHeat { .. } => AlertKind::PredictiveHeat,
        }
    }

    /// The numeric value carried by the event (speed or risk score).
    pub fn value(&self) -> f64 {
        match *self {
            Self::Overspeed { speed } => speed,
            Self::PredictiveHeat { risk } => risk,
        }
    }
}

impl fmt::Display for AlertEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overspeed { speed } => write!(f, "{}: {speed:.0} km/h", self.kind().label()),
            Self::PredictiveHeat { risk } => {
                write!(f, "{}: risk {risk:.1}", self.kind().label())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
