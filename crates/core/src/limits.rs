//! Alert thresholds, fixed for the lifetime of a run.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default overspeed threshold in km/h. Alerts fire strictly above it.
pub const DEFAULT_SPEED_LIMIT: f64 = 80.0;

/// Default critical temperature reference in °C.
pub const DEFAULT_TEMP_ALERT: f64 = 95.0;

/// Default predictive heat threshold. Alerts fire at or above it.
pub const DEFAULT_RISK_ALERT: f64 = 55.0;

// ---------------------------------------------------------------------------
// AlertLimits
// ---------------------------------------------------------------------------

/// Thresholds consulted by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertLimits {
    /// Overspeed boundary (`speed > speed_limit` is overspeed).
    pub speed_limit: f64,
    /// Critical temperature reference. Informational only: shown by the
    /// display, never part of the risk formula.
    pub temp_alert: f64,
    /// Predictive heat boundary (`risk >= risk_alert` raises the alert).
    pub risk_alert: f64,
}

impl Default for AlertLimits {
    fn default() -> Self {
        Self {
            speed_limit: DEFAULT_SPEED_LIMIT,
            temp_alert: DEFAULT_TEMP_ALERT,
            risk_alert: DEFAULT_RISK_ALERT,
        }
    }
}

impl AlertLimits {
    /// Check that every limit is a finite number and the speed limit is
    /// not negative.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_finite(self.speed_limit, "speed_limit")?;
        validate_finite(self.temp_alert, "temp_alert")?;
        validate_finite(self.risk_alert, "risk_alert")?;
        if self.speed_limit < 0.0 {
            return Err(CoreError::Validation(format!(
                "speed_limit must not be negative, got {}",
                self.speed_limit
            )));
        }
        Ok(())
    }
}

fn validate_finite(value: f64, name: &str) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::Validation(format!(
            "{name} must be a finite number, got {value}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
