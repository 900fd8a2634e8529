//! Linear overheating risk heuristic.
//!
//! `risk = temperature * 0.5 + rate * 5.0 + acceleration * 10.0`
//!
//! The absolute temperature term means a hot but stable engine can hold the
//! score above the alert threshold with no rise at all.

/// Weight of the absolute temperature.
pub const TEMPERATURE_WEIGHT: f64 = 0.5;

/// Weight of the first difference (°C per sample).
pub const RATE_WEIGHT: f64 = 5.0;

/// Weight of the second difference.
pub const ACCELERATION_WEIGHT: f64 = 10.0;

/// Compute the risk score for one sample.
pub fn risk_score(temperature: f64, rate: f64, acceleration: f64) -> f64 {
    temperature * TEMPERATURE_WEIGHT + rate * RATE_WEIGHT + acceleration * ACCELERATION_WEIGHT
}
