//! Stateful alert evaluator.
//!
//! [`AlertEvaluator`] consumes samples in order and decides, per sample,
//! whether the overspeed or predictive heat alert fires. Each alert is
//! guarded by its own [`Latch`] so a sustained condition raises exactly
//! one event per episode.
//!
//! The evaluator never fails and performs no I/O. Rendering and logging
//! are left to whoever consumes the [`EvaluationResult`].

use serde::Serialize;

use crate::alert::AlertEvent;
use crate::latch::Latch;
use crate::limits::AlertLimits;
use crate::risk::risk_score;
use crate::types::{Sample, Speed, Temperature};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Rolling state carried from one sample to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EvaluatorState {
    /// Temperature of the previous sample. `None` until the first sample
    /// has been seen, in which case that sample's own temperature is used.
    pub previous_temperature: Option<Temperature>,
    /// Rate of change computed for the previous sample.
    pub previous_rate: f64,
    pub overspeed: Latch,
    pub heat: Latch,
}

impl EvaluatorState {
    /// State as it would be after a sample at `temperature` with the given
    /// rate, both latches inactive.
    pub fn seeded(previous_temperature: Temperature, previous_rate: f64) -> Self {
        Self {
            previous_temperature: Some(previous_temperature),
            previous_rate,
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Everything derived from one sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub speed: Speed,
    pub temperature: Temperature,
    pub rate: f64,
    pub acceleration: f64,
    pub risk: f64,
    /// Alerts that fired on this sample, overspeed first. Empty on most
    /// samples.
    pub events: Vec<AlertEvent>,
}

impl EvaluationResult {
    pub fn has_alerts(&self) -> bool {
        !self.events.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Evaluator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AlertEvaluator {
    limits: AlertLimits,
    state: EvaluatorState,
}

impl AlertEvaluator {
    /// Create an evaluator with fresh state.
    pub fn new(limits: AlertLimits) -> Self {
        Self::with_state(limits, EvaluatorState::default())
    }

    /// Create an evaluator that resumes from an existing state.
    pub fn with_state(limits: AlertLimits, state: EvaluatorState) -> Self {
        Self { limits, state }
    }

    pub fn limits(&self) -> &AlertLimits {
        &self.limits
    }

    pub fn state(&self) -> &EvaluatorState {
        &self.state
    }

    /// Evaluate the next sample in sequence.
    ///
    /// Inputs are not validated. A NaN speed or risk compares false against
    /// both sides of its threshold and leaves the corresponding latch as it
    /// was.
    ///
    /// The first sample has no trend to extrapolate, so its risk is
    /// reported but never arms the heat latch.
    pub fn evaluate(&mut self, sample: Sample) -> EvaluationResult {
        let Sample { speed, temperature } = sample;
        let mut events = Vec::new();

        if speed > self.limits.speed_limit {
            if self.state.overspeed.arm() {
                events.push(AlertEvent::Overspeed { speed });
            }
        } else if speed <= self.limits.speed_limit {
            self.state.overspeed.release();
        }

        let has_history = self.state.previous_temperature.is_some();
        let previous_temperature = self.state.previous_temperature.unwrap_or(temperature);
        let rate = temperature - previous_temperature;
        let acceleration = rate - self.state.previous_rate;
        let risk = risk_score(temperature, rate, acceleration);

        if risk >= self.limits.risk_alert {
            if has_history && self.state.heat.arm() {
                events.push(AlertEvent::PredictiveHeat { risk });
            }
        } else if risk < self.limits.risk_alert {
            self.state.heat.release();
        }

        self.state.previous_temperature = Some(temperature);
        self.state.previous_rate = rate;

        EvaluationResult {
            speed,
            temperature,
            rate,
            acceleration,
            risk,
            events,
        }
    }
}

impl Default for AlertEvaluator {
    fn default() -> Self {
        Self::new(AlertLimits::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn sample(speed: f64, temperature: f64) -> Sample {
        Sample::new(speed, temperature)
    }

    #[test]
    fn first_sample_has_zero_derivatives() {
        let mut eval = AlertEvaluator::default();
        let result = eval.evaluate(sample(40.0, 60.0));
        assert_eq!(result.rate, 0.0);
        assert_eq!(result.acceleration, 0.0);
        assert_eq!(result.risk, 30.0);
        assert!(result.events.is_empty());
    }

    #[test]
    fn hot_first_sample_reports_risk_without_alert() {
        let mut eval = AlertEvaluator::default();
        let result = eval.evaluate(sample(0.0, 120.0));
        assert_eq!(result.rate, 0.0);
        assert_eq!(result.acceleration, 0.0);
        assert_eq!(result.risk, 60.0);
        assert!(result.events.is_empty());
        assert!(!eval.state().heat.is_active());
    }

    #[test]
    fn hot_second_sample_arms_heat() {
        let mut eval = AlertEvaluator::default();
        eval.evaluate(sample(0.0, 120.0));
        let result = eval.evaluate(sample(0.0, 120.0));
        assert_eq!(result.risk, 60.0);
        assert_eq!(result.events, vec![AlertEvent::PredictiveHeat { risk: 60.0 }]);
        assert!(eval.state().heat.is_active());
    }

    #[test]
    fn state_tracks_previous_sample() {
        let mut eval = AlertEvaluator::default();
        eval.evaluate(sample(10.0, 50.0));
        eval.evaluate(sample(10.0, 53.0));
        assert_eq!(eval.state().previous_temperature, Some(53.0));
        assert_eq!(eval.state().previous_rate, 3.0);
    }

    #[test]
    fn speed_at_limit_does_not_fire_and_clears() {
        let mut eval = AlertEvaluator::default();
        let first = eval.evaluate(sample(81.0, 40.0));
        assert_matches!(first.events.as_slice(), [AlertEvent::Overspeed { speed }] if *speed == 81.0);
        assert!(eval.state().overspeed.is_active());

        let at_limit = eval.evaluate(sample(80.0, 40.0));
        assert!(at_limit.events.is_empty());
        assert!(!eval.state().overspeed.is_active());
    }

    #[test]
    fn overspeed_not_repeated_while_latched() {
        let mut eval = AlertEvaluator::default();
        let fired: usize = [90.0, 95.0, 120.0, 85.0]
            .iter()
            .map(|&s| eval.evaluate(sample(s, 40.0)).events.len())
            .sum();
        assert_eq!(fired, 1);
    }

    #[test]
    fn seeded_state_predicts_heat() {
        let mut eval =
            AlertEvaluator::with_state(AlertLimits::default(), EvaluatorState::seeded(70.0, 0.0));
        let result = eval.evaluate(sample(50.0, 80.0));
        assert_eq!(result.rate, 10.0);
        assert_eq!(result.acceleration, 10.0);
        assert_eq!(result.risk, 190.0);
        assert_eq!(result.events, vec![AlertEvent::PredictiveHeat { risk: 190.0 }]);
        assert!(eval.state().heat.is_active());
    }

    #[test]
    fn both_alerts_on_one_sample_overspeed_first() {
        let mut eval =
            AlertEvaluator::with_state(AlertLimits::default(), EvaluatorState::seeded(70.0, 0.0));
        let result = eval.evaluate(sample(100.0, 80.0));
        assert_eq!(result.events.len(), 2);
        assert_matches!(result.events[0], AlertEvent::Overspeed { .. });
        assert_matches!(result.events[1], AlertEvent::PredictiveHeat { .. });
    }

    #[test]
    fn nan_speed_leaves_latch_untouched() {
        let mut eval = AlertEvaluator::default();
        eval.evaluate(sample(100.0, 40.0));
        let result = eval.evaluate(sample(f64::NAN, 40.0));
        assert!(result.events.is_empty());
        assert!(eval.state().overspeed.is_active());
    }

    #[test]
    fn negative_speed_is_accepted() {
        let mut eval = AlertEvaluator::default();
        let result = eval.evaluate(sample(-5.0, 40.0));
        assert_eq!(result.speed, -5.0);
        assert!(result.events.is_empty());
    }
}
