//! `roadwatch-core` -- predictive alert logic for vehicle telemetry.
//!
//! Everything in this crate is pure: the [`evaluator`] turns a stream of
//! speed/temperature [`Sample`](types::Sample)s into alert decisions and
//! the caller decides what to render or log. The only I/O is the
//! optional JSON dataset loader in [`dataset`].

pub mod alert;
pub mod dataset;
pub mod error;
pub mod evaluator;
pub mod latch;
pub mod limits;
pub mod risk;
pub mod types;

pub use alert::{AlertEvent, AlertKind};
pub use error::CoreError;
pub use evaluator::{AlertEvaluator, EvaluationResult, EvaluatorState};
pub use latch::Latch;
pub use limits::AlertLimits;
pub use types::Sample;
