//! Replaying sample source.
//!
//! [`ReplaySource`] walks a fixed dataset in order. At the end of each pass
//! it reports [`Poll::Exhausted`] once and rewinds to the first sample; an
//! optional cycle budget ends the replay with [`Poll::Finished`].

use roadwatch_core::{CoreError, Sample};

/// Outcome of polling the source for the next sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Poll {
    Sample(Sample),
    /// A pass just ended; the next poll starts over from the beginning.
    Exhausted { completed_cycles: u64 },
    /// The cycle budget is spent. Every further poll returns this.
    Finished,
}

#[derive(Debug, Clone)]
pub struct ReplaySource {
    samples: Vec<Sample>,
    cursor: usize,
    completed_cycles: u64,
    max_cycles: Option<u64>,
}

impl ReplaySource {
    /// Wrap a non-empty dataset. Replays forever unless a cycle limit is set.
    pub fn new(samples: Vec<Sample>) -> Result<Self, CoreError> {
        if samples.is_empty() {
            return Err(CoreError::Validation(
                "sample source needs at least one sample".into(),
            ));
        }
        Ok(Self {
            samples,
            cursor: 0,
            completed_cycles: 0,
            max_cycles: None,
        })
    }

    /// Stop after `cycles` full passes. `None` replays forever.
    pub fn with_cycle_limit(mut self, cycles: Option<u64>) -> Self {
        self.max_cycles = cycles;
        self
    }

    /// Samples in one pass. Never zero.
    pub fn samples_per_cycle(&self) -> usize {
        self.samples.len()
    }

    pub fn completed_cycles(&self) -> u64 {
        self.completed_cycles
    }

    pub fn is_finished(&self) -> bool {
        self.max_cycles
            .is_some_and(|max| self.completed_cycles >= max)
    }

    pub fn poll(&mut self) -> Poll {
        if self.is_finished() {
            return Poll::Finished;
        }

        if let Some(&sample) = self.samples.get(self.cursor) {
            self.cursor += 1;
            return Poll::Sample(sample);
        }

        self.completed_cycles += 1;
        self.cursor = 0;
        if self.is_finished() {
            Poll::Finished
        } else {
            Poll::Exhausted {
                completed_cycles: self.completed_cycles,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn two_samples() -> Vec<Sample> {
        vec![Sample::new(10.0, 70.0), Sample::new(20.0, 71.0)]
    }

    #[test]
    fn rejects_empty_dataset() {
        assert_matches!(ReplaySource::new(Vec::new()), Err(CoreError::Validation(_)));
    }

    #[test]
    fn yields_samples_in_order_then_wraps() {
        let mut source = ReplaySource::new(two_samples()).expect("non-empty");

        assert_eq!(source.samples_per_cycle(), 2);
        assert_eq!(source.poll(), Poll::Sample(Sample::new(10.0, 70.0)));
        assert_eq!(source.poll(), Poll::Sample(Sample::new(20.0, 71.0)));
        assert_eq!(source.poll(), Poll::Exhausted { completed_cycles: 1 });
        assert_eq!(source.poll(), Poll::Sample(Sample::new(10.0, 70.0)));
        assert_eq!(source.completed_cycles(), 1);
    }

    #[test]
    fn cycle_limit_finishes_replay() {
        let mut source = ReplaySource::new(vec![Sample::new(0.0, 50.0)])
            .expect("non-empty")
            .with_cycle_limit(Some(2));

        assert_matches!(source.poll(), Poll::Sample(_));
        assert_eq!(source.poll(), Poll::Exhausted { completed_cycles: 1 });
        assert_matches!(source.poll(), Poll::Sample(_));
        assert_eq!(source.poll(), Poll::Finished);
        assert_eq!(source.poll(), Poll::Finished);
        assert!(source.is_finished());
        assert_eq!(source.completed_cycles(), 2);
    }

    #[test]
    fn single_sample_dataset_replays() {
        let mut source = ReplaySource::new(vec![Sample::new(5.0, 60.0)]).expect("non-empty");
        for cycle in 1..=3 {
            assert_matches!(source.poll(), Poll::Sample(_));
            assert_eq!(source.poll(), Poll::Exhausted { completed_cycles: cycle });
        }
    }
}
