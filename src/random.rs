use std::collections::VecDeque;

use rand::{Rng, RngCore};

/// Source of uniform values in `[0, 1)` consumed by the placement functions.
pub trait RandomSource {
    /// Returns the next value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Maps the next value onto an index in `0..len` as `floor(value * len)`.
    ///
    /// `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        let scaled = (self.next_unit() * len as f64).floor();
        if scaled <= 0.0 {
            0
        } else {
            (scaled as usize).min(len - 1)
        }
    }
}

impl<R: RngCore> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen_range(0.0..1.0)
    }
}

/// Replays a fixed list of values, then yields `0.0` forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: VecDeque<f64>,
}

impl ScriptedRandom {
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Source that always yields `0.0`, selecting the first candidate.
    #[must_use]
    pub fn zeros() -> Self {
        Self::default()
    }

    /// Number of scripted values not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        self.values.pop_front().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{RandomSource, ScriptedRandom};

    #[test]
    fn scripted_values_replay_then_fall_back_to_zero() {
        let mut random = ScriptedRandom::new([0.5, 0.25]);

        assert_eq!(random.next_unit(), 0.5);
        assert_eq!(random.next_unit(), 0.25);
        assert_eq!(random.remaining(), 0);
        assert_eq!(random.next_unit(), 0.0);
    }

    #[test]
    fn index_is_floor_of_scaled_value() {
        let mut random = ScriptedRandom::new([0.0, 0.5, 0.99]);

        assert_eq!(random.next_index(4), 0);
        assert_eq!(random.next_index(4), 2);
        assert_eq!(random.next_index(4), 3);
    }

    #[test]
    fn out_of_range_value_is_clamped_to_last_index() {
        let mut random = ScriptedRandom::new([1.0]);

        assert_eq!(random.next_index(5), 4);
    }

    #[test]
    fn seeded_rng_stays_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..1_000 {
            let value = rng.next_unit();
            assert!((0.0..1.0).contains(&value));
        }
    }
}
