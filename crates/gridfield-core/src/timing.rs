//! Reshuffle timing parameters.

use serde::{Deserialize, Serialize};

/// Inclusive `min..=max` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Range collapsed to a single value.
    pub const fn exactly(value: T) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

/// Delays and counts driving the reshuffle cycle.
///
/// All values are presentation tuning rather than invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShuffleTiming {
    /// Delay before the first cycle, in milliseconds.
    pub first_delay_ms: Bounds<u64>,
    /// Delay between later cycles, in milliseconds.
    pub cycle_delay_ms: Bounds<u64>,
    /// Time between hiding the retiring placements and relocating them.
    pub settle_ms: u64,
    /// Time between relocating and revealing.
    pub reveal_ms: u64,
    /// How many placements retire per cycle.
    pub retire_count: Bounds<usize>,
}

impl Default for ShuffleTiming {
    fn default() -> Self {
        Self {
            first_delay_ms: Bounds::new(3_000, 6_000),
            cycle_delay_ms: Bounds::new(4_000, 8_000),
            settle_ms: 800,
            reveal_ms: 200,
            retire_count: Bounds::new(3, 6),
        }
    }
}

impl ShuffleTiming {
    /// Whether every range has `min <= max`.
    pub fn is_ordered(&self) -> bool {
        self.first_delay_ms.is_ordered()
            && self.cycle_delay_ms.is_ordered()
            && self.retire_count.is_ordered()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing() {
        let timing = ShuffleTiming::default();
        assert!(timing.is_ordered());
        assert_eq!(timing.settle_ms + timing.reveal_ms, 1_000);
    }

    #[test]
    fn test_unordered_bounds() {
        let timing = ShuffleTiming {
            retire_count: Bounds::new(6, 3),
            ..Default::default()
        };
        assert!(!timing.is_ordered());
        assert!(Bounds::exactly(4).is_ordered());
    }
}
