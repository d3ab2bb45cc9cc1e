//! Swimming workout

use super::{Training, TrainingBase, M_IN_KM};
use crate::types::ActivityKind;

/// Stroke length (metres)
pub const STROKE_LENGTH_M: f64 = 1.38;

const CALORIES_MEAN_SPEED_SHIFT: f64 = 1.1;
const CALORIES_WEIGHT_MULTIPLIER: f64 = 2.0;

/// Swimming: stroke-based distance, speed from pool laps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swimming {
    base: TrainingBase,
    /// Pool length (metres)
    length_pool: f64,
    /// Laps swum
    count_pool: f64,
}

impl Swimming {
    pub fn new(action: f64, duration: f64, weight: f64, length_pool: f64, count_pool: f64) -> Self {
        Self {
            base: TrainingBase::new(action, duration, weight),
            length_pool,
            count_pool,
        }
    }

    pub fn length_pool(&self) -> f64 {
        self.length_pool
    }

    pub fn count_pool(&self) -> f64 {
        self.count_pool
    }
}

impl Training for Swimming {
    fn kind(&self) -> ActivityKind {
        ActivityKind::Swimming
    }

    fn base(&self) -> &TrainingBase {
        &self.base
    }

    fn step_length(&self) -> f64 {
        STROKE_LENGTH_M
    }

    fn mean_speed(&self) -> f64 {
        self.length_pool * self.count_pool / M_IN_KM / self.base.duration
    }

    fn spent_calories(&self) -> f64 {
        (self.mean_speed() + CALORIES_MEAN_SPEED_SHIFT) * CALORIES_WEIGHT_MULTIPLIER * self.base.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swimming_reference_package() {
        let swimming = Swimming::new(720.0, 1.0, 80.0, 25.0, 40.0);

        assert!((swimming.distance() - 0.9936).abs() < 1e-9);
        assert!((swimming.mean_speed() - 1.0).abs() < 1e-9);
        assert!((swimming.spent_calories() - 336.0).abs() < 1e-9);
    }

    #[test]
    fn test_swimming_speed_ignores_strokes() {
        let few = Swimming::new(10.0, 2.0, 70.0, 50.0, 20.0);
        let many = Swimming::new(5000.0, 2.0, 70.0, 50.0, 20.0);

        assert_eq!(few.mean_speed(), many.mean_speed());
        assert!((few.mean_speed() - 0.5).abs() < 1e-9);
        assert!(few.distance() < many.distance());
    }

    #[test]
    fn test_empty_pool_session() {
        let swimming = Swimming::new(0.0, 0.5, 60.0, 25.0, 0.0);

        assert_eq!(swimming.distance(), 0.0);
        assert_eq!(swimming.mean_speed(), 0.0);
        assert!((swimming.spent_calories() - 132.0).abs() < 1e-9);
    }
}
