//! Sports walking workout

use super::{floor_div, Training, TrainingBase};
use crate::types::ActivityKind;

const CALORIES_WEIGHT_MULTIPLIER: f64 = 0.035;
const CALORIES_SPEED_HEIGHT_MULTIPLIER: f64 = 0.029;

/// Sports walking: step-based distance, calories from speed squared over height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SportsWalking {
    base: TrainingBase,
    /// Athlete height, in the unit the sensor reports
    height: f64,
}

impl SportsWalking {
    pub fn new(action: f64, duration: f64, weight: f64, height: f64) -> Self {
        Self {
            base: TrainingBase::new(action, duration, weight),
            height,
        }
    }
}

impl Training for SportsWalking {
    fn kind(&self) -> ActivityKind {
        ActivityKind::SportsWalking
    }

    fn base(&self) -> &TrainingBase {
        &self.base
    }

    fn spent_calories(&self) -> f64 {
        // The speed term is floor-divided by height, so it only contributes in
        // whole units.
        let speed_term = floor_div(self.mean_speed().powi(2), self.height);
        (speed_term * CALORIES_SPEED_HEIGHT_MULTIPLIER * self.base.weight
            + CALORIES_WEIGHT_MULTIPLIER * self.base.weight)
            * self.base.duration_minutes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walking_reference_package() {
        let walking = SportsWalking::new(9000.0, 1.0, 75.0, 180.0);

        assert!((walking.distance() - 5.85).abs() < 1e-9);
        assert!((walking.mean_speed() - 5.85).abs() < 1e-9);
        // 5.85^2 // 180 == 0, leaving only the weight term: 0.035 * 75 * 60
        assert!((walking.spent_calories() - 157.5).abs() < 1e-9);
    }

    #[test]
    fn test_walking_speed_term_crosses_floor_boundary() {
        // 5.85^2 = 34.2225: one whole unit over a height of 34, none over 35
        let over = SportsWalking::new(9000.0, 1.0, 75.0, 34.0);
        let under = SportsWalking::new(9000.0, 1.0, 75.0, 35.0);

        assert!((over.spent_calories() - 288.0).abs() < 1e-9);
        assert!((under.spent_calories() - 157.5).abs() < 1e-9);
    }

    #[test]
    fn test_walking_speed_term_on_exact_multiple() {
        // 10000 steps in 0.65h: 6.5 km at 10 km/h, so 100 // 50 lands exactly on 2
        let walking = SportsWalking::new(10000.0, 0.65, 60.0, 50.0);

        assert_eq!(floor_div(walking.mean_speed().powi(2), 50.0), 2.0);
        // (2 * 0.029 * 60 + 0.035 * 60) * 39
        assert!((walking.spent_calories() - 217.62).abs() < 1e-9);
    }
}
