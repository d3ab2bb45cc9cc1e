//! Running workout

use super::{Training, TrainingBase, M_IN_KM};
use crate::types::ActivityKind;

const CALORIES_MEAN_SPEED_MULTIPLIER: f64 = 18.0;
const CALORIES_MEAN_SPEED_SHIFT: f64 = 20.0;

/// Running: step-based distance, calories linear in mean speed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Running {
    base: TrainingBase,
}

impl Running {
    pub fn new(action: f64, duration: f64, weight: f64) -> Self {
        Self {
            base: TrainingBase::new(action, duration, weight),
        }
    }
}

impl Training for Running {
    fn kind(&self) -> ActivityKind {
        ActivityKind::Running
    }

    fn base(&self) -> &TrainingBase {
        &self.base
    }

    fn spent_calories(&self) -> f64 {
        (CALORIES_MEAN_SPEED_MULTIPLIER * self.mean_speed() - CALORIES_MEAN_SPEED_SHIFT)
            * self.base.weight
            / M_IN_KM
            * self.base.duration_minutes()
    }
}
