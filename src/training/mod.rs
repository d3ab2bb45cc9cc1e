//! Activity model
//!
//! This module provides the calculation contract shared by all workouts and the
//! three activity variants that specialise it:
//! - Running: base distance and speed, speed-linear calorie model
//! - Sports walking: adds height, quantized speed-squared calorie model
//! - Swimming: stroke length, pool-based speed, speed-linear calorie model

mod running;
mod swimming;
mod walking;

pub use running::Running;
pub use swimming::Swimming;
pub use walking::SportsWalking;

use crate::types::{ActivityKind, Report};

/// Metres in a kilometre
pub const M_IN_KM: f64 = 1000.0;

/// Minutes in an hour
pub const MIN_IN_HOUR: f64 = 60.0;

/// Step length for running and walking (metres)
pub const STEP_LENGTH_M: f64 = 0.65;

/// Inputs shared by every workout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingBase {
    /// Steps or strokes recorded
    pub action: f64,
    /// Duration (hours)
    pub duration: f64,
    /// Athlete weight (kg)
    pub weight: f64,
}

impl TrainingBase {
    pub fn new(action: f64, duration: f64, weight: f64) -> Self {
        Self {
            action,
            duration,
            weight,
        }
    }

    /// Duration expressed in minutes
    pub fn duration_minutes(&self) -> f64 {
        self.duration * MIN_IN_HOUR
    }
}

/// Calculation contract for a workout.
///
/// Implementors supply their shared inputs and calorie model; distance and
/// mean speed default to the step-based formulas and may be overridden.
pub trait Training {
    /// Activity variant
    fn kind(&self) -> ActivityKind;

    /// Shared inputs
    fn base(&self) -> &TrainingBase;

    /// Length of one step or stroke (metres)
    fn step_length(&self) -> f64 {
        STEP_LENGTH_M
    }

    /// Distance covered (km)
    fn distance(&self) -> f64 {
        self.base().action * self.step_length() / M_IN_KM
    }

    /// Mean speed (km/h)
    fn mean_speed(&self) -> f64 {
        self.distance() / self.base().duration
    }

    /// Calories burned (kcal)
    fn spent_calories(&self) -> f64;

    /// Compute the full report. Nothing is cached; every call recomputes.
    fn report(&self) -> Report {
        Report {
            kind: self.kind(),
            duration: self.base().duration,
            distance: self.distance(),
            speed: self.mean_speed(),
            calories: self.spent_calories(),
        }
    }
}

/// A constructed workout of any supported kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Workout {
    Running(Running),
    SportsWalking(SportsWalking),
    Swimming(Swimming),
}

impl Workout {
    fn inner(&self) -> &dyn Training {
        match self {
            Workout::Running(t) => t,
            Workout::SportsWalking(t) => t,
            Workout::Swimming(t) => t,
        }
    }
}

impl Training for Workout {
    fn kind(&self) -> ActivityKind {
        self.inner().kind()
    }

    fn base(&self) -> &TrainingBase {
        self.inner().base()
    }

    fn step_length(&self) -> f64 {
        self.inner().step_length()
    }

    fn distance(&self) -> f64 {
        self.inner().distance()
    }

    fn mean_speed(&self) -> f64 {
        self.inner().mean_speed()
    }

    fn spent_calories(&self) -> f64 {
        self.inner().spent_calories()
    }
}

impl From<Running> for Workout {
    fn from(t: Running) -> Self {
        Workout::Running(t)
    }
}

impl From<SportsWalking> for Workout {
    fn from(t: SportsWalking) -> Self {
        Workout::SportsWalking(t)
    }
}

impl From<Swimming> for Workout {
    fn from(t: Swimming) -> Self {
        Workout::Swimming(t)
    }
}

/// Floor division with the remainder-based semantics of a floored `//`.
///
/// `(a / b).floor()` can round the quotient up before flooring (1.0 / 0.1 is
/// exactly 10.0 in binary floating point); deriving the quotient from the
/// remainder keeps `a // b * b + a % b == a` consistent.
pub fn floor_div(a: f64, b: f64) -> f64 {
    let rem = a % b;
    let mut div = (a - rem) / b;
    if rem != 0.0 && ((b < 0.0) != (rem < 0.0)) {
        div -= 1.0;
    }
    if div == 0.0 {
        return 0.0_f64.copysign(a / b);
    }
    let floored = div.floor();
    if div - floored > 0.5 {
        floored + 1.0
    } else {
        floored
    }
}
