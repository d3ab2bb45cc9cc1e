//! Core types for the workout tracker
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: batch packages with raw readings, activity kinds, and reports.

use crate::error::WorkoutError;
use serde::{Deserialize, Serialize};

/// Closed set of supported activities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityKind {
    Running,
    SportsWalking,
    Swimming,
}

impl ActivityKind {
    /// Sensor package code
    pub fn code(&self) -> &'static str {
        match self {
            ActivityKind::Running => "RUN",
            ActivityKind::SportsWalking => "WLK",
            ActivityKind::Swimming => "SWM",
        }
    }

    /// Name shown in the training report
    pub fn display_name(&self) -> &'static str {
        match self {
            ActivityKind::Running => "Running",
            ActivityKind::SportsWalking => "SportsWalking",
            ActivityKind::Swimming => "Swimming",
        }
    }

    /// Ordered reading layout expected from the sensors
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            ActivityKind::Running => &["action", "duration", "weight"],
            ActivityKind::SportsWalking => &["action", "duration", "weight", "height"],
            ActivityKind::Swimming => &[
                "action",
                "duration",
                "weight",
                "length_pool",
                "count_pool",
            ],
        }
    }

    /// Number of readings the activity takes
    pub fn arity(&self) -> usize {
        self.fields().len()
    }
}

/// A single sensor value as received in a batch.
///
/// Sensors are loosely typed on the wire, so anything JSON can carry is accepted
/// here and rejected later by the dispatcher if it is not a usable number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reading {
    Number(f64),
    Text(String),
    Boolean(bool),
    Null,
}

impl From<f64> for Reading {
    fn from(v: f64) -> Self {
        Reading::Number(v)
    }
}

impl From<&str> for Reading {
    fn from(v: &str) -> Self {
        Reading::Text(v.to_string())
    }
}

impl From<bool> for Reading {
    fn from(v: bool) -> Self {
        Reading::Boolean(v)
    }
}

impl Reading {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Reading::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Short description of the value's shape, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Reading::Number(_) => "number",
            Reading::Text(_) => "string",
            Reading::Boolean(_) => "boolean",
            Reading::Null => "null",
        }
    }
}

/// One batch entry: an activity code and its raw readings.
///
/// Deserializes from either `{"code": "RUN", "readings": [15000, 1, 75]}` or the
/// compact `["RUN", [15000, 1, 75]]` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PackageRepr")]
pub struct Package {
    /// Activity code (SWM, RUN, WLK)
    pub code: String,
    /// Readings in the activity's positional order
    pub readings: Vec<Reading>,
}

impl Package {
    pub fn new(code: impl Into<String>, readings: Vec<Reading>) -> Self {
        Self {
            code: code.into(),
            readings,
        }
    }

    /// Build a package from plain numeric readings
    pub fn from_values(code: impl Into<String>, values: &[f64]) -> Self {
        Self::new(code, values.iter().copied().map(Reading::Number).collect())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PackageRepr {
    Tuple(String, Vec<Reading>),
    Object { code: String, readings: Vec<Reading> },
}

impl From<PackageRepr> for Package {
    fn from(repr: PackageRepr) -> Self {
        match repr {
            PackageRepr::Tuple(code, readings) => Package { code, readings },
            PackageRepr::Object { code, readings } => Package { code, readings },
        }
    }
}

/// Derived training summary.
///
/// Values are unrounded; the formatter applies display precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Activity the report was computed for
    #[serde(rename = "training_type")]
    pub kind: ActivityKind,
    /// Duration (hours)
    pub duration: f64,
    /// Distance covered (km)
    pub distance: f64,
    /// Mean speed (km/h)
    pub speed: f64,
    /// Calories burned (kcal)
    pub calories: f64,
}

impl Report {
    pub fn training_type(&self) -> &'static str {
        self.kind.display_name()
    }

    /// Reject reports whose values overflowed to infinity or NaN.
    ///
    /// Readings can each be finite and still overflow once multiplied or
    /// divided; such a report cannot be printed in fixed-point form.
    pub fn ensure_finite(self) -> Result<Self, WorkoutError> {
        let fields = [
            ("duration", self.duration),
            ("distance", self.distance),
            ("speed", self.speed),
            ("calories", self.calories),
        ];
        match fields.into_iter().find(|(_, value)| !value.is_finite()) {
            Some((field, value)) => Err(WorkoutError::OutOfRange { field, value }),
            None => Ok(self),
        }
    }
}
