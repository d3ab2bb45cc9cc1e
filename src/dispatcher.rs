//! Activity dispatch
//!
//! Maps a sensor package's activity code to the matching workout constructor.
//! Validation runs in a fixed order before anything is constructed:
//! 1. The code must be in the activity table
//! 2. The reading count must match the activity's layout
//! 3. Every reading must be a finite, non-negative number (duration and height
//!    strictly positive, since both are divisors)

use crate::error::WorkoutError;
use crate::training::{Running, SportsWalking, Swimming, Workout};
use crate::types::{ActivityKind, Reading};

type Constructor = fn(&[f64]) -> Workout;

/// Static activity table: code, kind, constructor
const ACTIVITY_TABLE: [(&str, ActivityKind, Constructor); 3] = [
    ("SWM", ActivityKind::Swimming, build_swimming),
    ("RUN", ActivityKind::Running, build_running),
    ("WLK", ActivityKind::SportsWalking, build_walking),
];

/// Readings that divide other values and so must be strictly positive
const NON_ZERO_FIELDS: [&str; 2] = ["duration", "height"];

fn build_running(v: &[f64]) -> Workout {
    Running::new(v[0], v[1], v[2]).into()
}

fn build_walking(v: &[f64]) -> Workout {
    SportsWalking::new(v[0], v[1], v[2], v[3]).into()
}

fn build_swimming(v: &[f64]) -> Workout {
    Swimming::new(v[0], v[1], v[2], v[3], v[4]).into()
}

/// Activity codes and kinds in table order
pub fn supported_activities() -> impl Iterator<Item = (&'static str, ActivityKind)> {
    ACTIVITY_TABLE.iter().map(|(code, kind, _)| (*code, *kind))
}

/// Resolve an activity code to its kind
pub fn resolve(code: &str) -> Result<ActivityKind, WorkoutError> {
    lookup(code).map(|(kind, _)| kind)
}

fn lookup(code: &str) -> Result<(ActivityKind, Constructor), WorkoutError> {
    ACTIVITY_TABLE
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, kind, ctor)| (*kind, *ctor))
        .ok_or_else(|| WorkoutError::UnknownActivity(code.to_string()))
}

/// Build a workout from numeric readings.
///
/// NaN and infinite values count as non-numeric.
pub fn build(code: &str, values: &[f64]) -> Result<Workout, WorkoutError> {
    let (kind, ctor) = lookup(code)?;
    check_arity(code, kind, values.len())?;
    check_values(kind, values)?;

    // -0.0 passes the sign check but would print as "-0.000"
    let values: Vec<f64> = values
        .iter()
        .map(|&v| if v == 0.0 { 0.0 } else { v })
        .collect();

    tracing::debug!(code, kind = kind.display_name(), "workout built");
    Ok(ctor(&values))
}

/// Build a workout from loosely typed readings.
///
/// Strings, booleans and nulls are rejected as non-numeric; numeric strings are
/// not coerced.
pub fn build_from_readings(code: &str, readings: &[Reading]) -> Result<Workout, WorkoutError> {
    let (_, values) = numeric_values(code, readings)?;
    build(code, &values)
}

/// Validate a package without constructing a workout
pub fn validate(code: &str, readings: &[Reading]) -> Result<ActivityKind, WorkoutError> {
    let (kind, values) = numeric_values(code, readings)?;
    check_values(kind, &values)?;
    Ok(kind)
}

/// Check code and arity, then convert every reading to a number
fn numeric_values(
    code: &str,
    readings: &[Reading],
) -> Result<(ActivityKind, Vec<f64>), WorkoutError> {
    let kind = resolve(code)?;
    check_arity(code, kind, readings.len())?;

    let values = readings
        .iter()
        .zip(kind.fields())
        .enumerate()
        .map(|(index, (reading, &field))| {
            reading.as_f64().ok_or_else(|| WorkoutError::InvalidReading {
                index,
                field,
                reason: format!("expected a number, got {}", reading.kind_name()),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((kind, values))
}

fn check_arity(code: &str, kind: ActivityKind, actual: usize) -> Result<(), WorkoutError> {
    if actual == kind.arity() {
        Ok(())
    } else {
        Err(WorkoutError::Arity {
            code: code.to_string(),
            expected: kind.arity(),
            actual,
        })
    }
}

fn check_values(kind: ActivityKind, values: &[f64]) -> Result<(), WorkoutError> {
    for (index, (&value, &field)) in values.iter().zip(kind.fields()).enumerate() {
        check_value(index, field, value)?;
    }
    Ok(())
}

fn check_value(index: usize, field: &'static str, value: f64) -> Result<(), WorkoutError> {
    let reason = if !value.is_finite() {
        format!("expected a finite number, got {value}")
    } else if value < 0.0 {
        format!("must not be negative, got {value}")
    } else if value == 0.0 && NON_ZERO_FIELDS.contains(&field) {
        "must be greater than zero".to_string()
    } else {
        return Ok(());
    };

    Err(WorkoutError::InvalidReading {
        index,
        field,
        reason,
    })
}
