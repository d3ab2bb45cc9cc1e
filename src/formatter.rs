//! Report formatting
//!
//! This module renders training reports as the fixed-precision message shown to
//! the athlete, plus a JSON rendering for machine consumers.

use crate::error::WorkoutError;
use crate::types::Report;
use std::fmt;

/// Fractional digits shown for every numeric field
pub const DISPLAY_PRECISION: usize = 3;

/// Render a report as the human-readable training message.
///
/// Each value is rounded independently and always printed in fixed-point
/// notation with exactly [`DISPLAY_PRECISION`] fractional digits.
pub fn format_report(report: &Report) -> String {
    format!(
        "Тип тренировки: {name}; \
         Длительность: {duration:.prec$} ч.; \
         Дистанция: {distance:.prec$} км; \
         Ср. скорость: {speed:.prec$} км/ч; \
         Потрачено ккал: {calories:.prec$}.",
        name = report.training_type(),
        duration = report.duration,
        distance = report.distance,
        speed = report.speed,
        calories = report.calories,
        prec = DISPLAY_PRECISION,
    )
}

/// Serialize a report (unrounded values) to compact JSON
pub fn format_json(report: &Report) -> Result<String, WorkoutError> {
    serde_json::to_string(report).map_err(WorkoutError::JsonError)
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_report(self))
    }
}
