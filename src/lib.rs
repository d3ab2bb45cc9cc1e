//! Workout Tracker - training statistics from raw fitness sensor readings
//!
//! The tracker turns sensor packages into training reports through a
//! deterministic pipeline: activity dispatch → workout calculation → report
//! formatting.
//!
//! ## Activities
//!
//! - **Running** (`RUN`): step count, duration, weight
//! - **Sports walking** (`WLK`): step count, duration, weight, height
//! - **Swimming** (`SWM`): stroke count, duration, weight, pool length, laps

pub mod dispatcher;
pub mod error;
pub mod formatter;
pub mod pipeline;
pub mod training;
pub mod types;

pub use dispatcher::{build, build_from_readings};
pub use error::WorkoutError;
pub use formatter::format_report;
pub use pipeline::{demo_packages, run, BatchOutcome, BatchPolicy, WorkoutProcessor};
pub use training::{Training, Workout};
pub use types::{ActivityKind, Package, Reading, Report};

/// Tracker version
pub const TRACKER_VERSION: &str = env!("CARGO_PKG_VERSION");
