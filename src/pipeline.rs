//! Pipeline orchestration
//!
//! This module provides the batch-level API for the workout tracker.
//! Each package goes through the same stages, strictly in order:
//! 1. Dispatcher - validate readings and build the workout
//! 2. Training - compute the report
//! 3. Formatter - render the training message
//! 4. Emit - write one line per package

use std::io::{self, Write};

use crate::dispatcher;
use crate::error::WorkoutError;
use crate::formatter::format_report;
use crate::training::Training;
use crate::types::{Package, Report};

/// What to do when a package in the batch fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPolicy {
    /// Log the failure and continue with the next package
    #[default]
    SkipInvalid,
    /// Stop at the first failure and return it
    FailFast,
}

/// A package that was dropped from the batch
#[derive(Debug)]
pub struct SkippedPackage {
    /// Position in the input batch
    pub index: usize,
    /// Activity code as received
    pub code: String,
    pub error: WorkoutError,
}

/// Result of processing a batch
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Reports for the packages that succeeded, in input order
    pub reports: Vec<Report>,
    /// Packages that failed under [`BatchPolicy::SkipInvalid`]
    pub skipped: Vec<SkippedPackage>,
}

impl BatchOutcome {
    pub fn processed(&self) -> usize {
        self.reports.len()
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Sample batch mirroring a typical day of sensor uploads
pub fn demo_packages() -> Vec<Package> {
    vec![
        Package::from_values("SWM", &[720.0, 1.0, 80.0, 25.0, 40.0]),
        Package::from_values("RUN", &[15000.0, 1.0, 75.0]),
        Package::from_values("WLK", &[9000.0, 1.0, 75.0, 180.0]),
    ]
}

/// Parse a JSON array of packages
pub fn parse_packages(json: &str) -> Result<Vec<Package>, WorkoutError> {
    let packages: Vec<Package> = serde_json::from_str(json)?;
    Ok(packages)
}

/// Parse NDJSON (one package per line), skipping blank lines
pub fn parse_packages_ndjson(ndjson: &str) -> Result<Vec<Package>, WorkoutError> {
    let mut packages = Vec::new();
    for (line_num, line) in ndjson.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<Package>(trimmed) {
            Ok(package) => packages.push(package),
            Err(e) => {
                return Err(WorkoutError::ParseError(format!(
                    "Failed to parse line {}: {}",
                    line_num + 1,
                    e
                )));
            }
        }
    }
    Ok(packages)
}

/// Build, compute and format a single package
pub fn process_package(package: &Package) -> Result<String, WorkoutError> {
    let report = compute_report(package)?;
    Ok(format_report(&report))
}

fn compute_report(package: &Package) -> Result<Report, WorkoutError> {
    let workout = dispatcher::build_from_readings(&package.code, &package.readings)?;
    workout.report().ensure_finite()
}

/// Process a batch with the default policy and print each message to stdout
pub fn run(packages: &[Package]) -> Result<BatchOutcome, WorkoutError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    WorkoutProcessor::new().run(packages, &mut handle)
}

/// Sequential batch processor.
pub struct WorkoutProcessor {
    policy: BatchPolicy,
}

impl Default for WorkoutProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkoutProcessor {
    /// Create a processor that skips invalid packages
    pub fn new() -> Self {
        Self {
            policy: BatchPolicy::default(),
        }
    }

    /// Create a processor with a specific failure policy
    pub fn with_policy(policy: BatchPolicy) -> Self {
        Self { policy }
    }

    /// Compute reports for every package without emitting anything
    pub fn reports(&self, packages: &[Package]) -> Result<BatchOutcome, WorkoutError> {
        self.process(packages, |_| Ok(()))
    }

    /// Compute, format and write one line per package as soon as it is ready.
    ///
    /// Write failures always abort the batch, regardless of policy.
    pub fn run<W: Write>(
        &self,
        packages: &[Package],
        out: &mut W,
    ) -> Result<BatchOutcome, WorkoutError> {
        self.process(packages, |report| {
            writeln!(out, "{}", format_report(report))?;
            Ok(())
        })
    }

    fn process<F>(&self, packages: &[Package], mut emit: F) -> Result<BatchOutcome, WorkoutError>
    where
        F: FnMut(&Report) -> Result<(), WorkoutError>,
    {
        let mut outcome = BatchOutcome::default();

        for (index, package) in packages.iter().enumerate() {
            match compute_report(package) {
                Ok(report) => {
                    emit(&report)?;
                    tracing::debug!(index, code = %package.code, "report emitted");
                    outcome.reports.push(report);
                }
                Err(error) => match self.policy {
                    BatchPolicy::FailFast => return Err(error),
                    BatchPolicy::SkipInvalid => {
                        tracing::warn!(index, code = %package.code, %error, "skipping package");
                        outcome.skipped.push(SkippedPackage {
                            index,
                            code: package.code.clone(),
                            error,
                        });
                    }
                },
            }
        }

        tracing::info!(
            processed = outcome.processed(),
            skipped = outcome.skipped.len(),
            "batch complete"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActivityKind, Reading};
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    fn run_to_string(processor: &WorkoutProcessor, packages: &[Package]) -> (String, BatchOutcome) {
        let mut buffer = Vec::new();
        let outcome = processor.run(packages, &mut buffer).unwrap();
        (String::from_utf8(buffer).unwrap(), outcome)
    }

    #[test]
    fn test_demo_batch_output() {
        let (output, outcome) = run_to_string(&WorkoutProcessor::new(), &demo_packages());

        assert!(outcome.is_clean());
        assert_eq!(
            output,
            "Тип тренировки: Swimming; Длительность: 1.000 ч.; Дистанция: 0.994 км; \
             Ср. скорость: 1.000 км/ч; Потрачено ккал: 336.000.\n\
             Тип тренировки: Running; Длительность: 1.000 ч.; Дистанция: 9.750 км; \
             Ср. скорость: 9.750 км/ч; Потрачено ккал: 699.750.\n\
             Тип тренировки: SportsWalking; Длительность: 1.000 ч.; Дистанция: 5.850 км; \
             Ср. скорость: 5.850 км/ч; Потрачено ккал: 157.500.\n"
        );
    }

    #[test]
    #[traced_test]
    fn test_skip_invalid_keeps_rest_of_batch() {
        let packages = vec![
            Package::from_values("RUN", &[15000.0, 1.0, 75.0]),
            Package::from_values("XYZ", &[1.0, 2.0, 3.0]),
            Package::from_values("WLK", &[9000.0, 1.0, -75.0, 180.0]),
            Package::from_values("SWM", &[720.0, 1.0, 80.0, 25.0, 40.0]),
        ];
        let (output, outcome) = run_to_string(&WorkoutProcessor::new(), &packages);

        assert_eq!(output.lines().count(), 2);
        assert_eq!(outcome.processed(), 2);
        assert_eq!(outcome.skipped.len(), 2);
        assert_eq!(outcome.skipped[0].index, 1);
        assert!(matches!(outcome.skipped[0].error, WorkoutError::UnknownActivity(_)));
        assert_eq!(outcome.skipped[1].code, "WLK");
        assert!(matches!(outcome.skipped[1].error, WorkoutError::InvalidReading { index: 2, .. }));
        assert!(logs_contain("skipping package"));
    }

    #[test]
    fn test_fail_fast_stops_batch() {
        let packages = vec![
            Package::from_values("RUN", &[15000.0, 1.0, 75.0]),
            Package::from_values("RUN", &[15000.0, 1.0]),
            Package::from_values("SWM", &[720.0, 1.0, 80.0, 25.0, 40.0]),
        ];
        let mut buffer = Vec::new();
        let result = WorkoutProcessor::with_policy(BatchPolicy::FailFast).run(&packages, &mut buffer);

        assert!(matches!(result, Err(WorkoutError::Arity { expected: 3, actual: 2, .. })));
        // The first package was emitted before the failure
        assert_eq!(String::from_utf8(buffer).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_non_numeric_reading_never_reaches_report() {
        let packages = vec![Package::new(
            "RUN",
            vec![Reading::from(15000.0), Reading::from("fast"), Reading::from(75.0)],
        )];
        let outcome = WorkoutProcessor::new().reports(&packages).unwrap();

        assert!(outcome.reports.is_empty());
        assert!(matches!(
            outcome.skipped[0].error,
            WorkoutError::InvalidReading { index: 1, .. }
        ));
    }

    #[test]
    fn test_reports_preserve_input_order() {
        let outcome = WorkoutProcessor::new().reports(&demo_packages()).unwrap();
        let kinds: Vec<ActivityKind> = outcome.reports.iter().map(|r| r.kind).collect();

        assert_eq!(
            kinds,
            vec![ActivityKind::Swimming, ActivityKind::Running, ActivityKind::SportsWalking]
        );
    }

    #[test]
    fn test_process_package() {
        let message = process_package(&Package::from_values("SWM", &[720.0, 1.0, 80.0, 25.0, 40.0]))
            .unwrap();
        assert!(message.ends_with("Потрачено ккал: 336.000."));
    }

    #[test]
    fn test_empty_batch() {
        let (output, outcome) = run_to_string(&WorkoutProcessor::new(), &[]);
        assert!(output.is_empty());
        assert_eq!(outcome.processed(), 0);
    }

    #[test]
    fn test_parse_packages_mixed_forms() {
        let json = r#"[
            ["SWM", [720, 1, 80, 25, 40]],
            {"code": "RUN", "readings": [15000, 1, 75]}
        ]"#;
        let packages = parse_packages(json).unwrap();

        assert_eq!(packages, demo_packages()[..2].to_vec());
    }

    #[test]
    fn test_parse_packages_ndjson() {
        let ndjson = "[\"RUN\", [15000, 1, 75]]\n\n{\"code\": \"WLK\", \"readings\": [9000, 1, 75, 180]}\n";
        let packages = parse_packages_ndjson(ndjson).unwrap();

        assert_eq!(packages.len(), 2);
        assert_eq!(packages[1].code, "WLK");
    }

    #[test]
    fn test_parse_packages_ndjson_reports_line() {
        let ndjson = "[\"RUN\", [15000, 1, 75]]\nnot json\n";
        let err = parse_packages_ndjson(ndjson).unwrap_err();

        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(parse_packages("not valid json"), Err(WorkoutError::JsonError(_))));
    }

    #[test]
    fn test_running_speed_overflow_is_rejected() {
        let result = process_package(&Package::from_values("RUN", &[1e6, 1e-310, 75.0]));

        assert!(matches!(result, Err(WorkoutError::OutOfRange { field: "speed", .. })));
    }

    #[test]
    fn test_walking_calorie_overflow_is_rejected() {
        let result = process_package(&Package::from_values("WLK", &[1e306, 1.0, 75.0, 1.0]));

        assert!(matches!(result, Err(WorkoutError::OutOfRange { field: "calories", .. })));
    }

    #[test]
    fn test_swimming_speed_overflow_is_rejected() {
        let result =
            process_package(&Package::from_values("SWM", &[720.0, 1.0, 80.0, 1e200, 1e200]));

        assert!(matches!(result, Err(WorkoutError::OutOfRange { field: "speed", .. })));
    }

    #[test]
    fn test_overflowing_package_is_skipped_not_printed() {
        let packages = vec![
            Package::from_values("WLK", &[1e306, 1.0, 75.0, 1.0]),
            Package::from_values("RUN", &[15000.0, 1.0, 75.0]),
        ];
        let (output, outcome) = run_to_string(&WorkoutProcessor::new(), &packages);

        assert_eq!(output.lines().count(), 1);
        assert!(!output.contains("inf") && !output.contains("NaN"));
        assert_eq!(outcome.skipped[0].index, 0);
    }

    #[test]
    fn test_negative_zero_reading_prints_unsigned() {
        let message = process_package(&Package::from_values("RUN", &[-0.0, 1.0, 75.0])).unwrap();

        assert!(message.contains("Дистанция: 0.000 км; Ср. скорость: 0.000 км/ч"));
        assert!(!message.contains("-0.000"));
    }

    #[test]
    fn test_run_prints_to_stdout() {
        let outcome = run(&demo_packages()).unwrap();

        assert!(outcome.is_clean());
        assert_eq!(outcome.processed(), 3);
    }
}
