//! Tracker CLI - Command-line interface for the workout tracker
//!
//! Commands:
//! - run: Compute training reports for a batch of sensor packages
//! - validate: Check a batch without computing reports
//! - activities: List supported activity codes and reading layouts

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use workout_tracker::dispatcher;
use workout_tracker::formatter::format_json;
use workout_tracker::pipeline::{demo_packages, parse_packages, parse_packages_ndjson};
use workout_tracker::{BatchPolicy, Package, Report, WorkoutError, WorkoutProcessor, TRACKER_VERSION};

/// Tracker - workout statistics from raw sensor readings
#[derive(Parser)]
#[command(name = "tracker")]
#[command(version = TRACKER_VERSION)]
#[command(about = "Compute distance, speed and calories from workout sensor packages", long_about = None)]
struct Cli {
    /// Log debug events to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute training reports for a batch of packages
    Run {
        /// Input file path (use - for stdin); the sample batch is used when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "text")]
        output_format: OutputFormat,

        /// Stop at the first invalid package instead of skipping it
        #[arg(long)]
        fail_fast: bool,
    },

    /// Validate a batch of packages without computing reports
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List supported activity codes
    Activities {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// JSON array of packages
    Json,
    /// Newline-delimited JSON (one package per line)
    Ndjson,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// One training message per line
    Text,
    /// Newline-delimited JSON reports
    Json,
    /// Pretty-printed JSON array of reports
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e)).unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<(), TrackerCliError> {
    match cli.command {
        Commands::Run {
            input,
            input_format,
            output_format,
            fail_fast,
        } => cmd_run(input.as_deref(), input_format, output_format, fail_fast),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Activities { json } => cmd_activities(json),
    }
}

fn cmd_run(
    input: Option<&Path>,
    input_format: InputFormat,
    output_format: OutputFormat,
    fail_fast: bool,
) -> Result<(), TrackerCliError> {
    let packages = match input {
        Some(path) => read_packages(path, &input_format)?,
        None => demo_packages(),
    };

    if packages.is_empty() {
        return Err(TrackerCliError::NoPackages);
    }

    let policy = if fail_fast {
        BatchPolicy::FailFast
    } else {
        BatchPolicy::SkipInvalid
    };
    let processor = WorkoutProcessor::with_policy(policy);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let outcome = match output_format {
        OutputFormat::Text => processor.run(&packages, &mut out)?,
        OutputFormat::Json => {
            let outcome = processor.reports(&packages)?;
            for report in &outcome.reports {
                writeln!(out, "{}", format_json(report)?)?;
            }
            outcome
        }
        OutputFormat::JsonPretty => {
            let outcome = processor.reports(&packages)?;
            let reports: &[Report] = &outcome.reports;
            writeln!(out, "{}", serde_json::to_string_pretty(reports)?)?;
            outcome
        }
    };
    out.flush()?;

    if outcome.reports.is_empty() {
        Err(TrackerCliError::NoReports(outcome.skipped.len()))
    } else {
        Ok(())
    }
}

fn cmd_validate(input: &Path, input_format: InputFormat, json: bool) -> Result<(), TrackerCliError> {
    let packages = read_packages(input, &input_format)?;

    let errors: Vec<ValidationErrorDetail> = packages
        .iter()
        .enumerate()
        .filter_map(|(index, package)| {
            dispatcher::validate(&package.code, &package.readings)
                .err()
                .map(|e| ValidationErrorDetail {
                    index,
                    code: package.code.clone(),
                    error: e.to_string(),
                })
        })
        .collect();

    let report = ValidationReport {
        total_packages: packages.len(),
        valid_packages: packages.len() - errors.len(),
        invalid_packages: errors.len(),
        errors,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total packages:   {}", report.total_packages);
        println!("Valid packages:   {}", report.valid_packages);
        println!("Invalid packages: {}", report.invalid_packages);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!("  - Package {} (index {}): {}", err.code, err.index, err.error);
            }
        }
    }

    if report.invalid_packages > 0 {
        Err(TrackerCliError::ValidationFailed(report.invalid_packages))
    } else {
        Ok(())
    }
}

fn cmd_activities(json: bool) -> Result<(), TrackerCliError> {
    let activities: Vec<ActivityInfo> = dispatcher::supported_activities()
        .map(|(code, kind)| ActivityInfo {
            code,
            name: kind.display_name(),
            readings: kind.fields(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&activities)?);
    } else {
        println!("Supported activities:");
        for activity in &activities {
            println!(
                "  {}  {:<14} [{}]",
                activity.code,
                activity.name,
                activity.readings.join(", ")
            );
        }
    }

    Ok(())
}

// Helper functions

fn read_packages(input: &Path, format: &InputFormat) -> Result<Vec<Package>, TrackerCliError> {
    let input_data = if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let packages = match format {
        InputFormat::Json => parse_packages(&input_data)?,
        InputFormat::Ndjson => parse_packages_ndjson(&input_data)?,
    };
    Ok(packages)
}

// Error types

#[derive(Debug)]
enum TrackerCliError {
    Io(io::Error),
    Workout(WorkoutError),
    Json(serde_json::Error),
    NoPackages,
    NoReports(usize),
    ValidationFailed(usize),
}

impl From<io::Error> for TrackerCliError {
    fn from(e: io::Error) -> Self {
        TrackerCliError::Io(e)
    }
}

impl From<WorkoutError> for TrackerCliError {
    fn from(e: WorkoutError) -> Self {
        TrackerCliError::Workout(e)
    }
}

impl From<serde_json::Error> for TrackerCliError {
    fn from(e: serde_json::Error) -> Self {
        TrackerCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<TrackerCliError> for CliError {
    fn from(e: TrackerCliError) -> Self {
        match e {
            TrackerCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            TrackerCliError::Workout(e) if e.is_validation() => CliError {
                code: "INVALID_PACKAGE".to_string(),
                message: e.to_string(),
                hint: Some("Run 'tracker activities' for the expected reading layouts".to_string()),
            },
            TrackerCliError::Workout(e) => CliError {
                code: "PARSE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Packages look like [\"RUN\", [15000, 1, 75]]".to_string()),
            },
            TrackerCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            TrackerCliError::NoPackages => CliError {
                code: "NO_PACKAGES".to_string(),
                message: "No packages found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            TrackerCliError::NoReports(skipped) => CliError {
                code: "NO_REPORTS".to_string(),
                message: format!("All {} packages were skipped", skipped),
                hint: Some("Run 'tracker validate' for details".to_string()),
            },
            TrackerCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} packages failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_packages: usize,
    valid_packages: usize,
    invalid_packages: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    index: usize,
    code: String,
    error: String,
}

#[derive(serde::Serialize)]
struct ActivityInfo {
    code: &'static str,
    name: &'static str,
    readings: &'static [&'static str],
}
