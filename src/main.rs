//! tape-layout: tape-and-reel layout generator
//!
//! Reads a JSON job describing one or more carrier tapes and writes the
//! corresponding CAD drawing script.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use tape_layout::config;
use tape_layout::job;
use tape_layout::script::{write_document, ScriptError};

/// Tape-and-reel layout generator.
///
/// Computes tape outlines, sprocket holes and part pockets for EIA-481
/// carrier tapes and writes them as a CAD drawing script.
#[derive(Parser, Debug)]
#[command(name = "tape-layout")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the job file (reads stdin when omitted or `-`)
    #[arg(value_name = "JOB_FILE")]
    job: Option<PathBuf>,

    /// Write the script to this file instead of stdout
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Entry point for the tape-layout generator.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let cfg = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            if args.config.is_none() {
                if let Some(default_path) = config::default_config_path() {
                    eprintln!("\nDefault config location: {}", default_path.display());
                }
            }
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        job = ?args.job,
        "Starting tape-layout"
    );

    // Lay out every tape before touching the output
    let tapes = match job::load_job(args.job.as_deref()).and_then(|job| job.layout(&cfg)) {
        Ok(tapes) => tapes,
        Err(e) => {
            error!(error = %e, "Failed to lay out job");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let format = cfg.number_format();
    let written = match &args.output {
        Some(path) => File::create(path)
            .map_err(ScriptError::from)
            .and_then(|file| write_document(BufWriter::new(file), &tapes, format))
            .map(|_| info!(path = %path.display(), "Script written")),
        None => write_document(io::stdout().lock(), &tapes, format).map(|_| ()),
    };

    match written {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Failed to write script");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
