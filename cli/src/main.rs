//! Club simulator command line
//!
//! Reads a day log, replays it and prints the trace and revenue report to
//! stdout. A log the reader refuses prints the offending tokens (or the
//! missing line) to stdout and exits with a failure status; other errors and
//! diagnostics go to stderr.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use club_simulator_core::{input, Engine, InputError};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One line per trace record, then one per table
    Text,
    /// Structured trace and report
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "club-simulator", version, about = "Replay one day of a pay-per-hour venue")]
struct Args {
    /// Day log: table count, working hours, hourly price, then one event per line
    input: PathBuf,

    /// Directory the input file is looked up in
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl Args {
    fn input_path(&self) -> PathBuf {
        match &self.config_dir {
            Some(dir) => dir.join(&self.input),
            None => self.input.clone(),
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn simulate(text: &str, format: OutputFormat) -> Result<String> {
    let parsed = input::parse(text)?;
    debug!(
        tables = parsed.config.table_count,
        events = parsed.events.len(),
        "day log read"
    );

    let mut engine = Engine::with_memory_stores(parsed.config)?;
    let output = engine.run(&parsed.events)?;

    match format {
        OutputFormat::Text => Ok(output.render()),
        OutputFormat::Json => output.to_json().context("failed to encode output as JSON"),
    }
}

fn read_log(path: &Path) -> Result<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Err(anyhow!(
            "File {} not found. Please check the file path and try again.",
            path.display()
        )),
        Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
    }
}

fn run(args: &Args) -> Result<String> {
    let text = read_log(&args.input_path())?;
    simulate(&text, args.format)
}

/// Line printed to stdout for a day log the reader refused
fn rejected_log_line(err: &anyhow::Error) -> Option<String> {
    let input_err = err.downcast_ref::<InputError>()?;
    Some(
        input_err
            .offending_tokens()
            .unwrap_or_else(|| input_err.to_string()),
    )
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(&args) {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            match rejected_log_line(&err) {
                Some(line) => println!("{line}"),
                None => {
                    error!(error = %err, "simulation failed");
                    eprintln!("{err:#}");
                }
            }
            ExitCode::FAILURE
        }
    }
}
