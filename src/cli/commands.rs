//! Command implementations for the EMS converter CLI
//!
//! This module wires argument parsing, logging, configuration and the
//! [`Converter`] together and prints the final summary.

use colored::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use tracing::{debug, info};

use crate::app::services::converter::{ConversionOutputs, Converter, OutputLayout};
use crate::cli::args::Args;
use crate::constants::LOG_FILE_NAME;
use crate::{Error, Result};

/// Result of a CLI run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub outputs: ConversionOutputs,
    pub log_file: PathBuf,
}

/// Main entry point for the convert command
///
/// 1. Resolve paths and prepare the output directory
/// 2. Set up logging to stderr and the conversion log
/// 3. Load configuration and run the conversion
/// 4. Print the summary
pub fn run(args: Args) -> Result<RunOutcome> {
    let start_time = Instant::now();

    let input = args.resolved_input()?;
    let output_dir = args.resolved_output_dir()?;
    prepare_output_dir(&output_dir)?;

    let log_file = output_dir.join(LOG_FILE_NAME);
    setup_logging(&args, &log_file)?;

    info!("Starting EMS converter");
    debug!("Command line arguments: {:?}", args);

    let config = args.load_config()?;
    debug!("Loaded configuration: {:?}", config);

    let layout = build_layout(&args, &input, output_dir);
    let outputs = Converter::new(config).convert(&input, &layout)?;

    if !args.quiet {
        print_summary(&outputs, &log_file, start_time.elapsed().as_millis());
    }

    Ok(RunOutcome { outputs, log_file })
}

/// Output layout from default names plus any custom names on the command line
fn build_layout(args: &Args, input: &Path, output_dir: PathBuf) -> OutputLayout {
    let mut layout = OutputLayout::for_input(input, output_dir);

    if let Some(name) = &args.raw_file {
        layout = layout.with_raw_file(name);
    }
    if let Some(name) = &args.json_file {
        layout = layout.with_metadata_file(name);
    }
    if let Some(name) = &args.report_dir {
        layout = layout.with_report_dir(name);
    }

    layout
}

fn prepare_output_dir(output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir).map_err(|e| {
        Error::io(
            format!("Failed to create output directory '{}'", output_dir.display()),
            e,
        )
    })
}

/// Set up structured logging to stderr and to the conversion log file
fn setup_logging(args: &Args, log_file: &Path) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ems_converter={}", log_level)));

    let file = File::create(log_file).map_err(|e| {
        Error::io(
            format!("Failed to create log file '{}'", log_file.display()),
            e,
        )
    })?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

fn print_summary(outputs: &ConversionOutputs, log_file: &Path, elapsed_ms: u128) {
    let model = &outputs.parsed.model;
    let stats = model.statistics();

    println!("\n{}", "Conversion Summary".bright_green().bold());

    let print_path = |label: &str, path: &Option<PathBuf>| {
        if let Some(path) = path {
            println!(
                "  {} {}",
                label.bright_cyan(),
                path.display().to_string().bright_white()
            );
        }
    };
    print_path("PowerFactory RAW file:", &outputs.raw_file);
    print_path("Metadata JSON file:", &outputs.metadata_file);
    print_path("Report directory:", &outputs.report_dir);
    println!(
        "  {} {}",
        "Log file:".bright_cyan(),
        log_file.display().to_string().bright_white()
    );

    println!("\n{}", "System Statistics".bright_green().bold());
    for (label, count) in [
        ("Buses:", stats.total_buses),
        ("Transformers:", stats.total_transformers),
        ("Generators:", stats.total_generators),
        ("Loads:", stats.total_loads),
        ("Branches:", stats.total_branches),
    ] {
        println!(
            "  {} {}",
            label.bright_cyan(),
            count.to_string().bright_white().bold()
        );
    }
    println!(
        "  {} {:.1} MVA",
        "Total generation capacity:".bright_cyan(),
        stats.total_generation_capacity_mva
    );
    println!(
        "  {} {:.1} MW",
        "Total load demand:".bright_cyan(),
        stats.total_load_demand_mw
    );

    let skipped = outputs.parsed.stats.warnings.len();
    if skipped > 0 {
        println!(
            "  {} {}",
            "Rows skipped:".bright_red(),
            skipped.to_string().bright_red().bold()
        );
    }
    for kind in &outputs.parsed.stats.missing_terminators {
        println!(
            "  {} {}",
            "Missing marker:".bright_yellow(),
            kind.end_marker()
        );
    }

    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        elapsed_ms.to_string().bright_white()
    );
}
