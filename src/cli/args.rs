//! Command-line argument definitions for the EMS converter
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::ConverterConfig;
use crate::constants::DEFAULT_OUTPUT_DIR;
use crate::{Error, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

/// CLI arguments for the EMS to PowerFactory converter
///
/// Recovers a structured network model from a legacy EMS flat-text export
/// and writes a PowerFactory RAW file, JSON metadata and a CSV report.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ems-converter",
    version,
    about = "Convert EMS system files to PowerFactory format",
    long_about = "Parses a legacy EMS flat-text network export (buses, loads, generators, \
                  branches and transformers), recovers fields the format leaves unlabelled, \
                  and writes a PowerFactory RAW file, a JSON metadata document and a \
                  directory of CSV report sheets.",
    after_help = "Examples:\n  \
                  ems-converter input.txt\n  \
                  ems-converter input.txt -o output_dir\n  \
                  ems-converter input.txt --raw-file custom.raw --json-file metadata.json"
)]
pub struct Args {
    /// Input EMS system file
    #[arg(value_name = "INPUT")]
    pub input_file: PathBuf,

    /// Output directory
    ///
    /// Created if it doesn't exist. Relative paths are resolved against the
    /// current directory.
    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        default_value = DEFAULT_OUTPUT_DIR,
        help = "Output directory"
    )]
    pub output_dir: PathBuf,

    /// Custom name for the PowerFactory RAW file
    #[arg(long = "raw-file", value_name = "NAME")]
    pub raw_file: Option<PathBuf>,

    /// Custom name for the metadata JSON file
    #[arg(long = "json-file", value_name = "NAME")]
    pub json_file: Option<PathBuf>,

    /// Custom name for the report directory
    #[arg(long = "report-dir", value_name = "NAME")]
    pub report_dir: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// JSON file with converter settings. Missing keys use defaults.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Skip the PowerFactory RAW file
    #[arg(long = "no-raw")]
    pub no_raw: bool,

    /// Skip the metadata JSON file
    #[arg(long = "no-metadata")]
    pub no_metadata: bool,

    /// Skip the CSV report directory
    #[arg(long = "no-report")]
    pub no_report: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl Args {
    /// Get the logging level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }

        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Input path resolved against the current directory
    pub fn resolved_input(&self) -> Result<PathBuf> {
        resolve_path(&self.input_file)
    }

    /// Output directory resolved against the current directory
    pub fn resolved_output_dir(&self) -> Result<PathBuf> {
        resolve_path(&self.output_dir)
    }

    /// Load the configuration file (if any) and apply flag overrides
    pub fn load_config(&self) -> Result<ConverterConfig> {
        let mut config = ConverterConfig::load(self.config_file.as_deref())?;

        if self.no_raw {
            config.write_raw = false;
        }
        if self.no_metadata {
            config.write_metadata = false;
        }
        if self.no_report {
            config.write_report = false;
        }

        config.validate()?;
        Ok(config)
    }
}

fn resolve_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    let cwd = std::env::current_dir()
        .map_err(|e| Error::io("Failed to determine current directory", e))?;
    Ok(cwd.join(path))
}
