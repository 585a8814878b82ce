//! End-to-end conversion: parse an EMS export and write the selected outputs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::app::services::ems_parser::{EmsParser, ParseResult};
use crate::app::services::exporters::{write_metadata_file, write_raw_file, write_report_dir};
use crate::config::ConverterConfig;
use crate::constants::{METADATA_FILE_SUFFIX, RAW_FILE_SUFFIX, REPORT_DIR_SUFFIX};
use crate::{Error, Result};

/// Where each output is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub output_dir: PathBuf,
    pub raw_file: PathBuf,
    pub metadata_file: PathBuf,
    pub report_dir: PathBuf,
}

impl OutputLayout {
    /// Default names derived from the input file stem
    pub fn for_input(input: &Path, output_dir: impl Into<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        let stem = input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "ems".to_string());

        Self {
            raw_file: output_dir.join(format!("{}{}", stem, RAW_FILE_SUFFIX)),
            metadata_file: output_dir.join(format!("{}{}", stem, METADATA_FILE_SUFFIX)),
            report_dir: output_dir.join(format!("{}{}", stem, REPORT_DIR_SUFFIX)),
            output_dir,
        }
    }

    /// Custom RAW file name; relative names are placed in the output directory
    pub fn with_raw_file(mut self, name: impl AsRef<Path>) -> Self {
        self.raw_file = self.output_dir.join(name);
        self
    }

    /// Custom metadata file name; relative names are placed in the output directory
    pub fn with_metadata_file(mut self, name: impl AsRef<Path>) -> Self {
        self.metadata_file = self.output_dir.join(name);
        self
    }

    /// Custom report directory name; relative names are placed in the output directory
    pub fn with_report_dir(mut self, name: impl AsRef<Path>) -> Self {
        self.report_dir = self.output_dir.join(name);
        self
    }
}

/// Files produced by a conversion, plus the parse result they came from
#[derive(Debug, Clone)]
pub struct ConversionOutputs {
    pub raw_file: Option<PathBuf>,
    pub metadata_file: Option<PathBuf>,
    pub report_dir: Option<PathBuf>,
    pub report_files: Vec<PathBuf>,
    pub parsed: ParseResult,
}

/// Runs parsing and output generation for one EMS file
#[derive(Debug, Clone)]
pub struct Converter {
    config: ConverterConfig,
    parser: EmsParser,
}

impl Converter {
    pub fn new(config: ConverterConfig) -> Self {
        let parser = EmsParser::new(config.clone());
        Self { config, parser }
    }

    /// Parse `input` and write every enabled output into `layout`
    pub fn convert(&self, input: &Path, layout: &OutputLayout) -> Result<ConversionOutputs> {
        info!("Starting EMS to PowerFactory conversion: {}", input.display());

        let result = self.run(input, layout);
        match &result {
            Ok(_) => info!("Conversion completed successfully"),
            Err(e) => error!("Conversion failed: {}", e),
        }
        result
    }

    fn run(&self, input: &Path, layout: &OutputLayout) -> Result<ConversionOutputs> {
        let parsed = self.parser.parse_file(input)?;

        fs::create_dir_all(&layout.output_dir).map_err(|e| {
            Error::io(
                format!(
                    "Failed to create output directory {}",
                    layout.output_dir.display()
                ),
                e,
            )
        })?;

        let raw_file = if self.config.write_raw {
            write_raw_file(&parsed.model, &layout.raw_file)?;
            Some(layout.raw_file.clone())
        } else {
            None
        };

        let metadata_file = if self.config.write_metadata {
            write_metadata_file(&parsed.model, &layout.metadata_file)?;
            Some(layout.metadata_file.clone())
        } else {
            None
        };

        let (report_dir, report_files) = if self.config.write_report {
            let files = write_report_dir(&parsed.model, &layout.report_dir)?;
            (Some(layout.report_dir.clone()), files)
        } else {
            (None, Vec::new())
        };

        Ok(ConversionOutputs {
            raw_file,
            metadata_file,
            report_dir,
            report_files,
            parsed,
        })
    }
}
