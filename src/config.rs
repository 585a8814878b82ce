//! Configuration management and validation.
//!
//! Provides the converter configuration: header layout, default system
//! metadata, warning preview length and which outputs to generate.

use crate::constants::{
    DEFAULT_BASE_FREQUENCY_HZ, DEFAULT_BUS_SECTION_START, DEFAULT_DESCRIPTION,
    DEFAULT_HEADER_SCAN_LINES, DEFAULT_PREVIEW_CHARS, DEFAULT_SYSTEM_NAME,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Converter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Line index of the first bus record (lines before it are the header preamble)
    pub bus_section_start: usize,

    /// Number of leading lines searched for the base frequency keyword
    pub header_scan_lines: usize,

    /// Base frequency used when the header declares none (Hz)
    pub default_base_frequency: f64,

    /// System name recorded in conversion metadata
    pub system_name: String,

    /// Description used when the first header line has no `/` segment
    pub default_description: String,

    /// Characters of a malformed line kept in warning previews
    pub preview_chars: usize,

    /// Generate the PowerFactory RAW file
    pub write_raw: bool,

    /// Generate the JSON metadata document
    pub write_metadata: bool,

    /// Generate the tabular report directory
    pub write_report: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            bus_section_start: DEFAULT_BUS_SECTION_START,
            header_scan_lines: DEFAULT_HEADER_SCAN_LINES,
            default_base_frequency: DEFAULT_BASE_FREQUENCY_HZ,
            system_name: DEFAULT_SYSTEM_NAME.to_string(),
            default_description: DEFAULT_DESCRIPTION.to_string(),
            preview_chars: DEFAULT_PREVIEW_CHARS,
            write_raw: true,
            write_metadata: true,
            write_report: true,
        }
    }
}

impl ConverterConfig {
    /// Load configuration from a JSON file; missing keys fall back to defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!(
                "Invalid config file {}: {}",
                path.display(),
                e
            ))
        })?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from an optional file, falling back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Set the first bus record line
    pub fn with_bus_section_start(mut self, line: usize) -> Self {
        self.bus_section_start = line;
        self
    }

    /// Set the number of header lines scanned for the base frequency
    pub fn with_header_scan_lines(mut self, lines: usize) -> Self {
        self.header_scan_lines = lines;
        self
    }

    /// Set the default base frequency
    pub fn with_default_base_frequency(mut self, frequency: f64) -> Self {
        self.default_base_frequency = frequency;
        self
    }

    /// Set the recorded system name
    pub fn with_system_name(mut self, name: impl Into<String>) -> Self {
        self.system_name = name.into();
        self
    }

    /// Set the warning preview length
    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars;
        self
    }

    /// Select which outputs are generated
    pub fn with_outputs(mut self, raw: bool, metadata: bool, report: bool) -> Self {
        self.write_raw = raw;
        self.write_metadata = metadata;
        self.write_report = report;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.header_scan_lines == 0 {
            return Err(Error::configuration(
                "header_scan_lines must be greater than 0",
            ));
        }

        if !self.default_base_frequency.is_finite() || self.default_base_frequency <= 0.0 {
            return Err(Error::configuration(format!(
                "default_base_frequency must be a positive number, got {}",
                self.default_base_frequency
            )));
        }

        if self.preview_chars == 0 {
            return Err(Error::configuration("preview_chars must be greater than 0"));
        }

        if !(self.write_raw || self.write_metadata || self.write_report) {
            return Err(Error::configuration(
                "At least one output (raw, metadata, report) must be enabled",
            ));
        }

        Ok(())
    }
}
