//! Main EMS parser implementation
//!
//! This module provides the main EmsParser struct that coordinates header
//! parsing, section location and record building to produce a complete
//! [`NetworkModel`].

use std::path::Path;
use tracing::{debug, info, warn};

use super::header::SystemHeader;
use super::record_builders::RecordBuilder;
use super::section::{SectionKind, SectionLayout};
use super::stats::{ParseResult, ParseStats};
use crate::app::models::{ConversionInfo, NetworkModel};
use crate::config::ConverterConfig;
use crate::{Error, Result};

/// EMS flat-text parser
#[derive(Debug, Clone)]
pub struct EmsParser {
    config: ConverterConfig,
}

impl EmsParser {
    /// Create a new parser with the given configuration
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Parse an EMS export from disk
    ///
    /// A missing, unreadable or non-UTF-8 file is an error and yields no
    /// model. Malformed rows are skipped and reported through
    /// [`ParseStats::warnings`].
    pub fn parse_file(&self, path: &Path) -> Result<ParseResult> {
        if !path.exists() {
            return Err(Error::input_not_found(path.display().to_string()));
        }

        info!("Reading EMS file: {}", path.display());

        let bytes = std::fs::read(path)
            .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;

        let content = String::from_utf8(bytes)
            .map_err(|e| Error::encoding(path.display().to_string(), e))?;
        let lines = split_lines(&content);

        Ok(self.parse_lines(&lines, &path.display().to_string()))
    }

    /// Parse EMS content held in memory
    pub fn parse_str(&self, content: &str, source_name: &str) -> ParseResult {
        let lines = split_lines(content);
        self.parse_lines(&lines, source_name)
    }

    /// Parse already-split lines into a network model
    pub fn parse_lines(&self, lines: &[&str], source_name: &str) -> ParseResult {
        let mut stats = ParseStats::new();
        stats.total_lines = lines.len();

        let header = SystemHeader::parse(lines, self.config.header_scan_lines);
        let conversion_info = ConversionInfo::new(
            source_name,
            header
                .base_frequency
                .unwrap_or(self.config.default_base_frequency),
            self.config.system_name.clone(),
            header
                .description
                .unwrap_or_else(|| self.config.default_description.clone()),
        );
        debug!(
            "Header: base frequency {} Hz, description '{}'",
            conversion_info.base_frequency, conversion_info.description
        );

        let mut model = NetworkModel::new(conversion_info);
        let layout = SectionLayout::locate(lines, self.config.bus_section_start);

        for bounds in layout.iter() {
            debug!(
                "{} section: lines {}..{} ({} candidate rows)",
                bounds.kind,
                bounds.start,
                bounds.end,
                bounds.len()
            );
        }

        stats.missing_terminators = layout.unterminated();
        for kind in &stats.missing_terminators {
            warn!(
                "Missing '{}' marker; {} section runs to end of input",
                kind.end_marker(),
                kind
            );
        }

        let builder = RecordBuilder::new(lines, self.config.preview_chars);

        for bus in builder.build_buses(layout.get(SectionKind::Bus), &mut stats) {
            if let Some(previous) = model.insert_bus(bus) {
                debug!(
                    "Bus {} defined more than once; keeping the later record",
                    previous.bus_number
                );
            }
        }
        model.loads = builder.build_loads(layout.get(SectionKind::Load), &mut stats);
        model.generators = builder.build_generators(layout.get(SectionKind::Generator), &mut stats);
        model.branches = builder.build_branches(layout.get(SectionKind::Branch), &mut stats);
        model.transformers =
            builder.build_transformers(layout.get(SectionKind::Transformer), &mut stats);

        model.update_statistics();

        info!(
            "Parsed {} buses, {} loads, {} generators, {} branches, {} transformers",
            model.buses.len(),
            model.loads.len(),
            model.generators.len(),
            model.branches.len(),
            model.transformers.len()
        );
        if !stats.warnings.is_empty() {
            info!(
                "Skipped {} malformed rows ({:.1}% success rate)",
                stats.warnings.len(),
                stats.success_rate()
            );
        }

        ParseResult { model, stats }
    }
}

/// Split content into lines on `\n`, `\r\n` or a bare `\r`
///
/// Exports from older systems may use `\r` alone as the line ending.
pub fn split_lines(content: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = content;

    while let Some(pos) = rest.find(['\n', '\r']) {
        lines.push(&rest[..pos]);
        let terminator = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[pos + terminator..];
    }
    if !rest.is_empty() {
        lines.push(rest);
    }

    lines
}

impl Default for EmsParser {
    fn default() -> Self {
        Self::new(ConverterConfig::default())
    }
}
