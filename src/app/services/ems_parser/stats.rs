//! Parsing statistics and result structures for EMS processing
//!
//! Skipped rows are collected as structured [`ParseWarning`]s so callers and
//! tests can inspect them without reading log output.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::section::SectionKind;
use crate::Error;
use crate::app::models::NetworkModel;

/// Parsing result with the network model and statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed network model with statistics already computed
    pub model: NetworkModel,

    /// Parsing statistics and skipped-row warnings
    pub stats: ParseStats,
}

/// Why a row was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// Row has fewer tokens than its record kind needs
    TooFewTokens,
    /// A token could not be coerced to its field type
    InvalidField,
    /// A multi-line record ran past the end of its section
    TruncatedRecord,
    Other,
}

impl From<&Error> for SkipReason {
    fn from(error: &Error) -> Self {
        match error {
            Error::TooFewTokens { .. } => SkipReason::TooFewTokens,
            Error::InvalidField { .. } => SkipReason::InvalidField,
            Error::TruncatedRecord { .. } => SkipReason::TruncatedRecord,
            _ => SkipReason::Other,
        }
    }
}

/// A skipped input row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseWarning {
    pub section: SectionKind,

    /// 1-based line number in the input
    pub line_number: usize,

    /// Leading characters of the offending line
    pub preview: String,

    pub reason: SkipReason,

    /// Human-readable cause
    pub message: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error parsing {} line {}: {}... - {}",
            self.section, self.line_number, self.preview, self.message
        )
    }
}

/// Per-section row counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionStats {
    /// Candidate record rows examined (blank and `0`-prefixed lines excluded)
    pub rows_scanned: usize,

    /// Records successfully built
    pub records_parsed: usize,

    /// Rows skipped with a warning
    pub rows_skipped: usize,
}

/// Parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseStats {
    /// Total input lines
    pub total_lines: usize,

    /// Row counts per section
    pub sections: BTreeMap<SectionKind, SectionStats>,

    /// Skipped rows in input order
    pub warnings: Vec<ParseWarning>,

    /// Sections whose terminator marker was not found
    pub missing_terminators: Vec<SectionKind>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable counts for a section
    pub fn section_mut(&mut self, kind: SectionKind) -> &mut SectionStats {
        self.sections.entry(kind).or_default()
    }

    /// Counts for a section (zeroes when the section was never scanned)
    pub fn section(&self, kind: SectionKind) -> SectionStats {
        self.sections.get(&kind).cloned().unwrap_or_default()
    }

    /// Record a built record
    pub fn record_parsed(&mut self, kind: SectionKind) {
        let section = self.section_mut(kind);
        section.rows_scanned += 1;
        section.records_parsed += 1;
    }

    /// Record a skipped row
    pub fn record_skipped(&mut self, warning: ParseWarning) {
        let section = self.section_mut(warning.section);
        section.rows_scanned += 1;
        section.rows_skipped += 1;
        self.warnings.push(warning);
    }

    /// Warnings raised in one section
    pub fn warnings_for(&self, kind: SectionKind) -> impl Iterator<Item = &ParseWarning> {
        self.warnings.iter().filter(move |w| w.section == kind)
    }

    /// Total records built across all sections
    pub fn records_parsed(&self) -> usize {
        self.sections.values().map(|s| s.records_parsed).sum()
    }

    /// Total rows skipped across all sections
    pub fn rows_skipped(&self) -> usize {
        self.sections.values().map(|s| s.rows_skipped).sum()
    }

    /// Calculate success rate as a percentage of scanned rows
    pub fn success_rate(&self) -> f64 {
        let scanned: usize = self.sections.values().map(|s| s.rows_scanned).sum();
        if scanned == 0 {
            0.0
        } else {
            (self.records_parsed() as f64 / scanned as f64) * 100.0
        }
    }

    /// Check if parsing was clean (no skipped rows, all sections terminated)
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.missing_terminators.is_empty()
    }
}
