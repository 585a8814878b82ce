//! EMS flat-text parser for power-system network exports
//!
//! This module recovers a typed network model from EMS exports: a short
//! header preamble followed by five fixed-order record sections, each closed
//! by an `End of ... Data` marker line. The format has no column schema, so
//! several fields are recovered by explicit heuristic scan rules.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`parser`] - Parsing orchestration and file handling
//! - [`header`] - Description and base frequency extraction
//! - [`section`] - Section boundary location by terminator markers
//! - [`tokenizer`] - Quote-aware and whitespace line splitting
//! - [`heuristics`] - Scan rules for fields without fixed positions
//! - [`record_builders`] - Per-section record construction
//! - [`field_parsers`] - Utility functions for token coercion
//! - [`stats`] - Parsing statistics and skipped-row warnings
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ems_converter::{ConverterConfig, EmsParser};
//!
//! # fn example() -> ems_converter::Result<()> {
//! let parser = EmsParser::new(ConverterConfig::default());
//! let result = parser.parse_file(std::path::Path::new("system.ems"))?;
//!
//! println!("Parsed {} buses with {} skipped rows",
//!          result.model.buses.len(),
//!          result.stats.warnings.len());
//! # Ok(())
//! # }
//! ```

pub mod field_parsers;
pub mod header;
pub mod heuristics;
pub mod parser;
pub mod record_builders;
pub mod section;
pub mod stats;
pub mod tokenizer;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use header::SystemHeader;
pub use parser::EmsParser;
pub use section::{SectionBounds, SectionKind, SectionLayout};
pub use stats::{ParseResult, ParseStats, ParseWarning, SkipReason};
pub use tokenizer::TokenizerMode;
