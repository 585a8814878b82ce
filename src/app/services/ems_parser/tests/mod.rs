//! Test utilities and fixtures for EMS parser testing
//!
//! This module provides sample EMS content and helper functions used across
//! the parser test modules.

use std::io::Write;
use tempfile::NamedTempFile;

use super::parser::EmsParser;
use super::stats::ParseResult;
use crate::config::ConverterConfig;

mod record_tests;
mod tokenizer_tests;

/// Smallest complete export: one bus, every other section empty
pub const MINIMAL_EMS: &str = "SYS / Test System
(unused header line)
(unused header line)
101 'BUS1' 110.0 1 0 0 1 1 1.02 0.0 1 1 1.1 0.9
0 / End of Bus Data
0 / End of Load Data
0 / End of Generator Data
0 / End of Branch Data
0 / End of Transformer Data
";

/// Export with one or two records in every section
pub const SAMPLE_EMS: &str = "SYS / Test Network / rev 2
BASEFREQ 60.0
comment line
101 'BUS ONE' 110.0 2 0 0 1 1 1.02 -5.5 1 1
102 'BUS2' 33.0 1 0 0 2 3 0.98 -10.0 1 1
0 / End of Bus Data
102 1 50.0 20.0 1
0 / End of Load Data
101 1 80.0 10.0 60.0 40.0 1.01 150.0 'Siemens SGen5 2000E'
0 / End of Generator Data
101 102 1 0.01 0.1 0.02 200.0 1
0 / End of Branch Data
101 102 1 1 1 0.0 0.0 0
0.005 0.08 60.0
1.025 110.0
1 33.0 'T1'
0 / End of Transformer Data
";

/// Build an export from per-section record lines with a three-line preamble
pub fn build_ems(
    buses: &[&str],
    loads: &[&str],
    generators: &[&str],
    branches: &[&str],
    transformers: &[&str],
) -> String {
    let mut content = String::from("SYS / Generated\nheader\nheader\n");

    let sections = [
        (buses, "End of Bus Data"),
        (loads, "End of Load Data"),
        (generators, "End of Generator Data"),
        (branches, "End of Branch Data"),
        (transformers, "End of Transformer Data"),
    ];

    for (rows, marker) in sections {
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        content.push_str("0 / ");
        content.push_str(marker);
        content.push('\n');
    }

    content
}

/// Parse in-memory content with the default configuration
pub fn parse(content: &str) -> ParseResult {
    EmsParser::new(ConverterConfig::default()).parse_str(content, "test.ems")
}

/// Write content to a temporary EMS file
pub fn create_temp_ems_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}
