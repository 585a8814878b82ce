//! EMS header parsing and metadata extraction
//!
//! The first line may carry a `/`-delimited description, and any of the
//! first few lines may declare the base frequency after a `BASEFREQ` keyword.

use regex::Regex;
use std::sync::OnceLock;

use crate::constants::BASE_FREQUENCY_KEYWORD;

static DECIMAL_NUMBER: OnceLock<Regex> = OnceLock::new();

fn decimal_number() -> &'static Regex {
    DECIMAL_NUMBER.get_or_init(|| Regex::new(r"\d+\.?\d*").expect("static regex is valid"))
}

/// Header metadata found in an EMS export
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemHeader {
    /// Text between the first and second `/` of line 0
    pub description: Option<String>,

    /// Base frequency in Hz from the last `BASEFREQ` line
    pub base_frequency: Option<f64>,
}

impl SystemHeader {
    /// Parse header metadata, searching `scan_lines` leading lines for the frequency
    pub fn parse<S: AsRef<str>>(lines: &[S], scan_lines: usize) -> Self {
        let description = lines.first().and_then(|line| parse_description(line.as_ref()));

        let base_frequency = lines
            .iter()
            .take(scan_lines)
            .filter_map(|line| parse_base_frequency(line.as_ref()))
            .last();

        Self {
            description,
            base_frequency,
        }
    }
}

/// Description segment of a header line, if it contains `/`
pub fn parse_description(line: &str) -> Option<String> {
    line.trim()
        .split('/')
        .nth(1)
        .map(|segment| segment.trim().to_string())
}

/// First decimal number after a case-insensitive `BASEFREQ` keyword
pub fn parse_base_frequency(line: &str) -> Option<f64> {
    // ASCII uppercasing keeps byte offsets aligned with `line`
    let keyword_at = line.to_ascii_uppercase().find(BASE_FREQUENCY_KEYWORD)?;
    let rest = &line[keyword_at + BASE_FREQUENCY_KEYWORD.len()..];

    decimal_number()
        .find(rest)
        .and_then(|found| found.as_str().parse::<f64>().ok())
}
