//! Section boundary location
//!
//! An EMS export is a fixed-order concatenation of sections, each closed by a
//! marker line such as `0 / End of Bus Data`. The bus section starts after a
//! fixed preamble; every later section starts on the line after the previous
//! section's marker.

use std::fmt;
use std::ops::Range;

use crate::constants::{
    BRANCH_END_MARKER, BUS_END_MARKER, GENERATOR_END_MARKER, LOAD_END_MARKER,
    TRANSFORMER_END_MARKER,
};

/// Record section kinds in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub enum SectionKind {
    Bus,
    Load,
    Generator,
    Branch,
    Transformer,
}

impl SectionKind {
    /// All sections in the order they appear in the input
    pub const ORDER: [SectionKind; 5] = [
        SectionKind::Bus,
        SectionKind::Load,
        SectionKind::Generator,
        SectionKind::Branch,
        SectionKind::Transformer,
    ];

    /// Marker text terminating this section
    pub fn end_marker(self) -> &'static str {
        match self {
            SectionKind::Bus => BUS_END_MARKER,
            SectionKind::Load => LOAD_END_MARKER,
            SectionKind::Generator => GENERATOR_END_MARKER,
            SectionKind::Branch => BRANCH_END_MARKER,
            SectionKind::Transformer => TRANSFORMER_END_MARKER,
        }
    }

    /// Lowercase name used in logs
    pub fn label(self) -> &'static str {
        match self {
            SectionKind::Bus => "bus",
            SectionKind::Load => "load",
            SectionKind::Generator => "generator",
            SectionKind::Branch => "branch",
            SectionKind::Transformer => "transformer",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Index of the first line at or after `start` containing `marker`
///
/// Matching is a case-sensitive substring test. Returns `lines.len()` when
/// no such line exists, meaning the section runs to the end of input.
pub fn find_section_end<S: AsRef<str>>(lines: &[S], start: usize, marker: &str) -> usize {
    lines
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, line)| line.as_ref().contains(marker))
        .map(|(index, _)| index)
        .unwrap_or(lines.len())
}

/// Row range of one section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBounds {
    pub kind: SectionKind,

    /// First candidate record line
    pub start: usize,

    /// Marker line index, or input length when the marker is missing
    pub end: usize,

    /// Whether the marker line was found
    pub terminated: bool,
}

impl SectionBounds {
    /// Locate one section starting at `start`
    pub fn locate<S: AsRef<str>>(lines: &[S], kind: SectionKind, start: usize) -> Self {
        let start = start.min(lines.len());
        let end = find_section_end(lines, start, kind.end_marker());

        Self {
            kind,
            start,
            end,
            terminated: end < lines.len(),
        }
    }

    /// Line indices of candidate records
    pub fn rows(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of candidate record lines
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bounds of all five sections, chained in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionLayout {
    sections: Vec<SectionBounds>,
}

impl SectionLayout {
    /// Locate every section, starting the bus section at `bus_start`
    pub fn locate<S: AsRef<str>>(lines: &[S], bus_start: usize) -> Self {
        let mut sections = Vec::with_capacity(SectionKind::ORDER.len());
        let mut start = bus_start;

        for kind in SectionKind::ORDER {
            let bounds = SectionBounds::locate(lines, kind, start);
            start = bounds.end + 1;
            sections.push(bounds);
        }

        Self { sections }
    }

    /// Bounds for one section kind
    pub fn get(&self, kind: SectionKind) -> &SectionBounds {
        // ORDER and `sections` share indexing
        &self.sections[kind as usize]
    }

    /// Sections whose terminator marker is missing
    pub fn unterminated(&self) -> Vec<SectionKind> {
        self.sections
            .iter()
            .filter(|s| !s.terminated)
            .map(|s| s.kind)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionBounds> {
        self.sections.iter()
    }
}
