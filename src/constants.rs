//! Application constants for the EMS converter
//!
//! This module contains section markers, heuristic scan windows, default
//! values and the fixed equipment metadata that the EMS format never carries.

use std::ops::Range;

// =============================================================================
// Input Layout
// =============================================================================

/// Terminator marker for the bus section
pub const BUS_END_MARKER: &str = "End of Bus Data";

/// Terminator marker for the load section
pub const LOAD_END_MARKER: &str = "End of Load Data";

/// Terminator marker for the generator section
pub const GENERATOR_END_MARKER: &str = "End of Generator Data";

/// Terminator marker for the branch section
pub const BRANCH_END_MARKER: &str = "End of Branch Data";

/// Terminator marker for the transformer section
pub const TRANSFORMER_END_MARKER: &str = "End of Transformer Data";

/// Number of preamble lines before the first bus record
pub const DEFAULT_BUS_SECTION_START: usize = 3;

/// Number of leading lines searched for the base frequency keyword
pub const DEFAULT_HEADER_SCAN_LINES: usize = 10;

/// Case-insensitive keyword announcing the base frequency
pub const BASE_FREQUENCY_KEYWORD: &str = "BASEFREQ";

/// Character that starts section trailers and comment rows
pub const SKIP_LINE_PREFIX: char = '0';

/// Number of characters kept when previewing a malformed line
pub const DEFAULT_PREVIEW_CHARS: usize = 50;

// =============================================================================
// Record Shapes
// =============================================================================

/// Minimum token count for a bus record
pub const BUS_MIN_TOKENS: usize = 10;

/// Minimum token count for a load record
pub const LOAD_MIN_TOKENS: usize = 5;

/// Minimum token count for a generator record
pub const GENERATOR_MIN_TOKENS: usize = 8;

/// Minimum token count for a branch record
pub const BRANCH_MIN_TOKENS: usize = 8;

/// Minimum token count for a transformer header line
pub const TRANSFORMER_MIN_TOKENS: usize = 8;

/// Physical lines consumed by one transformer record
pub const TRANSFORMER_BLOCK_LINES: usize = 4;

// =============================================================================
// Heuristic Scan Windows
// =============================================================================

/// Tokens scanned for the bus base voltage (kV)
pub const BUS_BASE_KV_WINDOW: Range<usize> = 2..8;

/// Tokens scanned for the bus voltage magnitude
pub const BUS_VOLTAGE_WINDOW: Range<usize> = 8..12;

/// Tokens scanned for the bus area number
pub const BUS_AREA_WINDOW: Range<usize> = 6..10;

/// Plausible per-unit voltage magnitude window (inclusive)
pub const VOLTAGE_MAGNITUDE_MIN_PU: f64 = 0.8;
pub const VOLTAGE_MAGNITUDE_MAX_PU: f64 = 1.5;

/// Tokens scanned for generator numeric values
pub const GENERATOR_NUMERIC_WINDOW: Range<usize> = 2..15;

/// Words of a generator description used for the model string
pub const GENERATOR_MODEL_WORDS: usize = 2;

// =============================================================================
// Defaults
// =============================================================================

/// System frequency used when the header does not declare one
pub const DEFAULT_BASE_FREQUENCY_HZ: f64 = 50.0;

/// System name recorded in conversion metadata
pub const DEFAULT_SYSTEM_NAME: &str = "EMS Power System";

/// Description recorded when the header line carries none
pub const DEFAULT_DESCRIPTION: &str = "Converted from EMS system format";

/// Bus defaults
pub mod bus_defaults {
    pub const BUS_TYPE: i32 = 1;
    pub const BASE_KV: f64 = 0.0;
    pub const VOLTAGE_MAGNITUDE: f64 = 1.0;
    pub const VOLTAGE_ANGLE: f64 = 0.0;
    pub const AREA: i32 = 1;
    pub const ZONE: i32 = 1;
    pub const MAX_VOLTAGE: f64 = 1.1;
    pub const MIN_VOLTAGE: f64 = 0.9;
}

/// Load defaults
pub mod load_defaults {
    pub const ID: &str = "1";
    pub const LOAD_TYPE: &str = "1";
    pub const VOLTAGE_DEPENDENCE: i32 = 1;
    pub const AREA: i32 = 1;
    pub const ZONE: i32 = 1;
}

/// Generator defaults
pub mod generator_defaults {
    pub const ID: &str = "1";
    pub const MAX_REACTIVE_MVAR: f64 = 999.0;
    pub const MIN_REACTIVE_MVAR: f64 = -999.0;
    pub const VOLTAGE_SETPOINT_PU: f64 = 1.0;
    pub const MVA_BASE: f64 = 100.0;
    pub const INERTIA: f64 = 3.0;
    pub const DAMPING: f64 = 0.0;
    pub const FUEL_TYPE: &str = "Unknown";
    pub const EFFICIENCY: f64 = 0.95;
    pub const YEAR_COMMISSIONED: i32 = 2000;
    pub const MACHINE_TYPE: &str = "Synchronous Generator";
}

/// Branch defaults (length and equipment are absent from the format)
pub mod branch_defaults {
    pub const CIRCUIT_ID: &str = "1";
    pub const RESISTANCE: f64 = 0.0;
    pub const REACTANCE: f64 = 0.0;
    pub const CHARGING_SUSCEPTANCE: f64 = 0.0;
    pub const MVA_RATING: f64 = 100.0;
    pub const LENGTH_KM: f64 = 1.0;
    pub const CONDUCTOR_TYPE: &str = "Unknown";
    pub const TOWER_TYPE: &str = "Unknown";
    pub const BRAND: &str = "Unknown";
    pub const YEAR_INSTALLED: i32 = 2000;
}

/// Transformer defaults (ranges and nameplate data are absent from the format)
pub mod transformer_defaults {
    pub const CIRCUIT_ID: &str = "1";
    pub const WINDING_TYPE: i32 = 2;
    pub const CONTROL_METHOD: i32 = 1;
    pub const RESISTANCE: f64 = 0.0;
    pub const REACTANCE: f64 = 0.0;
    pub const NOMINAL_MVA: f64 = 100.0;
    pub const MAGNETIZING_CONDUCTANCE: f64 = 0.0;
    pub const MAGNETIZING_SUSCEPTANCE: f64 = 0.0;
    pub const TAP_POSITION: f64 = 1.0;
    pub const FROM_BUS_VOLTAGE_KV: f64 = 110.0;
    pub const TO_BUS_VOLTAGE_KV: f64 = 33.0;
    pub const MIN_TAP: f64 = 0.9;
    pub const MAX_TAP: f64 = 1.1;
    pub const TAP_STEP: f64 = 0.01;
    pub const MIN_ANGLE: f64 = -30.0;
    pub const MAX_ANGLE: f64 = 30.0;
    pub const ANGLE_STEP: f64 = 1.0;
    pub const PHASE_ANGLE: f64 = 0.0;
    pub const BRAND: &str = "Unknown";
    pub const MODEL: &str = "Standard";
    pub const YEAR_MANUFACTURED: i32 = 2000;
    pub const COOLING_TYPE: &str = "ONAN";
    pub const VECTOR_GROUP: &str = "YNd11";
    pub const EQUIPMENT_TYPE: &str = "Power Transformer";
}

// =============================================================================
// Output Naming
// =============================================================================

/// Suffix of the generated RAW file (`<stem>_powerfactory.raw`)
pub const RAW_FILE_SUFFIX: &str = "_powerfactory.raw";

/// Suffix of the generated metadata file (`<stem>_metadata.json`)
pub const METADATA_FILE_SUFFIX: &str = "_metadata.json";

/// Suffix of the generated report directory (`<stem>_report`)
pub const REPORT_DIR_SUFFIX: &str = "_report";

/// Log file written next to the outputs
pub const LOG_FILE_NAME: &str = "conversion.log";

/// Default output directory
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Converter version recorded in metadata
pub const CONVERTER_VERSION: &str = env!("CARGO_PKG_VERSION");
