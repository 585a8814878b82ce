//! EMS Converter Library
//!
//! A Rust library for recovering a typed power-system model from legacy EMS
//! flat-text exports and converting it into PowerFactory-oriented outputs.
//!
//! This library provides tools for:
//! - Tokenizing EMS record lines with quote-aware splitting
//! - Locating section boundaries by their terminator markers
//! - Recovering bus, load, generator, branch and transformer fields with
//!   auditable heuristic rules when the format carries no column schema
//! - Aggregating the recovered records into a network model with statistics
//! - Writing PowerFactory RAW files, JSON metadata and tabular reports

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod converter;
        pub mod ems_parser;
        pub mod exporters;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    Branch, Bus, ConversionInfo, Generator, Load, ModelStatistics, NetworkModel, Transformer,
};
pub use app::services::ems_parser::{EmsParser, ParseResult, ParseStats, ParseWarning};
pub use config::ConverterConfig;

/// Result type alias for the EMS converter
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for EMS parsing and conversion
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Input file does not exist
    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    /// Input file is not valid UTF-8
    #[error("Input file is not valid UTF-8: {path}")]
    Encoding {
        path: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A record line has fewer tokens than its kind requires
    #[error("expected at least {required} tokens, found {found}")]
    TooFewTokens { found: usize, required: usize },

    /// A token could not be coerced to the type its field requires
    #[error("invalid {field} '{value}': {reason}")]
    InvalidField {
        field: String,
        value: String,
        reason: String,
    },

    /// A multi-line record was cut short by the end of its section
    #[error("record needs {required} lines but only {available} remain in section")]
    TruncatedRecord { required: usize, available: usize },

    /// JSON serialization failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Tabular report generation failed
    #[error("Report generation error: {message}")]
    Report {
        message: String,
        #[source]
        source: polars::error::PolarsError,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an input-not-found error
    pub fn input_not_found(path: impl Into<String>) -> Self {
        Self::InputNotFound { path: path.into() }
    }

    /// Create an encoding error for an undecodable input file
    pub fn encoding(path: impl Into<String>, source: std::string::FromUtf8Error) -> Self {
        Self::Encoding {
            path: path.into(),
            source,
        }
    }

    /// Create a too-few-tokens error
    pub fn too_few_tokens(found: usize, required: usize) -> Self {
        Self::TooFewTokens { found, required }
    }

    /// Create an invalid field error
    pub fn invalid_field(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a truncated record error
    pub fn truncated_record(required: usize, available: usize) -> Self {
        Self::TruncatedRecord {
            required,
            available,
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a report error with context
    pub fn report(message: impl Into<String>, source: polars::error::PolarsError) -> Self {
        Self::Report {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}

impl From<polars::error::PolarsError> for Error {
    fn from(error: polars::error::PolarsError) -> Self {
        Self::Report {
            message: "Report generation failed".to_string(),
            source: error,
        }
    }
}
