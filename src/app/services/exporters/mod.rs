//! Output writers for parsed network models
//!
//! Each writer takes a finished [`NetworkModel`](crate::app::models::NetworkModel)
//! and produces one artifact:
//!
//! - [`raw_writer`] - PowerFactory-compatible RAW text file
//! - [`metadata`] - JSON document with statistics, brand data and equipment details
//! - [`report`] - Directory of CSV sheets built with polars
//!
//! Writers never mutate the model and never re-derive statistics; they read
//! what the parser's aggregation step already computed.

pub mod metadata;
pub mod raw_writer;
pub mod report;


pub use metadata::{MetadataDocument, write_metadata_file};
pub use raw_writer::{RawWriter, write_raw_file};
pub use report::{ReportSheet, write_report_dir};
