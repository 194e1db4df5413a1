//! Conversion of numeric CSV data into the sparse libSVM text format
//!
//! Column 0 of every CSV line is the label. Remaining numeric cells become
//! `index:value` pairs keyed by their original column position, so blank or
//! non-numeric cells simply disappear from the output line.

pub mod api;
pub mod config;
pub mod core;
pub mod data;

// Re-export main types for convenience
pub use crate::api::{ConversionSummary, Converter};
pub use crate::config::{
    ConfigFile, ConvertConfig, ReadOptions, WriteOptions, WriteOverrides, DEFAULT_PRECISION,
};
pub use crate::core::types::*;
pub use crate::core::{ConvertError, Result};
pub use crate::data::{build_section, decode_line, encode_row, write_section, RowReader};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
