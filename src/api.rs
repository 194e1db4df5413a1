//! High-level API for CSV to libSVM conversion
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use csv2lsvm::api::Converter;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let summary = Converter::new()
//!     .with_precision(4)
//!     .with_max_rows(1000)
//!     .convert_file("data.csv", "data.svm")?;
//!
//! println!("Converted {} rows", summary.rows);
//! # Ok(())
//! # }
//! ```

use crate::config::{ConvertConfig, ReadOptions, WriteOptions};
use crate::core::{Result, Section};
use crate::data::{build_section, write_section};
use chrono::{DateTime, Local};
use log::info;
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::Path;

/// Converter with builder-style configuration
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConvertConfig,
}

impl Converter {
    /// Create a converter with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter from a complete configuration
    pub fn from_config(config: ConvertConfig) -> Self {
        Self { config }
    }

    /// Set fractional digits of the output
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.config.write.precision = precision;
        self
    }

    /// Stop reading after `max_rows` rows
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.config.read.max_rows = Some(max_rows);
        self
    }

    /// Treat the first input line as a header
    pub fn with_header(mut self, skip_header: bool) -> Self {
        self.config.read.skip_header = skip_header;
        self
    }

    /// Append to the output file instead of truncating it
    pub fn with_append(mut self, append: bool) -> Self {
        self.config.write.append = append;
        self
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    pub fn read_options(&self) -> &ReadOptions {
        &self.config.read
    }

    pub fn write_options(&self) -> &WriteOptions {
        &self.config.write
    }

    /// Convert a CSV file into a libsvm file
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<ConversionSummary> {
        let started_at = Local::now();
        info!("Reading {:?} at {}", input.as_ref(), started_at);

        let section = Section::from_csv_file(input, &self.config.read)?;
        let read_finished_at = Local::now();
        info!("Finished reading at {read_finished_at}");

        section.write_libsvm_file(output.as_ref(), &self.config.write)?;
        let finished_at = Local::now();
        info!("Finished writing {:?} at {}", output.as_ref(), finished_at);

        Ok(ConversionSummary::new(
            &section,
            self.config.write.precision,
            started_at,
            read_finished_at,
            finished_at,
        ))
    }

    /// Convert CSV lines from `reader` into libsvm lines on `writer`
    pub fn convert<R: BufRead, W: Write>(&self, reader: R, writer: W) -> Result<ConversionSummary> {
        let started_at = Local::now();
        let section = build_section(reader, &self.config.read)?;
        let read_finished_at = Local::now();
        write_section(&section, writer, self.config.write.precision)?;

        Ok(ConversionSummary::new(
            &section,
            self.config.write.precision,
            started_at,
            read_finished_at,
            Local::now(),
        ))
    }
}

/// Outcome of one conversion
#[derive(Debug, Clone, Serialize)]
pub struct ConversionSummary {
    /// Rows written
    pub rows: usize,
    /// Largest column index written
    pub max_index: Option<usize>,
    pub precision: usize,
    pub started_at: DateTime<Local>,
    pub read_finished_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
}

impl ConversionSummary {
    fn new(
        section: &Section,
        precision: usize,
        started_at: DateTime<Local>,
        read_finished_at: DateTime<Local>,
        finished_at: DateTime<Local>,
    ) -> Self {
        Self {
            rows: section.len(),
            max_index: section.max_index(),
            precision,
            started_at,
            read_finished_at,
            finished_at,
        }
    }

    /// Wall time spent reading and writing
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Convenience functions for one-off conversions
pub mod quick {
    use super::*;

    /// Convert a CSV file to libsvm with default settings
    pub fn csv_to_libsvm<P: AsRef<Path>, Q: AsRef<Path>>(
        input: P,
        output: Q,
    ) -> Result<ConversionSummary> {
        Converter::new().convert_file(input, output)
    }

    /// Convert CSV text to libsvm text in memory
    pub fn convert_str(csv: &str, precision: usize) -> Result<String> {
        let mut out = Vec::new();
        Converter::new()
            .with_precision(precision)
            .convert(csv.as_bytes(), &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}
