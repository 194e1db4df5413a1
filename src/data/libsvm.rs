//! LibSVM format encoding
//!
//! Writes rows in the libsvm text format:
//! label index:value index:value ...
//!
//! Example at precision 2:
//! 10.00 1:1.00 2:2.00 3:3.00
//! -4.00 1:1.00 3:2.50

use crate::config::WriteOptions;
use crate::core::{ConvertError, Result, Row, Section, SparseVector};
use log::{debug, info};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// A row displayed as one libsvm line, without the newline
pub struct LibSvmLine<'a> {
    row: &'a Row,
    precision: usize,
}

impl fmt::Display for LibSvmLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*}", self.precision, self.row.label)?;
        for (index, value) in self.row.features.iter() {
            write!(f, " {}:{:.*}", index, self.precision, value)?;
        }
        Ok(())
    }
}

impl Row {
    /// Format this row as a libsvm line with `precision` fractional digits
    pub fn to_libsvm(&self, precision: usize) -> LibSvmLine<'_> {
        LibSvmLine {
            row: self,
            precision,
        }
    }
}

/// Encode a row as one newline-terminated libsvm line
pub fn encode_row(row: &Row, precision: usize) -> String {
    format!("{}\n", row.to_libsvm(precision))
}

/// Write every row of a section to `writer`, then flush it
pub fn write_section<W: Write>(section: &Section, mut writer: W, precision: usize) -> Result<()> {
    for row in section {
        writeln!(writer, "{}", row.to_libsvm(precision))?;
    }
    writer.flush()?;
    Ok(())
}

impl Section {
    /// Write this section to a libsvm file
    ///
    /// The file is truncated unless `options.append` is set.
    pub fn write_libsvm_file<P: AsRef<Path>>(&self, path: P, options: &WriteOptions) -> Result<()> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .append(options.append)
            .truncate(!options.append)
            .open(path)
            .map_err(|source| ConvertError::SinkUnwritable {
                path: path.to_path_buf(),
                source,
            })?;

        write_section(self, BufWriter::new(file), options.precision)?;
        info!(
            "Wrote {} rows to {:?} at precision {}",
            self.len(),
            path,
            options.precision
        );
        Ok(())
    }

    /// Load a section from a libsvm file
    pub fn from_libsvm_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConvertError::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        read_libsvm_section(BufReader::new(file))
    }
}

/// Read libsvm lines back into a section
///
/// Blank lines and `#` comments are skipped.
pub fn read_libsvm_section<R: BufRead>(reader: R) -> Result<Section> {
    let mut rows = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let row = parse_libsvm_line(line).map_err(|e| {
            ConvertError::ParseError(format!("Error parsing line {}: {}", line_num + 1, e))
        })?;
        rows.push(row);
    }

    debug!("Parsed {} libsvm rows", rows.len());
    Ok(Section::new(rows))
}

/// Parse a single libsvm line
///
/// Indices are kept as written and must be positive and strictly increasing.
pub fn parse_libsvm_line(line: &str) -> Result<Row> {
    let mut parts = line.split_whitespace();

    let label_str = parts
        .next()
        .ok_or_else(|| ConvertError::ParseError("Empty line".to_string()))?;
    let label = label_str
        .parse::<f64>()
        .map_err(|_| ConvertError::ParseError(format!("Invalid label: {label_str}")))?;

    let mut features = SparseVector::empty();
    for token in parts {
        let (index_str, value_str) = token.split_once(':').ok_or_else(|| {
            ConvertError::ParseError(format!("Invalid feature format: {token}"))
        })?;

        let index = index_str.parse::<usize>().map_err(|_| {
            ConvertError::ParseError(format!("Invalid feature index: {index_str}"))
        })?;
        let value = value_str.parse::<f64>().map_err(|_| {
            ConvertError::ParseError(format!("Invalid feature value: {value_str}"))
        })?;

        if index == 0 {
            return Err(ConvertError::ParseError(format!(
                "Feature index must be positive: {token}"
            )));
        }
        if features.max_index().map_or(false, |last| index <= last) {
            return Err(ConvertError::ParseError(format!(
                "Feature indices must increase: {token}"
            )));
        }

        features.push(index, value);
    }

    Ok(Row::new(label, features))
}
