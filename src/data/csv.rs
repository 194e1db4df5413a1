//! CSV decoding
//!
//! Turns comma-separated lines into sparse rows where:
//! - Column 0 is the label
//! - Every other column keeps its 1-based position as feature index
//! - Blank or non-numeric feature cells are omitted
//! - A blank line ends the section

use crate::config::ReadOptions;
use crate::core::{ConvertError, Decoded, Result, Row, Section, SparseVector};
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Characters trimmed from both ends of every cell
const CELL_WHITESPACE: &[char] = &[' ', '\t', '\r'];

/// Decode one CSV line into a row
///
/// The line may or may not carry its trailing newline. A non-numeric label
/// yields [`Decoded::Fail`]; a line with no content yields [`Decoded::Empty`].
pub fn decode_line(line: &str) -> Decoded {
    let line = line.strip_suffix('\n').unwrap_or(line);

    let mut label = 0.0;
    let mut features = SparseVector::empty();
    let mut has_content = false;

    // Column index follows the delimiter count, whether or not a cell is kept.
    for (column, cell) in line.split(',').enumerate() {
        let cell = cell.trim_matches(CELL_WHITESPACE);
        if cell.is_empty() {
            continue;
        }
        has_content = true;

        match cell.parse::<f64>() {
            Ok(value) if column == 0 => label = value,
            Ok(value) => features.push(column, value),
            Err(_) if column == 0 => {
                return Decoded::Fail(ConvertError::UnreadableLabel {
                    cell: cell.to_string(),
                })
            }
            Err(_) => {}
        }
    }

    if has_content {
        Decoded::Row(Row::new(label, features))
    } else {
        Decoded::Empty
    }
}

/// Lazily decodes rows from a line reader
///
/// Iteration ends at end of input, at the first blank line, or when the
/// very first data row has an unreadable label. A label failure on any later
/// row is yielded once as [`ConvertError::RowDecodeFailed`] and ends iteration.
pub struct RowReader<R> {
    reader: R,
    line: Vec<u8>,
    rows_read: usize,
    skip_header: bool,
    done: bool,
}

impl<R: BufRead> RowReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            rows_read: 0,
            skip_header: false,
            done: false,
        }
    }

    /// Discard the first line before decoding
    pub fn skip_header(mut self, skip: bool) -> Self {
        self.skip_header = skip;
        self
    }

    /// Number of rows yielded so far
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    /// Read raw bytes so a stray non-UTF-8 byte only spoils its own cell
    fn read_line(&mut self) -> std::io::Result<usize> {
        self.line.clear();
        self.reader.read_until(b'\n', &mut self.line)
    }

    fn finish(&mut self, reason: &str) -> Option<Result<Row>> {
        debug!("Stopped after {} rows: {}", self.rows_read, reason);
        self.done = true;
        None
    }
}

impl<R: BufRead> Iterator for RowReader<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if self.skip_header {
            self.skip_header = false;
            match self.read_line() {
                Ok(0) => return self.finish("end of input"),
                Ok(_) => debug!(
                    "Skipped header: {}",
                    String::from_utf8_lossy(&self.line).trim_end()
                ),
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }

        match self.read_line() {
            Ok(0) => return self.finish("end of input"),
            Err(e) => {
                self.done = true;
                return Some(Err(e.into()));
            }
            Ok(_) => {}
        }

        let decoded = decode_line(&String::from_utf8_lossy(&self.line));
        match decoded {
            Decoded::Row(row) => {
                self.rows_read += 1;
                Some(Ok(row))
            }
            Decoded::Empty => self.finish("blank line"),
            Decoded::Fail(e) if self.rows_read == 0 => {
                let reason = format!("first row unusable ({e})");
                self.finish(&reason)
            }
            Decoded::Fail(e) => {
                self.done = true;
                Some(Err(ConvertError::RowDecodeFailed {
                    row_index: self.rows_read,
                    reason: Box::new(e),
                }))
            }
        }
    }
}

/// Read a section from a line reader
///
/// Rows collected before a later-row decode failure are dropped and the
/// error is returned.
pub fn build_section<R: BufRead>(reader: R, options: &ReadOptions) -> Result<Section> {
    options.warn_unapplied();

    let limit = options.max_rows.unwrap_or(usize::MAX);
    let rows = RowReader::new(reader)
        .skip_header(options.skip_header)
        .take(limit)
        .collect::<Result<Vec<_>>>()?;

    let section = Section::new(rows);
    info!(
        "Read {} rows (max column index {:?})",
        section.len(),
        section.max_index()
    );
    Ok(section)
}

impl Section {
    /// Load a section from a CSV file
    pub fn from_csv_file<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConvertError::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Reading CSV from {path:?}");
        build_section(BufReader::new(file), options)
    }
}
