//! Conversion settings and their persistence
//!
//! Settings can be stored as JSON so that a conversion can be repeated
//! with the same options from the CLI.

use crate::core::{ConvertError, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Fractional digits written when the caller does not choose
pub const DEFAULT_PRECISION: usize = 2;

/// Options controlling how a section is read
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    /// Stop after this many rows
    pub max_rows: Option<usize>,
    /// Discard the first line before decoding
    pub skip_header: bool,
    /// First data row to keep (not applied)
    pub start_row: usize,
    /// Columns to keep (not applied)
    pub columns: Vec<usize>,
}

impl ReadOptions {
    /// Warn about options that are carried but not applied
    pub(crate) fn warn_unapplied(&self) {
        if self.start_row != 0 {
            warn!("start_row={} is not supported and will be ignored", self.start_row);
        }
        if !self.columns.is_empty() {
            warn!("column selection {:?} is not supported and will be ignored", self.columns);
        }
    }
}

/// Options controlling how a section is written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Fractional digits for labels and values
    pub precision: usize,
    /// Append to an existing output instead of truncating it
    pub append: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            append: false,
        }
    }
}

/// Complete set of conversion settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    pub read: ReadOptions,
    pub write: WriteOptions,
}

impl ConvertConfig {
    /// Save settings to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| ConvertError::SinkUnwritable {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Load settings from a JSON file
    ///
    /// Missing fields take their default values.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(ConfigFile::load_from_file(path)?.into_config(DEFAULT_PRECISION))
    }
}

/// Write settings as found in a file; absent fields stay unset
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WriteOverrides {
    pub precision: Option<usize>,
    pub append: bool,
}

/// Settings as written in a JSON file, before defaults are chosen
///
/// Callers with their own precision default (such as the CLI) resolve
/// the file through [`ConfigFile::into_config`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub read: ReadOptions,
    pub write: WriteOverrides,
}

impl ConfigFile {
    /// Load settings from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConvertError::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let config = serde_json::from_reader(reader)?;
        Ok(config)
    }

    /// Fill unset values, using `default_precision` when the file has none
    pub fn into_config(self, default_precision: usize) -> ConvertConfig {
        ConvertConfig {
            read: self.read,
            write: WriteOptions {
                precision: self.write.precision.unwrap_or(default_precision),
                append: self.write.append,
            },
        }
    }
}
