//! Core type definitions for sparse rows and sections

use crate::core::ConvertError;

/// Sparse vector representation with sorted indices
///
/// Indices are CSV column positions, so gaps mark omitted cells.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SparseVector {
    /// Sorted column indices of present values
    pub indices: Vec<usize>,
    /// Values corresponding to indices
    pub values: Vec<f64>,
}

impl SparseVector {
    /// Create a new sparse vector, ensuring indices are sorted
    pub fn new(indices: Vec<usize>, values: Vec<f64>) -> Self {
        assert_eq!(
            indices.len(),
            values.len(),
            "Indices and values must have same length"
        );

        let mut pairs: Vec<_> = indices.into_iter().zip(values).collect();
        pairs.sort_by_key(|&(idx, _)| idx);

        let (indices, values): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        Self { indices, values }
    }

    /// Create an empty sparse vector
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append an entry past the current last index
    pub fn push(&mut self, index: usize, value: f64) {
        debug_assert!(
            self.indices.last().map_or(true, |&last| last < index),
            "indices must strictly increase"
        );
        self.indices.push(index);
        self.values.push(value);
    }

    /// Get the value at a specific index, if present
    pub fn get(&self, index: usize) -> Option<f64> {
        self.indices
            .binary_search(&index)
            .ok()
            .map(|pos| self.values[pos])
    }

    /// Iterate over `(index, value)` pairs in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Largest stored index
    pub fn max_index(&self) -> Option<usize> {
        self.indices.last().copied()
    }

    /// Check if vector is empty
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// One observation: a label and its sparse features
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    /// Value of CSV column 0
    pub label: f64,
    /// Feature columns that held a number
    pub features: SparseVector,
}

impl Row {
    /// Create a new row
    pub fn new(label: f64, features: SparseVector) -> Self {
        Self { label, features }
    }

    /// Build a row from `(index, value)` pairs
    pub fn from_entries(label: f64, entries: &[(usize, f64)]) -> Self {
        let (indices, values) = entries.iter().copied().unzip();
        Self::new(label, SparseVector::new(indices, values))
    }
}

/// Outcome of decoding a single CSV line
#[derive(Debug)]
pub enum Decoded {
    /// A data row
    Row(Row),
    /// A structurally blank line; ends the section
    Empty,
    /// Column 0 held text that is not a number
    Fail(ConvertError),
}

impl Decoded {
    /// Check if the line was structurally blank
    pub fn is_empty(&self) -> bool {
        matches!(self, Decoded::Empty)
    }
}

/// Ordered batch of rows from one input source
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Section {
    rows: Vec<Row>,
}

impl Section {
    /// Create a section from rows in input order
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the section holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in input order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Iterate over rows in input order
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Consume the section, returning its rows
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Largest column index used by any row
    ///
    /// This is the width of the dense matrix the section came from, minus
    /// trailing columns that were blank everywhere.
    pub fn max_index(&self) -> Option<usize> {
        self.rows
            .iter()
            .filter_map(|row| row.features.max_index())
            .max()
    }
}

impl<'a> IntoIterator for &'a Section {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
