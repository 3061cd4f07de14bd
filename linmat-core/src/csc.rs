//! Conversion between sparse entries and compressed-column arrays
//!
//! Column `j` occupies `col_ptrs[j]..col_ptrs[j + 1]` of `values` and
//! `row_indices`. Rows inside a column are not required to be sorted, but a
//! column's entries must be contiguous, `col_ptrs[0] == 0` and
//! `col_ptrs[ncols] == nnz`. A row appears at most once per column.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::error::{FormatError, Result};
use crate::operator::SparseEntry;
use crate::validation::validate_index;

/// Compressed sparse column arrays of one matrix
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CscArrays {
    nrows: usize,
    ncols: usize,
    values: Vec<f64>,
    row_indices: Vec<usize>,
    col_ptrs: Vec<usize>,
}

impl CscArrays {
    /// Wrap raw arrays as read from a container
    ///
    /// `values` and `row_indices` may be longer than `col_ptrs[ncols]`;
    /// slots past that boundary are ignored. Nothing is checked until
    /// [`CscArrays::validate`] or [`CscArrays::entries`] runs.
    pub fn from_raw(
        nrows: usize,
        ncols: usize,
        values: Vec<f64>,
        row_indices: Vec<usize>,
        col_ptrs: Vec<usize>,
    ) -> Self {
        Self {
            nrows,
            ncols,
            values,
            row_indices,
            col_ptrs,
        }
    }

    /// Build column-major arrays from unordered entries
    ///
    /// Entries are re-keyed by `(col, row)` so one ascending traversal
    /// visits them column by column. Empty columns get a zero-width range.
    /// A repeated `(row, col)` keeps the last value.
    pub fn from_entries<I>(nrows: usize, ncols: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = SparseEntry>,
    {
        let mut transposed = BTreeMap::new();
        for entry in entries {
            validate_index(entry.row, nrows)?;
            validate_index(entry.col, ncols)?;
            transposed.insert((entry.col, entry.row), entry.value);
        }

        let nnz = transposed.len();
        let mut values = Vec::with_capacity(nnz);
        let mut row_indices = Vec::with_capacity(nnz);
        let mut col_ptrs = alloc::vec![0; ncols + 1];

        // first column whose pointer has not been written yet
        let mut next_col = 0;
        for ((col, row), value) in transposed {
            while next_col <= col {
                col_ptrs[next_col] = values.len();
                next_col += 1;
            }
            row_indices.push(row);
            values.push(value);
        }
        while next_col <= ncols {
            col_ptrs[next_col] = values.len();
            next_col += 1;
        }

        Ok(Self {
            nrows,
            ncols,
            values,
            row_indices,
            col_ptrs,
        })
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of stored entries, `col_ptrs[ncols]`
    pub fn nnz(&self) -> usize {
        self.col_ptrs.last().copied().unwrap_or(0)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn row_indices(&self) -> &[usize] {
        &self.row_indices
    }

    pub fn col_ptrs(&self) -> &[usize] {
        &self.col_ptrs
    }

    /// Check the compressed-column invariants
    ///
    /// Beyond the pointer checks of [`validate_col_ptrs`], every row index
    /// must lie inside the shape and appear at most once in its column.
    pub fn validate(&self) -> Result<()> {
        let nnz = validate_col_ptrs(
            &self.col_ptrs,
            self.ncols,
            self.values.len().min(self.row_indices.len()),
        )?;
        if self.row_indices[..nnz].iter().any(|&r| r >= self.nrows) {
            return Err(FormatError::SparseLayout);
        }

        let mut rows = Vec::new();
        for bounds in self.col_ptrs.windows(2) {
            rows.clear();
            rows.extend_from_slice(&self.row_indices[bounds[0]..bounds[1]]);
            rows.sort_unstable();
            if rows.windows(2).any(|pair| pair[0] == pair[1]) {
                return Err(FormatError::SparseLayout);
            }
        }
        Ok(())
    }

    /// Number of slots past `col_ptrs[ncols]` that [`CscArrays::entries`] ignores
    pub fn trailing_slots(&self) -> usize {
        self.values.len().min(self.row_indices.len()).saturating_sub(self.nnz())
    }

    /// Row indices and values of column `col`
    pub fn column(&self, col: usize) -> Option<(&[usize], &[f64])> {
        let start = *self.col_ptrs.get(col)?;
        let end = *self.col_ptrs.get(col + 1)?;
        Some((
            self.row_indices.get(start..end)?,
            self.values.get(start..end)?,
        ))
    }

    /// Expand into entries with a single forward scan
    pub fn entries(&self) -> Result<Vec<SparseEntry>> {
        self.validate()?;

        let nnz = self.nnz();
        let mut entries = Vec::with_capacity(nnz);
        let mut current_col = 0;
        for k in 0..nnz {
            // last column whose range starts at or before k
            while self.col_ptrs[current_col + 1] <= k {
                current_col += 1;
            }
            entries.push(SparseEntry::new(
                self.row_indices[k],
                current_col,
                self.values[k],
            ));
        }
        Ok(entries)
    }
}

/// Check column pointers against the column count and the stored slots
///
/// Returns `nnz`, the final pointer. Only the pointers are inspected, so
/// this runs without decoding row indices or values.
pub fn validate_col_ptrs(col_ptrs: &[usize], ncols: usize, slots: usize) -> Result<usize> {
    if col_ptrs.len() != ncols + 1 || col_ptrs[0] != 0 {
        return Err(FormatError::SparseLayout);
    }
    if col_ptrs.windows(2).any(|w| w[0] > w[1]) {
        return Err(FormatError::SparseLayout);
    }
    let nnz = col_ptrs[ncols];
    if nnz > slots {
        return Err(FormatError::SparseLayout);
    }
    Ok(nnz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use hashbrown::HashMap;
    use proptest::prelude::*;

    fn entry_map(entries: &[SparseEntry]) -> HashMap<(usize, usize), f64> {
        entries.iter().map(|e| ((e.row, e.col), e.value)).collect()
    }

    #[test]
    fn test_column_grouping() {
        let entries = [
            SparseEntry::new(0, 0, 1.0),
            SparseEntry::new(2, 1, 5.0),
            SparseEntry::new(1, 1, 3.0),
        ];
        let csc = CscArrays::from_entries(3, 2, entries).unwrap();
        assert_eq!(csc.col_ptrs(), &[0, 1, 3]);
        assert_eq!(csc.column(0), Some((&[0][..], &[1.0][..])));

        let (rows, values) = csc.column(1).unwrap();
        let mut col1: Vec<(usize, f64)> =
            rows.iter().copied().zip(values.iter().copied()).collect();
        col1.sort_by_key(|&(r, _)| r);
        assert_eq!(col1, vec![(1, 3.0), (2, 5.0)]);
    }

    #[test]
    fn test_empty_columns() {
        let entries = [SparseEntry::new(1, 0, 2.0), SparseEntry::new(0, 3, 4.0)];
        let csc = CscArrays::from_entries(2, 5, entries).unwrap();
        assert_eq!(csc.col_ptrs(), &[0, 1, 1, 1, 2, 2]);
        assert_eq!(csc.nnz(), 2);
        assert_eq!(entry_map(&csc.entries().unwrap()), entry_map(&entries));
    }

    #[test]
    fn test_empty_matrix() {
        let csc = CscArrays::from_entries(0, 0, core::iter::empty()).unwrap();
        assert_eq!(csc.col_ptrs(), &[0]);
        assert!(csc.entries().unwrap().is_empty());

        let csc = CscArrays::from_entries(3, 2, core::iter::empty()).unwrap();
        assert_eq!(csc.col_ptrs(), &[0, 0, 0]);
    }

    #[test]
    fn test_out_of_bounds_entry() {
        assert_eq!(
            CscArrays::from_entries(2, 2, [SparseEntry::new(2, 0, 1.0)]),
            Err(FormatError::IndexOutOfBounds)
        );
    }

    #[test]
    fn test_trailing_slots_ignored() {
        let csc = CscArrays::from_raw(
            3,
            2,
            vec![1.0, 2.0, 9.0, 9.0],
            vec![0, 2, 1, 1],
            vec![0, 1, 2],
        );
        assert_eq!(csc.trailing_slots(), 2);
        let entries = csc.entries().unwrap();
        assert_eq!(
            entries,
            vec![SparseEntry::new(0, 0, 1.0), SparseEntry::new(2, 1, 2.0)]
        );
    }

    #[test]
    fn test_malformed_layouts() {
        // decreasing pointers
        let csc = CscArrays::from_raw(2, 2, vec![1.0, 2.0], vec![0, 1], vec![0, 2, 1]);
        assert_eq!(csc.validate(), Err(FormatError::SparseLayout));
        // wrong pointer count
        let csc = CscArrays::from_raw(2, 2, vec![1.0], vec![0], vec![0, 1]);
        assert_eq!(csc.entries(), Err(FormatError::SparseLayout));
        // pointer past the arrays
        let csc = CscArrays::from_raw(2, 1, vec![1.0], vec![0], vec![0, 2]);
        assert_eq!(csc.validate(), Err(FormatError::SparseLayout));
        // row index outside the shape
        let csc = CscArrays::from_raw(2, 1, vec![1.0], vec![5], vec![0, 1]);
        assert_eq!(csc.validate(), Err(FormatError::SparseLayout));
        // first pointer not zero
        let csc = CscArrays::from_raw(2, 1, vec![1.0], vec![0], vec![1, 1]);
        assert_eq!(csc.validate(), Err(FormatError::SparseLayout));
    }

    #[test]
    fn test_repeated_row_in_column() {
        let csc = CscArrays::from_raw(2, 1, vec![1.0, 2.0], vec![0, 0], vec![0, 2]);
        assert_eq!(csc.validate(), Err(FormatError::SparseLayout));
        assert_eq!(csc.entries(), Err(FormatError::SparseLayout));

        // the same row in different columns is fine
        let csc = CscArrays::from_raw(2, 2, vec![1.0, 2.0], vec![0, 0], vec![0, 1, 2]);
        assert_eq!(csc.entries().unwrap().len(), 2);
    }

    #[test]
    fn test_col_ptrs_alone() {
        assert_eq!(validate_col_ptrs(&[0, 1, 1], 2, 1), Ok(1));
        assert_eq!(validate_col_ptrs(&[0, 1, 3], 2, 3), Ok(3));
        assert_eq!(validate_col_ptrs(&[0, 1, 3], 2, 2), Err(FormatError::SparseLayout));
        assert_eq!(validate_col_ptrs(&[0, 1], 2, 5), Err(FormatError::SparseLayout));
        assert_eq!(validate_col_ptrs(&[0, 2, 1], 2, 5), Err(FormatError::SparseLayout));
        assert_eq!(validate_col_ptrs(&[0], 0, 0), Ok(0));
    }

    fn unique_entries() -> impl Strategy<Value = (usize, usize, Vec<SparseEntry>)> {
        (1usize..30, 1usize..30).prop_flat_map(|(nrows, ncols)| {
            let cells = proptest::collection::vec((0..nrows, 0..ncols, -100.0f64..100.0), 0..60);
            (Just(nrows), Just(ncols), cells).prop_map(|(nrows, ncols, cells)| {
                let unique: HashMap<(usize, usize), f64> =
                    cells.into_iter().map(|(r, c, v)| ((r, c), v)).collect();
                let entries = unique
                    .into_iter()
                    .map(|((r, c), v)| SparseEntry::new(r, c, v))
                    .collect();
                (nrows, ncols, entries)
            })
        })
    }

    proptest! {
        #[test]
        fn prop_csc_roundtrip((nrows, ncols, entries) in unique_entries()) {
            let csc = CscArrays::from_entries(nrows, ncols, entries.iter().copied()).unwrap();
            let ptrs = csc.col_ptrs();

            prop_assert_eq!(ptrs.len(), ncols + 1);
            prop_assert_eq!(ptrs[0], 0);
            prop_assert_eq!(ptrs[ncols], entries.len());
            prop_assert!(ptrs.windows(2).all(|w| w[0] <= w[1]));

            let decoded = csc.entries().unwrap();
            prop_assert_eq!(decoded.len(), entries.len());
            prop_assert_eq!(entry_map(&decoded), entry_map(&entries));
        }
    }
}
