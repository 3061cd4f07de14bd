//! Packed storage of symmetric matrices
//!
//! A symmetric matrix of order `n` stores only its upper triangle, column
//! by column, in `n(n+1)/2` values. Element `(i, j)` with `i <= j` lives at
//! `i + j(j+1)/2`.

use crate::error::{FormatError, Result};

/// Packed length for order `n`, `None` on overflow
pub const fn packed_len(n: usize) -> Option<usize> {
    match n.checked_add(1) {
        Some(m) => match n.checked_mul(m) {
            Some(p) => Some(p / 2),
            None => None,
        },
        None => None,
    }
}

/// Position of logical element `(i, j)` in the packed array
pub const fn packed_index(i: usize, j: usize) -> usize {
    let (i, j) = if i <= j { (i, j) } else { (j, i) };
    i + j * (j + 1) / 2
}

/// Check that a packed array of `len` values belongs to order `n`
pub const fn validate_packed_len(n: usize, len: usize) -> Result<()> {
    match packed_len(n) {
        Some(expected) if expected == len => Ok(()),
        Some(_) => Err(FormatError::PackedLength),
        None => Err(FormatError::ArraySizeOverflow),
    }
}
