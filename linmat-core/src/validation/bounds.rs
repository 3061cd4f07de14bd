//! Array size validation with overflow protection

use crate::error::{FormatError, Result};

/// Number of elements of `element_size` bytes in `byte_len` bytes
///
/// Fails if the length is not a whole number of elements.
pub const fn validate_array_bounds(byte_len: usize, element_size: usize) -> Result<usize> {
    if element_size == 0 || byte_len % element_size != 0 {
        return Err(FormatError::ArrayAlignment);
    }

    let count = byte_len / element_size;

    // Reject arrays that could overflow downstream index arithmetic
    if count > isize::MAX as usize / 8 {
        return Err(FormatError::ArraySizeOverflow);
    }

    Ok(count)
}

/// Product of a declared shape, with overflow protection
pub fn checked_element_count(dims: &[usize]) -> Result<usize> {
    dims.iter().try_fold(1usize, |acc, &d| {
        acc.checked_mul(d).ok_or(FormatError::ArraySizeOverflow)
    })
}

/// Validate that `index` lies inside `0..bound`
pub const fn validate_index(index: usize, bound: usize) -> Result<()> {
    if index >= bound {
        return Err(FormatError::IndexOutOfBounds);
    }
    Ok(())
}
