//! Alignment utilities for MAT-file data elements

use crate::format::constants::ALIGNMENT_BOUNDARY;

/// Align an offset to a specific power-of-two boundary
pub const fn align_to_boundary(offset: usize, boundary: usize) -> usize {
    (offset + boundary - 1) & !(boundary - 1)
}

/// Align an offset to the 8-byte element boundary
pub const fn align_to_8(offset: usize) -> usize {
    align_to_boundary(offset, ALIGNMENT_BOUNDARY)
}
