//! Abstract interfaces shared by the format definitions and the I/O layer

use crate::operator::LinearOperatorInfo;

/// Trait for backends that hold the raw bytes of a container
///
/// Implemented by memory-mapped files and in-memory buffers alike.
pub trait StorageBackend {
    /// Get a slice of the underlying data
    fn as_slice(&self) -> &[u8];

    /// Get the size of the data in bytes
    fn size(&self) -> usize {
        self.as_slice().len()
    }
}

impl StorageBackend for alloc::vec::Vec<u8> {
    fn as_slice(&self) -> &[u8] {
        self
    }
}

/// Format-agnostic access to a decoded linear operator
pub trait LinearOperatorData {
    /// Metadata describing this operator
    fn info(&self) -> LinearOperatorInfo;

    /// Logical element at `(row, col)`
    ///
    /// Returns `None` outside the shape, and for sparse matrices at
    /// positions with no stored entry.
    fn get_element(&self, row: usize, col: usize) -> Option<f64>;

    /// Logical dimensions as (rows, cols)
    fn dimensions(&self) -> (usize, usize) {
        let info = self.info();
        (info.nrows(), info.ncols())
    }
}
