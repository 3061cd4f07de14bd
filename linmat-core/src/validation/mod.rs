//! Pure validation helpers for MAT-file layout
//!
//! Alignment arithmetic and size checks with overflow protection. No I/O.

pub mod bounds;
pub mod format;

pub use bounds::*;
pub use format::*;
