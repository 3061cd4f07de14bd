#![cfg_attr(not(test), no_std)]

//! linmat-core - MAT-file container definitions for linear operators
//!
//! Pure format definitions, layout converters and the operator data model.
//! Everything here is free of I/O; the `linmat` crate builds the container
//! reader, writer and kind codecs on top of it.

extern crate alloc;

pub mod csc;
pub mod error;
pub mod format;
pub mod operator;
pub mod packed;
pub mod traits;
pub mod validation;

pub use csc::CscArrays;
pub use error::*;
pub use format::*;
pub use operator::*;
pub use traits::*;
pub use validation::{align_to_8, checked_element_count, validate_array_bounds};
