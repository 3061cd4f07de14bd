//! Level-5 MAT-file container definitions
//!
//! Pure wire-format definitions: header, tag tables, element framing and
//! numeric conversion. No I/O happens here.

pub mod byte_order;
pub mod constants;
pub mod element;
pub mod header;
pub mod numeric;

pub use byte_order::ByteOrder;
pub use constants::{names, ArrayClass, ArrayFlags, DataType};
pub use element::{Element, ElementReader, ElementWriter};
pub use header::{identify, MatHeader};
