//! MAT-file container access
//!
//! The reader exposes the stored variables of one container as parsed
//! [`Variable`] headers; the writer frames encoded matrix elements, with or
//! without zlib compression, behind a 128-byte header.

pub mod backend;
pub mod reader;
pub mod variable;
pub mod writer;

pub use backend::Backing;
pub use reader::{ContainerReader, Variables};
pub use variable::{SparseParts, Variable};
pub use writer::{ContainerWriter, MatrixBuilder};
