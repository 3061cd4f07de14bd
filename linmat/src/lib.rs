//! linmat - Linear operators in MAT files
//!
//! Reads and writes dense vectors, dense matrices, packed symmetric
//! matrices and sparse matrices as level-5 MAT-file containers, detecting
//! the stored kind without prior knowledge.
//!
//! ## Architecture
//!
//! - **linmat-core**: Container format definitions, layout converters and the
//!   operator data model (no I/O)
//! - **linmat**: Container reader and writer, kind codecs, probing and the
//!   read/write session
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use linmat::{LinearOperator, MatFile, SymmetricMatrix};
//!
//! fn example() -> linmat::Result<()> {
//!     let session = MatFile::new();
//!     let matrix = SymmetricMatrix::new(3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
//!         .map_err(|source| linmat::Error::Format { path: "s.mat".into(), source })?;
//!     session.write("s.mat", &LinearOperator::from(matrix))?;
//!
//!     let info = session.read_header("s.mat")?;
//!     assert_eq!((info.nrows(), info.ncols()), (3, 3));
//!     let operator = session.read("s.mat")?;
//!     println!("read a {}", operator.kind());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **mmap** (default): Memory-mapped container reads
//! - **serde**: `Serialize`/`Deserialize` for metadata and configuration

pub use linmat_core::{
    // Data model
    CscArrays, LinearOperator, LinearOperatorData, LinearOperatorInfo, Matrix, OperatorKind,
    SparseEntry, SparseMatrix, StorageKind, SymmetricMatrix, Vector,
    // Format definitions
    FormatError, MatHeader,
};

pub mod codec;
pub mod config;
pub mod container;
pub mod error;
pub mod plugin;
pub mod probe;
pub mod session;

pub use codec::{codec_for, KindCodec, PROBE_ORDER};
pub use config::{Compression, WriteConfig};
pub use error::{AccessMode, CodecError, Error, Result};
pub use plugin::{LinearOperatorFormat, MatFormat};
pub use probe::{probe, probe_with, Probe};
pub use session::MatFile;
