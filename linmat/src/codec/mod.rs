//! Kind codecs
//!
//! One codec per operator kind. Each validates, describes, decodes and
//! encodes its kind; the prober and the session select codecs through
//! [`PROBE_ORDER`] and [`codec_for`] instead of inspecting payload types.

pub mod dense;
pub mod sparse;
pub mod symmetric;

pub use dense::{MatrixCodec, VectorCodec};
pub use sparse::SparseCodec;
pub use symmetric::{SymmetricCodec, SymmetricRecord};

use linmat_core::{LinearOperator, LinearOperatorInfo, OperatorKind};

use crate::container::{MatrixBuilder, Variable};
use crate::error::CodecError;

/// Validation, description and conversion for one operator kind
pub trait KindCodec: Sync {
    fn kind(&self) -> OperatorKind;

    /// What this codec expects to find, used in error reports
    fn description(&self) -> &'static str;

    /// Coarse check on class, rank, flags and element type
    ///
    /// Never fails; anything unreadable is simply not accepted.
    fn accepts(&self, variable: &Variable<'_>) -> bool;

    /// Metadata of an accepted variable, without decoding its payload
    fn describe(&self, variable: &Variable<'_>) -> Result<LinearOperatorInfo, CodecError>;

    /// Decode an accepted variable
    fn decode(&self, variable: &Variable<'_>) -> Result<LinearOperator, CodecError>;

    /// Encode an operator of this codec's kind
    fn encode(&self, operator: &LinearOperator) -> Result<MatrixBuilder, CodecError>;
}

impl std::fmt::Debug for dyn KindCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KindCodec")
            .field("kind", &self.kind())
            .finish()
    }
}

/// Candidate codecs in probing priority
pub static PROBE_ORDER: [&dyn KindCodec; 4] =
    [&VectorCodec, &MatrixCodec, &SymmetricCodec, &SparseCodec];

/// Codec handling `kind`
pub fn codec_for(kind: OperatorKind) -> &'static dyn KindCodec {
    match kind {
        OperatorKind::Vector => &VectorCodec,
        OperatorKind::Matrix => &MatrixCodec,
        OperatorKind::Symmetric => &SymmetricCodec,
        OperatorKind::Sparse => &SparseCodec,
    }
}

fn wrong_kind(expected: OperatorKind, operator: &LinearOperator) -> CodecError {
    CodecError::WrongKind {
        expected,
        found: operator.kind(),
    }
}
