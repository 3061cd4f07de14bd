//! Dense vector and matrix codecs
//!
//! Payloads are stored column-major exactly as held in memory; nothing is
//! transposed in either direction.

use linmat_core::format::numeric::encode_f64s;
use linmat_core::{
    names, ArrayClass, DataType, LinearOperator, LinearOperatorInfo, Matrix, OperatorKind, Vector,
};

use super::{wrong_kind, KindCodec};
use crate::container::{MatrixBuilder, Variable};
use crate::error::CodecError;

/// Rank-1 double arrays
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorCodec;

/// Rank-2 double arrays
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixCodec;

impl KindCodec for VectorCodec {
    fn kind(&self) -> OperatorKind {
        OperatorKind::Vector
    }

    fn description(&self) -> &'static str {
        "rank-1 real double array"
    }

    fn accepts(&self, variable: &Variable<'_>) -> bool {
        variable.rank() == 1 && is_real_double(variable)
    }

    fn describe(&self, variable: &Variable<'_>) -> Result<LinearOperatorInfo, CodecError> {
        let len = checked_len(variable, self.description())?;
        Ok(LinearOperatorInfo::vector(len))
    }

    fn decode(&self, variable: &Variable<'_>) -> Result<LinearOperator, CodecError> {
        if !self.accepts(variable) {
            return Err(CodecError::Malformed {
                expected: self.description(),
            });
        }
        let values = checked_values(variable, self.description())?;
        Ok(Vector::new(values).into())
    }

    fn encode(&self, operator: &LinearOperator) -> Result<MatrixBuilder, CodecError> {
        let LinearOperator::Vector(vector) = operator else {
            return Err(wrong_kind(self.kind(), operator));
        };
        let mut builder = MatrixBuilder::new(ArrayClass::Double, names::DENSE, vec![vector.len()]);
        builder.push(DataType::Double, &encode_f64s(vector.as_slice()))?;
        Ok(builder)
    }
}

impl KindCodec for MatrixCodec {
    fn kind(&self) -> OperatorKind {
        OperatorKind::Matrix
    }

    fn description(&self) -> &'static str {
        "rank-2 real double array"
    }

    fn accepts(&self, variable: &Variable<'_>) -> bool {
        variable.rank() == 2 && is_real_double(variable)
    }

    fn describe(&self, variable: &Variable<'_>) -> Result<LinearOperatorInfo, CodecError> {
        checked_len(variable, self.description())?;
        let dims = variable.dims();
        Ok(LinearOperatorInfo::matrix(dims[0], dims[1]))
    }

    fn decode(&self, variable: &Variable<'_>) -> Result<LinearOperator, CodecError> {
        if !self.accepts(variable) {
            return Err(CodecError::Malformed {
                expected: self.description(),
            });
        }
        let values = checked_values(variable, self.description())?;
        let dims = variable.dims();
        Ok(Matrix::new(dims[0], dims[1], values)?.into())
    }

    fn encode(&self, operator: &LinearOperator) -> Result<MatrixBuilder, CodecError> {
        let LinearOperator::Matrix(matrix) = operator else {
            return Err(wrong_kind(self.kind(), operator));
        };
        let dims = vec![matrix.nrows(), matrix.ncols()];
        let mut builder = MatrixBuilder::new(ArrayClass::Double, names::DENSE, dims);
        builder.push(DataType::Double, &encode_f64s(matrix.as_slice()))?;
        Ok(builder)
    }
}

/// Real double class; the values may be stored in any numeric type
fn is_real_double(variable: &Variable<'_>) -> bool {
    let flags = variable.flags();
    flags.class == ArrayClass::Double
        && !flags.is_complex()
        && !flags.is_logical()
        && variable.element_type().is_some_and(DataType::is_numeric)
}

/// Declared element count, checked against the stored byte count
fn checked_len(variable: &Variable<'_>, expected: &'static str) -> Result<usize, CodecError> {
    let len = variable.declared_len()?;
    let part = variable.real_part()?;
    let width = part
        .data_type()
        .and_then(DataType::size_bytes)
        .ok_or(CodecError::Malformed { expected })?;
    if len.checked_mul(width) != Some(part.data.len()) {
        return Err(CodecError::Malformed { expected });
    }
    Ok(len)
}

fn checked_values(variable: &Variable<'_>, expected: &'static str) -> Result<Vec<f64>, CodecError> {
    let len = checked_len(variable, expected)?;
    let values = variable.real_values()?;
    debug_assert_eq!(values.len(), len);
    Ok(values)
}
