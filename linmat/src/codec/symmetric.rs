//! Packed symmetric matrix codec
//!
//! A symmetric matrix is stored as a 1x1 struct with two fields: `size`, a
//! single `uint32` holding the order `n`, and `data`, the packed upper
//! triangle as an `n(n+1)/2 x 1` double array. The order is never inferred
//! from the packed length.

use linmat_core::format::numeric::{encode_f64s, encode_u32};
use linmat_core::packed::packed_len;
use linmat_core::{
    names, ArrayClass, DataType, LinearOperator, LinearOperatorInfo, OperatorKind, SymmetricMatrix,
};

use super::{wrong_kind, KindCodec};
use crate::container::{MatrixBuilder, Variable};
use crate::error::CodecError;

const EXPECTED: &str = "struct with a scalar `size` field and a packed `data` field";

/// Struct records holding a packed symmetric matrix
#[derive(Debug, Clone, Copy, Default)]
pub struct SymmetricCodec;

/// A symmetric record opened for reading
///
/// Borrows the enclosing struct variable; the `data` field cannot outlive
/// it, and both are released together when the record is dropped or
/// consumed by [`SymmetricRecord::into_matrix`].
#[derive(Debug)]
pub struct SymmetricRecord<'v> {
    order: usize,
    data: Variable<'v>,
}

impl<'v> SymmetricRecord<'v> {
    /// Locate and check the `size` and `data` fields of `record`
    pub fn open(record: &'v Variable<'_>) -> Result<Self, CodecError> {
        let fields = record.fields().map_err(|_| malformed())?;

        let mut size = None;
        let mut data = None;
        for (name, field) in fields {
            match name.as_str() {
                names::SIZE_FIELD => size = Some(field),
                names::DATA_FIELD => data = Some(field),
                _ => {}
            }
        }
        let (Some(size), Some(data)) = (size, data) else {
            return Err(malformed());
        };

        let order = read_order(&size).ok_or_else(malformed)?;
        let expected_len = packed_len(order).ok_or_else(malformed)?;
        if !holds_packed(&data, expected_len) {
            return Err(malformed());
        }

        Ok(Self { order, data })
    }

    /// Matrix order `n`
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn info(&self) -> LinearOperatorInfo {
        LinearOperatorInfo::symmetric(self.order)
    }

    /// Copy the packed triangle out and release the record
    pub fn into_matrix(self) -> Result<SymmetricMatrix, CodecError> {
        let packed = self.data.real_values()?;
        Ok(SymmetricMatrix::new(self.order, packed)?)
    }
}

fn malformed() -> CodecError {
    CodecError::Malformed { expected: EXPECTED }
}

/// Whether `data` is a real double array of exactly `expected_len` values
fn holds_packed(data: &Variable<'_>, expected_len: usize) -> bool {
    let flags = data.flags();
    if flags.class != ArrayClass::Double || flags.is_complex() || flags.is_logical() {
        return false;
    }
    let Ok(part) = data.real_part() else {
        return false;
    };
    let width = match part.data_type() {
        Some(data_type) if data_type.is_numeric() => data_type.size_bytes(),
        _ => None,
    };
    data.declared_len().ok() == Some(expected_len)
        && width.and_then(|w| expected_len.checked_mul(w)) == Some(part.data.len())
}

/// Order stored in the `size` field: one non-negative integral value
fn read_order(size: &Variable<'_>) -> Option<usize> {
    if !size.class().is_numeric() || size.flags().is_complex() {
        return None;
    }
    let values = size.real_values().ok()?;
    match values[..] {
        [value] if value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 => {
            Some(value as usize)
        }
        _ => None,
    }
}

impl KindCodec for SymmetricCodec {
    fn kind(&self) -> OperatorKind {
        OperatorKind::Symmetric
    }

    fn description(&self) -> &'static str {
        EXPECTED
    }

    fn accepts(&self, variable: &Variable<'_>) -> bool {
        variable.class() == ArrayClass::Struct && variable.rank() == 2
    }

    fn describe(&self, variable: &Variable<'_>) -> Result<LinearOperatorInfo, CodecError> {
        Ok(SymmetricRecord::open(variable)?.info())
    }

    fn decode(&self, variable: &Variable<'_>) -> Result<LinearOperator, CodecError> {
        if !self.accepts(variable) {
            return Err(malformed());
        }
        Ok(SymmetricRecord::open(variable)?.into_matrix()?.into())
    }

    fn encode(&self, operator: &LinearOperator) -> Result<MatrixBuilder, CodecError> {
        let LinearOperator::Symmetric(matrix) = operator else {
            return Err(wrong_kind(self.kind(), operator));
        };

        let mut size = MatrixBuilder::new(ArrayClass::UInt32, "", vec![1, 1]);
        size.push(DataType::UInt32, &encode_u32(matrix.order())?)?;

        let packed = matrix.packed();
        let mut data = MatrixBuilder::new(ArrayClass::Double, "", vec![packed.len(), 1]);
        data.push(DataType::Double, &encode_f64s(packed))?;

        let mut record = MatrixBuilder::new(ArrayClass::Struct, names::SYMMETRIC, vec![1, 1]);
        record.push_field_names(&[names::SIZE_FIELD, names::DATA_FIELD])?;
        record.push_field(size)?;
        record.push_field(data)?;
        Ok(record)
    }
}
