//! Compressed-column sparse matrix codec

use linmat_core::csc::validate_col_ptrs;
use linmat_core::format::numeric::{encode_f64s, encode_i32s};
use linmat_core::{
    names, ArrayClass, CscArrays, DataType, FormatError, LinearOperator, LinearOperatorInfo,
    OperatorKind, SparseMatrix,
};
use tracing::warn;

use super::{wrong_kind, KindCodec};
use crate::container::{MatrixBuilder, Variable};
use crate::error::CodecError;

/// Real double sparse arrays
#[derive(Debug, Clone, Copy, Default)]
pub struct SparseCodec;

impl SparseCodec {
    /// Stored arrays, with the compressed-column invariants checked
    fn arrays(&self, variable: &Variable<'_>) -> Result<CscArrays, CodecError> {
        let arrays = variable.sparse_arrays()?;
        arrays.validate().map_err(layout_error)?;
        Ok(arrays)
    }
}

fn layout_error(error: FormatError) -> CodecError {
    match error {
        FormatError::SparseLayout => CodecError::SparseLayout,
        other => CodecError::Format(other),
    }
}

impl KindCodec for SparseCodec {
    fn kind(&self) -> OperatorKind {
        OperatorKind::Sparse
    }

    fn description(&self) -> &'static str {
        "rank-2 real double sparse array"
    }

    fn accepts(&self, variable: &Variable<'_>) -> bool {
        let flags = variable.flags();
        flags.class == ArrayClass::Sparse
            && variable.rank() == 2
            && !flags.is_complex()
            && !flags.is_logical()
            && variable.element_type().is_some_and(DataType::is_numeric)
    }

    /// Shape and `nnz` from the column pointers alone
    ///
    /// Row indices and values stay undecoded; their element counts come
    /// from the stored byte lengths.
    fn describe(&self, variable: &Variable<'_>) -> Result<LinearOperatorInfo, CodecError> {
        let parts = variable.sparse_parts()?;
        let col_ptrs = parts.col_ptrs()?;
        let nnz = validate_col_ptrs(&col_ptrs, parts.ncols, parts.stored_slots()?)
            .map_err(layout_error)?;
        Ok(LinearOperatorInfo::sparse(parts.nrows, parts.ncols, nnz))
    }

    fn decode(&self, variable: &Variable<'_>) -> Result<LinearOperator, CodecError> {
        if !self.accepts(variable) {
            return Err(CodecError::Malformed {
                expected: self.description(),
            });
        }
        let arrays = self.arrays(variable)?;
        let trailing = arrays.trailing_slots();
        if trailing > 0 {
            warn!(
                name = variable.name(),
                nnz = arrays.nnz(),
                trailing,
                "ignoring sparse slots past the last column pointer"
            );
        }
        Ok(SparseMatrix::from_csc(&arrays)?.into())
    }

    fn encode(&self, operator: &LinearOperator) -> Result<MatrixBuilder, CodecError> {
        let LinearOperator::Sparse(matrix) = operator else {
            return Err(wrong_kind(self.kind(), operator));
        };
        let csc = matrix.to_csc()?;

        let dims = vec![csc.nrows(), csc.ncols()];
        let mut builder =
            MatrixBuilder::new(ArrayClass::Sparse, names::SPARSE, dims).with_nzmax(csc.nnz())?;
        builder.push(DataType::Int32, &encode_i32s(csc.row_indices())?)?;
        builder.push(DataType::Int32, &encode_i32s(csc.col_ptrs())?)?;
        builder.push(DataType::Double, &encode_f64s(csc.values()))?;
        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linmat_core::{ByteOrder, ElementReader, SparseEntry};
    use std::borrow::Cow;

    fn parse(bytes: &[u8]) -> Variable<'_> {
        let element = ElementReader::new(bytes, ByteOrder::Little)
            .expect_element()
            .unwrap();
        Variable::parse(Cow::Borrowed(element.data), ByteOrder::Little).unwrap()
    }

    fn raw_sparse(nrows: usize, ncols: usize, ir: &[usize], jc: &[usize], pr: &[f64]) -> Vec<u8> {
        let mut builder = MatrixBuilder::new(ArrayClass::Sparse, "matrix", vec![nrows, ncols])
            .with_nzmax(pr.len())
            .unwrap();
        builder.push(DataType::Int32, &encode_i32s(ir).unwrap()).unwrap();
        builder.push(DataType::Int32, &encode_i32s(jc).unwrap()).unwrap();
        builder.push(DataType::Double, &encode_f64s(pr)).unwrap();
        builder.finish().unwrap()
    }

    #[test]
    fn test_encoded_layout() {
        let matrix = SparseMatrix::from_entries(
            3,
            2,
            [
                SparseEntry::new(0, 0, 1.0),
                SparseEntry::new(2, 1, 5.0),
                SparseEntry::new(1, 1, 3.0),
            ],
        )
        .unwrap();
        let operator = LinearOperator::from(matrix);
        let bytes = SparseCodec.encode(&operator).unwrap().finish().unwrap();
        let var = parse(&bytes);

        assert_eq!(var.name(), names::SPARSE);
        assert!(SparseCodec.accepts(&var));
        let csc = var.sparse_arrays().unwrap();
        assert_eq!(csc.col_ptrs(), &[0, 1, 3]);
        assert_eq!(csc.column(0).unwrap(), (&[0usize][..], &[1.0][..]));

        let info = SparseCodec.describe(&var).unwrap();
        assert_eq!(info, LinearOperatorInfo::sparse(3, 2, 3));
        assert_eq!(SparseCodec.decode(&var).unwrap(), operator);
    }

    #[test]
    fn test_trailing_slots_are_ignored() {
        let bytes = raw_sparse(2, 2, &[0, 1, 1], &[0, 1, 2], &[1.0, 2.0, 99.0]);
        let var = parse(&bytes);

        let LinearOperator::Sparse(matrix) = SparseCodec.decode(&var).unwrap() else {
            panic!("expected a sparse matrix");
        };
        assert_eq!(matrix.nnz(), 2);
        assert_eq!(matrix.get(0, 0), Some(1.0));
        assert_eq!(matrix.get(1, 1), Some(2.0));
    }

    #[test]
    fn test_decreasing_col_ptrs() {
        let bytes = raw_sparse(2, 2, &[0, 1], &[0, 2, 1], &[1.0, 2.0]);
        let var = parse(&bytes);
        assert!(SparseCodec.accepts(&var));
        assert!(matches!(
            SparseCodec.describe(&var),
            Err(CodecError::SparseLayout)
        ));
        assert!(matches!(
            SparseCodec.decode(&var),
            Err(CodecError::SparseLayout)
        ));
    }

    #[test]
    fn test_col_ptr_length_mismatch() {
        let bytes = raw_sparse(2, 3, &[0], &[0, 1], &[1.0]);
        assert!(matches!(
            SparseCodec.describe(&parse(&bytes)),
            Err(CodecError::SparseLayout)
        ));
    }

    #[test]
    fn test_integer_values_are_widened() {
        let mut builder = MatrixBuilder::new(ArrayClass::Sparse, "m", vec![2, 1]);
        builder.push(DataType::Int32, &encode_i32s(&[1]).unwrap()).unwrap();
        builder.push(DataType::Int32, &encode_i32s(&[0, 1]).unwrap()).unwrap();
        builder.push(DataType::UInt8, &[7]).unwrap();
        let bytes = builder.finish().unwrap();
        let var = parse(&bytes);

        assert!(SparseCodec.accepts(&var));
        assert_eq!(
            SparseCodec.describe(&var).unwrap(),
            LinearOperatorInfo::sparse(2, 1, 1)
        );
        let LinearOperator::Sparse(matrix) = SparseCodec.decode(&var).unwrap() else {
            panic!("expected a sparse matrix");
        };
        assert_eq!(matrix.get(1, 0), Some(7.0));
    }

    #[test]
    fn test_text_values_not_accepted() {
        let mut builder = MatrixBuilder::new(ArrayClass::Sparse, "m", vec![1, 1]);
        builder.push(DataType::Int32, &encode_i32s(&[0]).unwrap()).unwrap();
        builder.push(DataType::Int32, &encode_i32s(&[0, 1]).unwrap()).unwrap();
        builder.push(DataType::Utf8, b"a").unwrap();
        let bytes = builder.finish().unwrap();
        assert!(!SparseCodec.accepts(&parse(&bytes)));
    }

    #[test]
    fn test_describe_leaves_values_undecoded() {
        let mut builder = MatrixBuilder::new(ArrayClass::Sparse, "m", vec![2, 2]);
        builder.push(DataType::Int32, &encode_i32s(&[0]).unwrap()).unwrap();
        builder.push(DataType::Int32, &encode_i32s(&[0, 1, 1]).unwrap()).unwrap();
        builder.push(DataType::Double, &[0; 12]).unwrap();
        let bytes = builder.finish().unwrap();
        let var = parse(&bytes);

        assert_eq!(
            SparseCodec.describe(&var).unwrap(),
            LinearOperatorInfo::sparse(2, 2, 1)
        );
        assert!(matches!(
            SparseCodec.decode(&var),
            Err(CodecError::Format(FormatError::ArrayAlignment))
        ));
    }

    #[test]
    fn test_nnz_beyond_stored_slots() {
        let bytes = raw_sparse(2, 2, &[0], &[0, 1, 2], &[1.0]);
        assert!(matches!(
            SparseCodec.describe(&parse(&bytes)),
            Err(CodecError::SparseLayout)
        ));
    }

    #[test]
    fn test_repeated_row_in_column() {
        let bytes = raw_sparse(2, 1, &[0, 0], &[0, 2], &[1.0, 2.0]);
        let var = parse(&bytes);
        assert_eq!(
            SparseCodec.describe(&var).unwrap(),
            LinearOperatorInfo::sparse(2, 1, 2)
        );
        assert!(matches!(
            SparseCodec.decode(&var),
            Err(CodecError::SparseLayout)
        ));
    }
}
