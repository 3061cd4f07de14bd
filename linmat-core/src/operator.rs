//! Linear operator data model
//!
//! A closed set of four operator kinds, each owning its payload once
//! decoded. Metadata lives in [`LinearOperatorInfo`], which can be produced
//! without materializing any payload.

use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::csc::CscArrays;
use crate::error::{FormatError, Result};
use crate::packed::{packed_index, packed_len, validate_packed_len};
use crate::traits::LinearOperatorData;
use crate::validation::validate_index;

/// How a matrix's entries are laid out, independent of its logical shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StorageKind {
    Full,
    Symmetric,
    Sparse,
}

impl core::fmt::Display for StorageKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StorageKind::Full => write!(f, "full"),
            StorageKind::Symmetric => write!(f, "symmetric"),
            StorageKind::Sparse => write!(f, "sparse"),
        }
    }
}

/// The four operator kinds this codec knows how to store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperatorKind {
    Vector,
    Matrix,
    Symmetric,
    Sparse,
}

impl OperatorKind {
    /// Priority order used when identifying a stored object
    pub const PROBE_ORDER: [OperatorKind; 4] = [
        OperatorKind::Vector,
        OperatorKind::Matrix,
        OperatorKind::Symmetric,
        OperatorKind::Sparse,
    ];

    pub const fn dimension(self) -> u8 {
        match self {
            OperatorKind::Vector => 1,
            _ => 2,
        }
    }

    pub const fn storage_kind(self) -> StorageKind {
        match self {
            OperatorKind::Vector | OperatorKind::Matrix => StorageKind::Full,
            OperatorKind::Symmetric => StorageKind::Symmetric,
            OperatorKind::Sparse => StorageKind::Sparse,
        }
    }

    /// Kind for a `(dimension, storage kind)` pair, if one exists
    pub const fn from_parts(dimension: u8, storage_kind: StorageKind) -> Option<Self> {
        match (dimension, storage_kind) {
            (1, StorageKind::Full) => Some(OperatorKind::Vector),
            (2, StorageKind::Full) => Some(OperatorKind::Matrix),
            (2, StorageKind::Symmetric) => Some(OperatorKind::Symmetric),
            (2, StorageKind::Sparse) => Some(OperatorKind::Sparse),
            _ => None,
        }
    }
}

impl core::fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OperatorKind::Vector => write!(f, "vector"),
            OperatorKind::Matrix => write!(f, "matrix"),
            OperatorKind::Symmetric => write!(f, "symmetric matrix"),
            OperatorKind::Sparse => write!(f, "sparse matrix"),
        }
    }
}

/// Metadata describing a linear operator without its payload
///
/// Immutable once created. For vectors the column count is fixed at 1 and
/// carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearOperatorInfo {
    dimension: u8,
    storage_kind: StorageKind,
    nrows: usize,
    ncols: usize,
    element_count: usize,
}

impl LinearOperatorInfo {
    /// Describe an arbitrary `(dimension, storage kind)` pair
    ///
    /// The pair is not checked here; [`LinearOperatorInfo::kind`] reports
    /// whether a codec exists for it.
    pub fn new(dimension: u8, storage_kind: StorageKind, nrows: usize, ncols: usize) -> Self {
        let ncols = if dimension == 1 { 1 } else { ncols };
        let element_count = match storage_kind {
            StorageKind::Full => nrows.saturating_mul(ncols),
            StorageKind::Symmetric => packed_len(nrows).unwrap_or(usize::MAX),
            StorageKind::Sparse => 0,
        };
        Self {
            dimension,
            storage_kind,
            nrows,
            ncols,
            element_count,
        }
    }

    pub fn vector(len: usize) -> Self {
        Self::new(1, StorageKind::Full, len, 1)
    }

    pub fn matrix(nrows: usize, ncols: usize) -> Self {
        Self::new(2, StorageKind::Full, nrows, ncols)
    }

    pub fn symmetric(order: usize) -> Self {
        Self::new(2, StorageKind::Symmetric, order, order)
    }

    pub fn sparse(nrows: usize, ncols: usize, nnz: usize) -> Self {
        Self {
            element_count: nnz,
            ..Self::new(2, StorageKind::Sparse, nrows, ncols)
        }
    }

    pub fn dimension(&self) -> u8 {
        self.dimension
    }

    pub fn storage_kind(&self) -> StorageKind {
        self.storage_kind
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Stored element count: `rows*cols` for full storage, the packed
    /// length for symmetric storage, the non-zero count for sparse storage
    pub fn element_count(&self) -> usize {
        self.element_count
    }

    /// Operator kind, `None` when no codec handles this combination
    pub fn kind(&self) -> Option<OperatorKind> {
        OperatorKind::from_parts(self.dimension, self.storage_kind)
    }
}

/// One stored entry of a sparse matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparseEntry {
    pub row: usize,
    pub col: usize,
    pub value: f64,
}

impl SparseEntry {
    pub const fn new(row: usize, col: usize, value: f64) -> Self {
        Self { row, col, value }
    }
}

/// Dense vector
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }
}

impl From<Vec<f64>> for Vector {
    fn from(data: Vec<f64>) -> Self {
        Self::new(data)
    }
}

/// Dense matrix in column-major order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Matrix {
    nrows: usize,
    ncols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Wrap a column-major buffer of `nrows * ncols` values
    pub fn new(nrows: usize, ncols: usize, data: Vec<f64>) -> Result<Self> {
        let expected = nrows
            .checked_mul(ncols)
            .ok_or(FormatError::ArraySizeOverflow)?;
        if data.len() != expected {
            return Err(FormatError::ShapeMismatch);
        }
        Ok(Self { nrows, ncols, data })
    }

    pub fn zeros(nrows: usize, ncols: usize) -> Result<Self> {
        let len = nrows
            .checked_mul(ncols)
            .ok_or(FormatError::ArraySizeOverflow)?;
        Ok(Self {
            nrows,
            ncols,
            data: alloc::vec![0.0; len],
        })
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.nrows || col >= self.ncols {
            return None;
        }
        self.data.get(row + col * self.nrows).copied()
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        validate_index(row, self.nrows)?;
        validate_index(col, self.ncols)?;
        self.data[row + col * self.nrows] = value;
        Ok(())
    }
}

/// Symmetric matrix stored as its packed upper triangle
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SymmetricMatrix {
    order: usize,
    packed: Vec<f64>,
}

impl SymmetricMatrix {
    /// Wrap a packed triangle of `order*(order+1)/2` values
    pub fn new(order: usize, packed: Vec<f64>) -> Result<Self> {
        validate_packed_len(order, packed.len())?;
        Ok(Self { order, packed })
    }

    pub fn zeros(order: usize) -> Result<Self> {
        let len = packed_len(order).ok_or(FormatError::ArraySizeOverflow)?;
        Ok(Self {
            order,
            packed: alloc::vec![0.0; len],
        })
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn packed(&self) -> &[f64] {
        &self.packed
    }

    pub fn into_packed(self) -> Vec<f64> {
        self.packed
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.order || col >= self.order {
            return None;
        }
        self.packed.get(packed_index(row, col)).copied()
    }

    /// Set `(row, col)` and its mirror `(col, row)`
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        validate_index(row, self.order)?;
        validate_index(col, self.order)?;
        self.packed[packed_index(row, col)] = value;
        Ok(())
    }
}

/// Sparse matrix as an unordered map of `(row, col)` entries
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseMatrix {
    nrows: usize,
    ncols: usize,
    entries: HashMap<(usize, usize), f64>,
}

impl SparseMatrix {
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self {
            nrows,
            ncols,
            entries: HashMap::new(),
        }
    }

    /// Build from entries; a repeated `(row, col)` keeps the last value
    pub fn from_entries<I>(nrows: usize, ncols: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = SparseEntry>,
    {
        let mut matrix = Self::new(nrows, ncols);
        for entry in entries {
            matrix.insert(entry.row, entry.col, entry.value)?;
        }
        Ok(matrix)
    }

    /// Expand compressed-column arrays into a sparse matrix
    ///
    /// A row stored twice in one column is a [`FormatError::SparseLayout`].
    pub fn from_csc(csc: &CscArrays) -> Result<Self> {
        Self::from_entries(csc.nrows(), csc.ncols(), csc.entries()?)
    }

    /// Compressed-column arrays for this matrix
    pub fn to_csc(&self) -> Result<CscArrays> {
        CscArrays::from_entries(self.nrows, self.ncols, self.entries())
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn insert(&mut self, row: usize, col: usize, value: f64) -> Result<Option<f64>> {
        validate_index(row, self.nrows)?;
        validate_index(col, self.ncols)?;
        Ok(self.entries.insert((row, col), value))
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.entries.get(&(row, col)).copied()
    }

    /// Entries in no particular order
    pub fn entries(&self) -> impl Iterator<Item = SparseEntry> + '_ {
        self.entries
            .iter()
            .map(|(&(row, col), &value)| SparseEntry::new(row, col, value))
    }
}

/// Any of the four operator kinds with its payload
#[derive(Debug, Clone, PartialEq)]
pub enum LinearOperator {
    Vector(Vector),
    Matrix(Matrix),
    Symmetric(SymmetricMatrix),
    Sparse(SparseMatrix),
}

impl LinearOperator {
    pub fn kind(&self) -> OperatorKind {
        match self {
            LinearOperator::Vector(_) => OperatorKind::Vector,
            LinearOperator::Matrix(_) => OperatorKind::Matrix,
            LinearOperator::Symmetric(_) => OperatorKind::Symmetric,
            LinearOperator::Sparse(_) => OperatorKind::Sparse,
        }
    }
}

impl LinearOperatorData for Vector {
    fn info(&self) -> LinearOperatorInfo {
        LinearOperatorInfo::vector(self.len())
    }

    fn get_element(&self, row: usize, col: usize) -> Option<f64> {
        if col != 0 {
            return None;
        }
        self.data.get(row).copied()
    }
}

impl LinearOperatorData for Matrix {
    fn info(&self) -> LinearOperatorInfo {
        LinearOperatorInfo::matrix(self.nrows, self.ncols)
    }

    fn get_element(&self, row: usize, col: usize) -> Option<f64> {
        self.get(row, col)
    }
}

impl LinearOperatorData for SymmetricMatrix {
    fn info(&self) -> LinearOperatorInfo {
        LinearOperatorInfo::symmetric(self.order)
    }

    fn get_element(&self, row: usize, col: usize) -> Option<f64> {
        self.get(row, col)
    }
}

impl LinearOperatorData for SparseMatrix {
    fn info(&self) -> LinearOperatorInfo {
        LinearOperatorInfo::sparse(self.nrows, self.ncols, self.nnz())
    }

    fn get_element(&self, row: usize, col: usize) -> Option<f64> {
        self.get(row, col)
    }
}

impl LinearOperatorData for LinearOperator {
    fn info(&self) -> LinearOperatorInfo {
        match self {
            LinearOperator::Vector(v) => v.info(),
            LinearOperator::Matrix(m) => m.info(),
            LinearOperator::Symmetric(s) => s.info(),
            LinearOperator::Sparse(s) => s.info(),
        }
    }

    fn get_element(&self, row: usize, col: usize) -> Option<f64> {
        match self {
            LinearOperator::Vector(v) => v.get_element(row, col),
            LinearOperator::Matrix(m) => m.get_element(row, col),
            LinearOperator::Symmetric(s) => s.get_element(row, col),
            LinearOperator::Sparse(s) => s.get_element(row, col),
        }
    }
}

impl From<Vector> for LinearOperator {
    fn from(v: Vector) -> Self {
        LinearOperator::Vector(v)
    }
}

impl From<Matrix> for LinearOperator {
    fn from(m: Matrix) -> Self {
        LinearOperator::Matrix(m)
    }
}

impl From<SymmetricMatrix> for LinearOperator {
    fn from(s: SymmetricMatrix) -> Self {
        LinearOperator::Symmetric(s)
    }
}

impl From<SparseMatrix> for LinearOperator {
    fn from(s: SparseMatrix) -> Self {
        LinearOperator::Sparse(s)
    }
}
