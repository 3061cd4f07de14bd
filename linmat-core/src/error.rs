//! Error types for MAT-file format operations

/// Errors raised while decoding or encoding the MAT-file container layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// Header too short or malformed
    InvalidHeader,
    /// Header version is not the level-5 version
    UnsupportedVersion,
    /// Endian indicator is neither `IM` nor `MI`
    InvalidByteOrder,
    /// Element extends past the end of its enclosing buffer
    Truncated,
    /// Element tag is inconsistent with its contents
    InvalidTag,
    /// Data type code not defined by the format
    UnknownDataType,
    /// Array class code not defined by the format
    UnknownClass,
    /// Byte length is not a multiple of the element size
    ArrayAlignment,
    /// Size calculation would overflow
    ArraySizeOverflow,
    /// Negative value where a size or index was expected
    NegativeValue,
    /// Packed triangle length does not match the matrix order
    PackedLength,
    /// Column pointers violate the compressed-column invariants
    SparseLayout,
    /// Index outside the declared shape
    IndexOutOfBounds,
    /// Payload length does not match the declared shape
    ShapeMismatch,
    /// Compressed element could not be inflated
    CorruptedData,
}

impl core::fmt::Display for FormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            FormatError::InvalidHeader => "Invalid MAT-file header",
            FormatError::UnsupportedVersion => "Unsupported MAT-file version",
            FormatError::InvalidByteOrder => "Invalid endian indicator",
            FormatError::Truncated => "Data element is truncated",
            FormatError::InvalidTag => "Invalid data element tag",
            FormatError::UnknownDataType => "Unknown data type",
            FormatError::UnknownClass => "Unknown array class",
            FormatError::ArrayAlignment => "Array size not aligned to element size",
            FormatError::ArraySizeOverflow => "Array size overflow",
            FormatError::NegativeValue => "Negative size or index",
            FormatError::PackedLength => "Packed triangle length does not match order",
            FormatError::SparseLayout => "Invalid compressed-column layout",
            FormatError::IndexOutOfBounds => "Index out of bounds",
            FormatError::ShapeMismatch => "Payload length does not match shape",
            FormatError::CorruptedData => "Data corruption detected",
        };
        write!(f, "{msg}")
    }
}

impl core::error::Error for FormatError {}

/// Result type for format operations
pub type Result<T> = core::result::Result<T, FormatError>;
