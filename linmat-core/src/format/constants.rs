//! Data type and array class tags of the level-5 MAT-file format

use crate::error::{FormatError, Result};

/// Alignment boundary of every non-compressed data element
pub const ALIGNMENT_BOUNDARY: usize = 8;

/// Size of a normal data element tag
pub const TAG_SIZE: usize = 8;

/// Largest payload that fits a small data element
pub const SMALL_ELEMENT_MAX: usize = 4;

/// Field name length written for struct records (including the NUL)
pub const FIELD_NAME_LENGTH: usize = 32;

/// Stored variable names
pub mod names {
    /// Dense vectors and matrices
    pub const DENSE: &str = "linop";
    /// Sparse matrices
    pub const SPARSE: &str = "matrix";
    /// Symmetric matrix records
    pub const SYMMETRIC: &str = "symmatrix";
    /// Symmetric record field holding the order
    pub const SIZE_FIELD: &str = "size";
    /// Symmetric record field holding the packed triangle
    pub const DATA_FIELD: &str = "data";
}

/// Data element types (`mi*` codes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum DataType {
    Int8 = 1,
    UInt8 = 2,
    Int16 = 3,
    UInt16 = 4,
    Int32 = 5,
    UInt32 = 6,
    Single = 7,
    Double = 9,
    Int64 = 12,
    UInt64 = 13,
    Matrix = 14,
    Compressed = 15,
    Utf8 = 16,
    Utf16 = 17,
    Utf32 = 18,
}

impl DataType {
    /// Convert from the on-disk code
    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            1 => Some(DataType::Int8),
            2 => Some(DataType::UInt8),
            3 => Some(DataType::Int16),
            4 => Some(DataType::UInt16),
            5 => Some(DataType::Int32),
            6 => Some(DataType::UInt32),
            7 => Some(DataType::Single),
            9 => Some(DataType::Double),
            12 => Some(DataType::Int64),
            13 => Some(DataType::UInt64),
            14 => Some(DataType::Matrix),
            15 => Some(DataType::Compressed),
            16 => Some(DataType::Utf8),
            17 => Some(DataType::Utf16),
            18 => Some(DataType::Utf32),
            _ => None,
        }
    }

    /// Convert to the on-disk code
    pub const fn to_u32(self) -> u32 {
        self as u32
    }

    /// Size in bytes of one element, `None` for non-numeric types
    pub const fn size_bytes(self) -> Option<usize> {
        match self {
            DataType::Int8 | DataType::UInt8 | DataType::Utf8 => Some(1),
            DataType::Int16 | DataType::UInt16 | DataType::Utf16 => Some(2),
            DataType::Int32 | DataType::UInt32 | DataType::Single | DataType::Utf32 => Some(4),
            DataType::Double | DataType::Int64 | DataType::UInt64 => Some(8),
            DataType::Matrix | DataType::Compressed => None,
        }
    }

    /// Whether the type holds numbers that widen to `f64`
    pub const fn is_numeric(self) -> bool {
        !matches!(
            self,
            DataType::Matrix
                | DataType::Compressed
                | DataType::Utf8
                | DataType::Utf16
                | DataType::Utf32
        )
    }

    /// Whether the type holds integers usable as indices
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            DataType::Int8
                | DataType::UInt8
                | DataType::Int16
                | DataType::UInt16
                | DataType::Int32
                | DataType::UInt32
                | DataType::Int64
                | DataType::UInt64
        )
    }
}

impl core::fmt::Display for DataType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            DataType::Int8 => "miINT8",
            DataType::UInt8 => "miUINT8",
            DataType::Int16 => "miINT16",
            DataType::UInt16 => "miUINT16",
            DataType::Int32 => "miINT32",
            DataType::UInt32 => "miUINT32",
            DataType::Single => "miSINGLE",
            DataType::Double => "miDOUBLE",
            DataType::Int64 => "miINT64",
            DataType::UInt64 => "miUINT64",
            DataType::Matrix => "miMATRIX",
            DataType::Compressed => "miCOMPRESSED",
            DataType::Utf8 => "miUTF8",
            DataType::Utf16 => "miUTF16",
            DataType::Utf32 => "miUTF32",
        };
        write!(f, "{name}")
    }
}

/// Array classes (`mx*` codes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ArrayClass {
    /// Zero-byte matrix element (empty placeholder)
    Empty = 0,
    Cell = 1,
    Struct = 2,
    Object = 3,
    Char = 4,
    Sparse = 5,
    Double = 6,
    Single = 7,
    Int8 = 8,
    UInt8 = 9,
    Int16 = 10,
    UInt16 = 11,
    Int32 = 12,
    UInt32 = 13,
    Int64 = 14,
    UInt64 = 15,
    Function = 16,
    Opaque = 17,
}

impl ArrayClass {
    /// Convert from the on-disk code
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ArrayClass::Empty),
            1 => Some(ArrayClass::Cell),
            2 => Some(ArrayClass::Struct),
            3 => Some(ArrayClass::Object),
            4 => Some(ArrayClass::Char),
            5 => Some(ArrayClass::Sparse),
            6 => Some(ArrayClass::Double),
            7 => Some(ArrayClass::Single),
            8 => Some(ArrayClass::Int8),
            9 => Some(ArrayClass::UInt8),
            10 => Some(ArrayClass::Int16),
            11 => Some(ArrayClass::UInt16),
            12 => Some(ArrayClass::Int32),
            13 => Some(ArrayClass::UInt32),
            14 => Some(ArrayClass::Int64),
            15 => Some(ArrayClass::UInt64),
            16 => Some(ArrayClass::Function),
            17 => Some(ArrayClass::Opaque),
            _ => None,
        }
    }

    /// Convert to the on-disk code
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Whether the class stores a plain dense numeric array
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            ArrayClass::Double
                | ArrayClass::Single
                | ArrayClass::Int8
                | ArrayClass::UInt8
                | ArrayClass::Int16
                | ArrayClass::UInt16
                | ArrayClass::Int32
                | ArrayClass::UInt32
                | ArrayClass::Int64
                | ArrayClass::UInt64
        )
    }
}

/// Array flag bits stored in the second byte of the first flags word
pub mod array_flags {
    /// Array has an imaginary part
    pub const COMPLEX: u8 = 1 << 3;
    /// Array is logical
    pub const LOGICAL: u8 = 1 << 1;
}

/// Decoded array flags sub-element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayFlags {
    pub class: ArrayClass,
    pub flags: u8,
    /// Allocated non-zero count (sparse only)
    pub nzmax: u32,
}

impl ArrayFlags {
    /// Size of the flags payload in bytes
    pub const SIZE: usize = 8;

    pub const fn new(class: ArrayClass) -> Self {
        Self {
            class,
            flags: 0,
            nzmax: 0,
        }
    }

    pub const fn with_nzmax(mut self, nzmax: u32) -> Self {
        self.nzmax = nzmax;
        self
    }

    /// Decode from the two flag words
    pub const fn from_words(word0: u32, word1: u32) -> Result<Self> {
        let class = match ArrayClass::from_u8((word0 & 0xff) as u8) {
            Some(class) => class,
            None => return Err(FormatError::UnknownClass),
        };
        Ok(Self {
            class,
            flags: ((word0 >> 8) & 0xff) as u8,
            nzmax: word1,
        })
    }

    /// Encode into the two flag words
    pub const fn to_words(self) -> [u32; 2] {
        [((self.flags as u32) << 8) | self.class as u32, self.nzmax]
    }

    pub const fn is_complex(self) -> bool {
        self.flags & array_flags::COMPLEX != 0
    }

    pub const fn is_logical(self) -> bool {
        self.flags & array_flags::LOGICAL != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_codes() {
        for code in 0..32u32 {
            if let Some(dt) = DataType::from_u32(code) {
                assert_eq!(dt.to_u32(), code);
            }
        }
        assert_eq!(DataType::from_u32(8), None);
        assert_eq!(DataType::from_u32(10), None);
        assert_eq!(DataType::Double.size_bytes(), Some(8));
        assert_eq!(DataType::Matrix.size_bytes(), None);
        assert!(DataType::UInt16.is_integer());
        assert!(!DataType::Double.is_integer());
        assert!(DataType::Single.is_numeric());
        assert!(!DataType::Utf8.is_numeric());
    }

    #[test]
    fn test_array_flags_words() {
        let flags = ArrayFlags::new(ArrayClass::Sparse).with_nzmax(17);
        let [w0, w1] = flags.to_words();
        assert_eq!(w0, 5);
        assert_eq!(w1, 17);
        assert_eq!(ArrayFlags::from_words(w0, w1), Ok(flags));

        let complex = ArrayFlags::from_words(0x0806, 0).unwrap();
        assert_eq!(complex.class, ArrayClass::Double);
        assert!(complex.is_complex());
        assert!(!complex.is_logical());

        assert_eq!(
            ArrayFlags::from_words(0x63, 0),
            Err(FormatError::UnknownClass)
        );
    }
}
