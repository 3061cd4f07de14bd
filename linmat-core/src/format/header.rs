//! Level-5 MAT-file header
//!
//! Every container starts with a fixed 128-byte header: descriptive text
//! that begins with the magic tag, an unused subsystem-data offset, the
//! format version and a two-byte endian indicator.

use super::byte_order::ByteOrder;
use crate::error::{FormatError, Result};

/// Fixed-size header for .mat files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatHeader {
    /// Descriptive text, space padded, starting with `MATLAB`
    pub text: [u8; MatHeader::TEXT_SIZE],
    /// Subsystem data offset (unused, zero)
    pub subsys_offset: [u8; 8],
    /// Format version
    pub version: u16,
    /// Byte order every later element is encoded in
    pub byte_order: ByteOrder,
}

impl MatHeader {
    /// Magic tag at offset 0
    pub const MAGIC: &'static [u8] = b"MATLAB";

    /// Level-5 format version
    pub const VERSION: u16 = 0x0100;

    /// Size of the header in bytes
    pub const SIZE: usize = 128;

    /// Size of the descriptive text field
    pub const TEXT_SIZE: usize = 116;

    const PREAMBLE: &'static [u8] = b"MATLAB 5.0 MAT-file, ";

    /// Create a little-endian header whose text carries `description`
    ///
    /// The description is truncated to fit the text field.
    pub fn new(description: &str) -> Self {
        let mut text = [b' '; Self::TEXT_SIZE];
        text[..Self::PREAMBLE.len()].copy_from_slice(Self::PREAMBLE);
        let room = Self::TEXT_SIZE - Self::PREAMBLE.len();
        let desc = description.as_bytes();
        let n = desc.len().min(room);
        text[Self::PREAMBLE.len()..Self::PREAMBLE.len() + n].copy_from_slice(&desc[..n]);

        Self {
            text,
            subsys_offset: [0; 8],
            version: Self::VERSION,
            byte_order: ByteOrder::Little,
        }
    }

    /// Header text with trailing padding removed
    pub fn description(&self) -> &[u8] {
        let end = self
            .text
            .iter()
            .rposition(|&b| b != b' ' && b != 0)
            .map_or(0, |i| i + 1);
        &self.text[..end]
    }

    /// Parse header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(FormatError::InvalidHeader);
        }

        // Level-4 files start with a zero byte; level-5 text never does
        if bytes[..4].contains(&0) {
            return Err(FormatError::InvalidHeader);
        }

        let byte_order = ByteOrder::from_indicator([bytes[126], bytes[127]])?;
        let version = byte_order.read_u16(&bytes[124..126])?;
        if version != Self::VERSION {
            return Err(FormatError::UnsupportedVersion);
        }

        let mut text = [0u8; Self::TEXT_SIZE];
        text.copy_from_slice(&bytes[..Self::TEXT_SIZE]);
        let mut subsys_offset = [0u8; 8];
        subsys_offset.copy_from_slice(&bytes[116..124]);

        Ok(Self {
            text,
            subsys_offset,
            version,
            byte_order,
        })
    }

    /// Convert header to bytes
    pub fn to_bytes_array(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[..Self::TEXT_SIZE].copy_from_slice(&self.text);
        bytes[116..124].copy_from_slice(&self.subsys_offset);
        bytes[124..126].copy_from_slice(&self.byte_order.u16_bytes(self.version));
        bytes[126..128].copy_from_slice(&self.byte_order.indicator());
        bytes
    }
}

impl Default for MatHeader {
    fn default() -> Self {
        Self::new("")
    }
}

/// Check whether `bytes` starts with the MAT-file magic tag
///
/// Inputs shorter than the tag are rejected, never an error.
pub fn identify(bytes: &[u8]) -> bool {
    bytes.len() >= MatHeader::MAGIC.len() && bytes[..MatHeader::MAGIC.len()] == *MatHeader::MAGIC
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_roundtrip() {
        let header = MatHeader::new("Created by: linmat");
        let bytes = header.to_bytes_array();
        assert_eq!(&bytes[..6], b"MATLAB");
        assert_eq!(&bytes[126..128], b"IM");

        let parsed = MatHeader::from_bytes(&bytes).unwrap();
        assert_eq!(parsed, header);
        assert_eq!(
            parsed.description(),
            b"MATLAB 5.0 MAT-file, Created by: linmat"
        );
    }

    #[test]
    fn test_description_truncated() {
        let long = "x".repeat(500);
        let header = MatHeader::new(&long);
        assert_eq!(header.description().len(), MatHeader::TEXT_SIZE);
    }

    #[test]
    fn test_big_endian_header() {
        let mut header = MatHeader::default();
        header.byte_order = ByteOrder::Big;
        let bytes = header.to_bytes_array();
        assert_eq!(&bytes[124..128], &[0x01, 0x00, b'M', b'I']);
        assert_eq!(MatHeader::from_bytes(&bytes).unwrap().byte_order, ByteOrder::Big);
    }

    #[test]
    fn test_rejects_bad_headers() {
        assert_eq!(
            MatHeader::from_bytes(&[b'M'; 64]),
            Err(FormatError::InvalidHeader)
        );

        let mut bytes = MatHeader::default().to_bytes_array();
        bytes[126] = b'X';
        assert_eq!(
            MatHeader::from_bytes(&bytes),
            Err(FormatError::InvalidByteOrder)
        );

        let mut bytes = MatHeader::default().to_bytes_array();
        bytes[124] = 0x00;
        bytes[125] = 0x02;
        assert_eq!(
            MatHeader::from_bytes(&bytes),
            Err(FormatError::UnsupportedVersion)
        );

        let mut bytes = MatHeader::default().to_bytes_array();
        bytes[0] = 0;
        assert_eq!(
            MatHeader::from_bytes(&bytes),
            Err(FormatError::InvalidHeader)
        );
    }

    #[test]
    fn test_identify() {
        assert!(identify(b"MATLAB 5.0 MAT-file"));
        assert!(identify(b"MATLAB"));
        assert!(!identify(b"MATLA"));
        assert!(!identify(b""));
        assert!(!identify(b"OMEEG\x01\x02\x03"));
    }
}
