//! Byte order handling for MAT-file elements

use crate::error::{FormatError, Result};

/// Byte order declared by the header's endian indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    /// Byte order of the running host
    pub const fn native() -> Self {
        if cfg!(target_endian = "little") {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        }
    }

    /// Decode the two-byte endian indicator
    pub const fn from_indicator(bytes: [u8; 2]) -> Result<Self> {
        match bytes {
            [b'I', b'M'] => Ok(ByteOrder::Little),
            [b'M', b'I'] => Ok(ByteOrder::Big),
            _ => Err(FormatError::InvalidByteOrder),
        }
    }

    /// Encode the two-byte endian indicator
    pub const fn indicator(self) -> [u8; 2] {
        match self {
            ByteOrder::Little => *b"IM",
            ByteOrder::Big => *b"MI",
        }
    }

    pub const fn u16_bytes(self, value: u16) -> [u8; 2] {
        match self {
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        }
    }

    pub fn read_u16(self, bytes: &[u8]) -> Result<u16> {
        let raw: [u8; 2] = bytes
            .get(..2)
            .and_then(|b| b.try_into().ok())
            .ok_or(FormatError::Truncated)?;
        Ok(match self {
            ByteOrder::Little => u16::from_le_bytes(raw),
            ByteOrder::Big => u16::from_be_bytes(raw),
        })
    }

    pub fn read_u32(self, bytes: &[u8]) -> Result<u32> {
        let raw = Self::word::<4>(bytes)?;
        Ok(match self {
            ByteOrder::Little => u32::from_le_bytes(raw),
            ByteOrder::Big => u32::from_be_bytes(raw),
        })
    }

    pub fn read_i32(self, bytes: &[u8]) -> Result<i32> {
        self.read_u32(bytes).map(|v| v as i32)
    }

    pub fn read_u64(self, bytes: &[u8]) -> Result<u64> {
        let raw = Self::word::<8>(bytes)?;
        Ok(match self {
            ByteOrder::Little => u64::from_le_bytes(raw),
            ByteOrder::Big => u64::from_be_bytes(raw),
        })
    }

    pub fn read_f64(self, bytes: &[u8]) -> Result<f64> {
        self.read_u64(bytes).map(f64::from_bits)
    }

    pub fn read_f32(self, bytes: &[u8]) -> Result<f32> {
        self.read_u32(bytes).map(f32::from_bits)
    }

    fn word<const N: usize>(bytes: &[u8]) -> Result<[u8; N]> {
        bytes
            .get(..N)
            .and_then(|b| b.try_into().ok())
            .ok_or(FormatError::Truncated)
    }
}
