//! Data element tags
//!
//! A data element is an 8-byte tag (type code, byte count) followed by the
//! payload and padding up to the next 8-byte boundary. Payloads of at most
//! four bytes may use the small element form, where the byte count lives in
//! the upper half of the first tag word and the payload in the second word.
//! Compressed elements are never padded.

use alloc::vec::Vec;

use super::byte_order::ByteOrder;
use super::constants::{DataType, SMALL_ELEMENT_MAX, TAG_SIZE};
use crate::error::{FormatError, Result};
use crate::validation::align_to_8;

/// A data element borrowed from an enclosing buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element<'a> {
    /// Raw type code, kept raw so unknown top-level elements can be skipped
    pub code: u32,
    /// Payload without tag or padding
    pub data: &'a [u8],
}

impl<'a> Element<'a> {
    pub fn data_type(&self) -> Option<DataType> {
        DataType::from_u32(self.code)
    }

    /// Data type, failing on codes the format does not define
    pub fn require_data_type(&self) -> Result<DataType> {
        self.data_type().ok_or(FormatError::UnknownDataType)
    }
}

/// Sequential reader over the data elements of a buffer
#[derive(Debug, Clone)]
pub struct ElementReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    order: ByteOrder,
}

impl<'a> ElementReader<'a> {
    pub fn new(bytes: &'a [u8], order: ByteOrder) -> Self {
        Self {
            bytes,
            pos: 0,
            order,
        }
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Offset of the next element
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos.min(self.bytes.len())..]
    }

    /// Return to the first element
    pub fn rewind(&mut self) {
        self.pos = 0;
    }

    /// Read the next element, `None` once the buffer is exhausted
    pub fn next_element(&mut self) -> Result<Option<Element<'a>>> {
        let rest = self.remaining();
        if rest.is_empty() {
            return Ok(None);
        }

        let word0 = self.order.read_u32(rest)?;
        let small_len = (word0 >> 16) as usize;
        if small_len != 0 {
            if small_len > SMALL_ELEMENT_MAX {
                return Err(FormatError::InvalidTag);
            }
            if rest.len() < TAG_SIZE {
                return Err(FormatError::Truncated);
            }
            self.pos += TAG_SIZE;
            return Ok(Some(Element {
                code: word0 & 0xffff,
                data: &rest[4..4 + small_len],
            }));
        }

        let nbytes = self.order.read_u32(rest.get(4..).ok_or(FormatError::Truncated)?)? as usize;
        let end = TAG_SIZE
            .checked_add(nbytes)
            .ok_or(FormatError::ArraySizeOverflow)?;
        let data = rest.get(TAG_SIZE..end).ok_or(FormatError::Truncated)?;

        // Trailing padding may be missing on the final element
        let advance = if word0 == DataType::Compressed.to_u32() {
            end
        } else {
            align_to_8(end).min(rest.len())
        };
        self.pos += advance;

        Ok(Some(Element { code: word0, data }))
    }

    /// Read the next element and require it to exist
    pub fn expect_element(&mut self) -> Result<Element<'a>> {
        self.next_element()?.ok_or(FormatError::Truncated)
    }
}

/// Little-endian element encoder
#[derive(Debug, Default, Clone)]
pub struct ElementWriter {
    buf: Vec<u8>,
}

impl ElementWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Append one element, choosing the small form where allowed
    pub fn write_element(&mut self, data_type: DataType, payload: &[u8]) -> Result<()> {
        let small = !matches!(data_type, DataType::Matrix | DataType::Compressed)
            && (1..=SMALL_ELEMENT_MAX).contains(&payload.len());

        if small {
            let word0 = ((payload.len() as u32) << 16) | data_type.to_u32();
            self.buf.extend_from_slice(&word0.to_le_bytes());
            let mut word1 = [0u8; 4];
            word1[..payload.len()].copy_from_slice(payload);
            self.buf.extend_from_slice(&word1);
            return Ok(());
        }

        let nbytes = u32::try_from(payload.len()).map_err(|_| FormatError::ArraySizeOverflow)?;
        self.buf.extend_from_slice(&data_type.to_u32().to_le_bytes());
        self.buf.extend_from_slice(&nbytes.to_le_bytes());
        self.buf.extend_from_slice(payload);

        if data_type != DataType::Compressed {
            let padded = align_to_8(self.buf.len());
            self.buf.resize(padded, 0);
        }
        Ok(())
    }
}
