//! Numeric payload conversion
//!
//! Stored arrays may use any numeric element type; readers widen them to
//! `f64` (values) or `usize` (indices). Writers always emit little-endian.

use alloc::borrow::Cow;
use alloc::vec::Vec;

use super::byte_order::ByteOrder;
use super::constants::DataType;
use crate::error::{FormatError, Result};
use crate::validation::validate_array_bounds;

/// Decode a numeric payload into `f64` values
pub fn decode_f64s(data_type: DataType, bytes: &[u8], order: ByteOrder) -> Result<Vec<f64>> {
    if !data_type.is_numeric() {
        return Err(FormatError::InvalidTag);
    }
    let size = data_type.size_bytes().ok_or(FormatError::InvalidTag)?;
    let count = validate_array_bounds(bytes.len(), size)?;

    if data_type == DataType::Double && order == ByteOrder::native() {
        return Ok(bytemuck::pod_collect_to_vec::<u8, f64>(bytes));
    }

    let mut values = Vec::with_capacity(count);
    for chunk in bytes.chunks_exact(size) {
        let value = match data_type {
            DataType::Int8 => chunk[0] as i8 as f64,
            DataType::UInt8 => chunk[0] as f64,
            DataType::Int16 => order.read_u16(chunk)? as i16 as f64,
            DataType::UInt16 => order.read_u16(chunk)? as f64,
            DataType::Int32 => order.read_i32(chunk)? as f64,
            DataType::UInt32 => order.read_u32(chunk)? as f64,
            DataType::Single => order.read_f32(chunk)? as f64,
            DataType::Double => order.read_f64(chunk)?,
            DataType::Int64 => order.read_u64(chunk)? as i64 as f64,
            DataType::UInt64 => order.read_u64(chunk)? as f64,
            _ => return Err(FormatError::InvalidTag),
        };
        values.push(value);
    }
    Ok(values)
}

/// Decode an integer payload into indices, rejecting negative entries
pub fn decode_indices(data_type: DataType, bytes: &[u8], order: ByteOrder) -> Result<Vec<usize>> {
    if !data_type.is_integer() {
        return Err(FormatError::InvalidTag);
    }
    let size = data_type.size_bytes().ok_or(FormatError::InvalidTag)?;
    let count = validate_array_bounds(bytes.len(), size)?;

    let mut indices = Vec::with_capacity(count);
    for chunk in bytes.chunks_exact(size) {
        let signed: i128 = match data_type {
            DataType::Int8 => chunk[0] as i8 as i128,
            DataType::UInt8 => chunk[0] as i128,
            DataType::Int16 => order.read_u16(chunk)? as i16 as i128,
            DataType::UInt16 => order.read_u16(chunk)? as i128,
            DataType::Int32 => order.read_i32(chunk)? as i128,
            DataType::UInt32 => order.read_u32(chunk)? as i128,
            DataType::Int64 => order.read_u64(chunk)? as i64 as i128,
            DataType::UInt64 => order.read_u64(chunk)? as i128,
            _ => return Err(FormatError::InvalidTag),
        };
        if signed < 0 {
            return Err(FormatError::NegativeValue);
        }
        indices.push(usize::try_from(signed).map_err(|_| FormatError::ArraySizeOverflow)?);
    }
    Ok(indices)
}

/// Little-endian bytes of `values`, borrowed without copying on little-endian hosts
pub fn encode_f64s(values: &[f64]) -> Cow<'_, [u8]> {
    if cfg!(target_endian = "little") {
        Cow::Borrowed(bytemuck::cast_slice(values))
    } else {
        Cow::Owned(values.iter().flat_map(|v| v.to_le_bytes()).collect())
    }
}

/// Little-endian bytes of 32-bit signed indices
pub fn encode_i32s(values: &[usize]) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(values.len() * 4);
    for &v in values {
        let v = i32::try_from(v).map_err(|_| FormatError::ArraySizeOverflow)?;
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    Ok(bytes)
}

/// Little-endian bytes of one unsigned 32-bit value
pub fn encode_u32(value: usize) -> Result<[u8; 4]> {
    u32::try_from(value)
        .map(u32::to_le_bytes)
        .map_err(|_| FormatError::ArraySizeOverflow)
}
