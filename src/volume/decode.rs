//! Raw byte buffer to canonical f32 volume
//!
//! Datatype dispatch happens exactly once, here; every downstream component
//! works on the canonical `f32` buffer and never re-inspects the datatype.

use super::header::{DataType, VolumeHeader};
use super::Volume;
use crate::error::DecodeError;
use tracing::debug;

/// Decode a raw byte buffer into a typed, affine-scaled volume
///
/// The affine rescale (`value * slope + intercept`) is applied element-wise
/// once at decode time, and only when it is not the identity.
///
/// # Errors
///
/// Returns [`DecodeError::Format`] for an invalid dimension vector and
/// [`DecodeError::SizeMismatch`] when the buffer length does not match the
/// declared shape and datatype. A mismatched buffer is never truncated.
pub fn decode_volume(header: &VolumeHeader, bytes: &[u8]) -> Result<Volume, DecodeError> {
    let dims = header.dimensions()?;

    let expected = header.expected_byte_len(&dims);
    if bytes.len() != expected {
        return Err(DecodeError::SizeMismatch {
            expected,
            actual: bytes.len(),
        });
    }

    let mut data = decode_elements(header.datatype, bytes);

    if !header.rescale.is_identity() {
        for value in &mut data {
            *value = header.rescale.apply(*value);
        }
    }

    debug!(
        dims = %dims,
        datatype = %header.datatype,
        rescaled = !header.rescale.is_identity(),
        "decoded volume"
    );

    Ok(Volume::new(header.clone(), dims, data))
}

/// Element-wise conversion of little-endian bytes to f32
fn decode_elements(datatype: DataType, bytes: &[u8]) -> Vec<f32> {
    match datatype {
        DataType::Uint8 => bytes.iter().map(|&b| f32::from(b)).collect(),
        DataType::Int8 => bytes.iter().map(|&b| f32::from(b as i8)).collect(),
        DataType::Int16 => bytes
            .chunks_exact(2)
            .map(|c| f32::from(i16::from_le_bytes([c[0], c[1]])))
            .collect(),
        DataType::Uint16 => bytes
            .chunks_exact(2)
            .map(|c| f32::from(u16::from_le_bytes([c[0], c[1]])))
            .collect(),
        DataType::Int32 => bytes
            .chunks_exact(4)
            .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]) as f32)
            .collect(),
        DataType::Uint32 => bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]) as f32)
            .collect(),
        DataType::Float32 => bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect(),
        DataType::Float64 => bytes
            .chunks_exact(8)
            .map(|c| {
                f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]) as f32
            })
            .collect(),
        // Unrecognized code: treat every byte as one element rather than
        // failing the whole load
        DataType::Unknown(_) => bytes.iter().map(|&b| f32::from(b)).collect(),
    }
}
