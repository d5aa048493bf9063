//! Shared builders for unit tests

use crate::types::RescaleParams;
use crate::volume::{decode_volume, Volume, VolumeHeader};

/// 4x4x4 float32 volume with values 0..63 in row-major (x, y, z) order
pub(crate) fn ramp_volume() -> Volume {
    volume_from_values(4, 4, 4, &(0..64).map(|v| v as f32).collect::<Vec<_>>())
}

/// Single-channel float32 volume from explicit values
pub(crate) fn volume_from_values(x: i64, y: i64, z: i64, values: &[f32]) -> Volume {
    let header = VolumeHeader::new(vec![3, x, y, z], 16, RescaleParams::identity());
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    decode_volume(&header, &bytes).unwrap()
}

/// Three-channel float32 volume from concatenated R, G, B planes
pub(crate) fn rgb_volume(x: i64, y: i64, z: i64, planes: &[f32]) -> Volume {
    let header = VolumeHeader::new(vec![4, x, y, z, 3], 16, RescaleParams::identity());
    let bytes: Vec<u8> = planes.iter().flat_map(|v| v.to_le_bytes()).collect();
    decode_volume(&header, &bytes).unwrap()
}
