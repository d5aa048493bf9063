//! Decoded voxel volumes
//!
//! A [`Volume`] is created once per loaded file by [`decode_volume`] and is
//! immutable afterwards: every render reads from the same canonical f32
//! buffer, and derived quantities such as the global intensity range are
//! memoized on first use.

mod decode;
mod header;

pub use decode::decode_volume;
pub use header::{DataType, VolumeHeader};

use crate::types::Dimensions;
use std::sync::OnceLock;

/// A typed, affine-scaled voxel volume
///
/// Storage is row-major with X fastest-varying, then Y, then Z; multi-channel
/// volumes store one full XYZ plane per channel, channel 0 first.
#[derive(Debug)]
pub struct Volume {
    header: VolumeHeader,
    dims: Dimensions,
    data: Vec<f32>,
    range: OnceLock<(f32, f32)>,
}

impl Volume {
    pub(crate) fn new(header: VolumeHeader, dims: Dimensions, data: Vec<f32>) -> Self {
        Self {
            header,
            dims,
            data,
            range: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn header(&self) -> &VolumeHeader {
        &self.header
    }

    #[must_use]
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Voxel at `(x, y, z)` in channel 0; out-of-range coordinates read as 0
    #[inline]
    #[must_use]
    pub fn voxel(&self, x: i64, y: i64, z: i64) -> f32 {
        self.channel_voxel(0, x, y, z)
    }

    /// Voxel at `(x, y, z)` in the given channel plane
    ///
    /// Any coordinate or channel outside the volume reads as 0, so callers
    /// can sample without bounds arithmetic.
    #[inline]
    #[must_use]
    pub fn channel_voxel(&self, channel: usize, x: i64, y: i64, z: i64) -> f32 {
        let Dimensions { x: nx, y: ny, z: nz, channels } = self.dims;
        if channel >= channels
            || x < 0
            || y < 0
            || z < 0
            || x >= nx as i64
            || y >= ny as i64
            || z >= nz as i64
        {
            return 0.0;
        }

        let plane = channel * self.dims.voxel_count();
        let index = (z as usize) * nx * ny + (y as usize) * nx + x as usize;
        self.data[plane + index]
    }

    /// Global min/max over the entire buffer, computed once per volume
    #[must_use]
    pub fn intensity_range(&self) -> (f32, f32) {
        *self.range.get_or_init(|| {
            self.data
                .iter()
                .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), &v| {
                    (min.min(v), max.max(v))
                })
        })
    }
}
