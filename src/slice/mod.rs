//! Orthogonal reslicing with slab-thickness averaging
//!
//! A slice request names one of the three anatomical planes, a slab-center
//! index, and a sample thickness. Coronal and sagittal frames are flipped
//! along Z so that superior anatomy renders at the top of the frame.

use crate::error::RenderError;
use crate::types::{SliceFrame, VoxelSpacing};
use crate::volume::Volume;
use std::fmt;

/// The three anatomical viewing planes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlicePlane {
    Axial,
    Coronal,
    Sagittal,
}

impl SlicePlane {
    /// Extent of the dimension the slab traverses
    #[must_use]
    pub fn slab_extent(self, volume: &Volume) -> usize {
        let dims = volume.dims();
        match self {
            Self::Axial => dims.z,
            Self::Coronal => dims.y,
            Self::Sagittal => dims.x,
        }
    }

    /// Output frame extents as `(width, height)`
    #[must_use]
    pub fn frame_extents(self, volume: &Volume) -> (usize, usize) {
        let dims = volume.dims();
        match self {
            Self::Axial => (dims.x, dims.y),
            Self::Coronal => (dims.x, dims.z),
            Self::Sagittal => (dims.y, dims.z),
        }
    }

    /// In-plane grid spacing as `(width-step, height-step)`
    #[must_use]
    pub fn in_plane_spacing(self, spacing: VoxelSpacing) -> (f32, f32) {
        match self {
            Self::Axial => (spacing.x, spacing.y),
            Self::Coronal => (spacing.x, spacing.z),
            Self::Sagittal => (spacing.y, spacing.z),
        }
    }
}

impl fmt::Display for SlicePlane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Axial => write!(f, "axial"),
            Self::Coronal => write!(f, "coronal"),
            Self::Sagittal => write!(f, "sagittal"),
        }
    }
}

/// Which 2D cross-section to extract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceRequest {
    pub plane: SlicePlane,
    /// Slab-center index, clamped into the slab extent
    pub index: usize,
    /// Sample count for slab averaging; must be at least 1
    pub thickness: u32,
}

impl SliceRequest {
    #[must_use]
    pub fn new(plane: SlicePlane, index: usize) -> Self {
        Self {
            plane,
            index,
            thickness: 1,
        }
    }

    #[must_use]
    pub fn with_thickness(mut self, thickness: u32) -> Self {
        self.thickness = thickness;
        self
    }
}

/// Extract a single-channel 2D frame for the request
///
/// # Errors
///
/// Returns [`RenderError::ZeroThickness`] when the request asks for a slab of
/// zero samples
pub fn extract_slice(volume: &Volume, request: &SliceRequest) -> Result<SliceFrame, RenderError> {
    extract_channel_slice(volume, request, 0)
}

/// Extract a 2D frame sampling one channel plane of a multi-channel volume
///
/// Each output pixel averages `2*(thickness/2) + 1` slab samples centred on
/// the requested index. Sample offsets are clamped into the slab extent, so
/// edge slices repeat; the divisor stays the full sample count.
///
/// # Errors
///
/// Returns [`RenderError::ZeroThickness`] when the request asks for a slab of
/// zero samples
pub fn extract_channel_slice(
    volume: &Volume,
    request: &SliceRequest,
    channel: usize,
) -> Result<SliceFrame, RenderError> {
    if request.thickness == 0 {
        return Err(RenderError::ZeroThickness);
    }

    let slab_max = request.plane.slab_extent(volume) as i64 - 1;
    let center = (request.index as i64).min(slab_max);
    let half = i64::from(request.thickness / 2);
    let samples = (2 * half + 1) as f32;

    let (width, height) = request.plane.frame_extents(volume);
    let z_max = volume.dims().z as i64 - 1;

    let mut values = Vec::with_capacity(width * height);
    for j in 0..height as i64 {
        for i in 0..width as i64 {
            let mut acc = 0.0f32;
            for k in -half..=half {
                let s = (center + k).clamp(0, slab_max);
                let (x, y, z) = match request.plane {
                    SlicePlane::Axial => (i, j, s),
                    // Z-flip keeps superior anatomy at the top of the frame
                    SlicePlane::Coronal => (i, s, z_max - j),
                    SlicePlane::Sagittal => (s, i, z_max - j),
                };
                acc += volume.channel_voxel(channel, x, y, z);
            }
            values.push(acc / samples);
        }
    }

    Ok(SliceFrame::new(width, height, values))
}
