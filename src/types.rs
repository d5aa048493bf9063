//! Domain-specific value types shared across the pipeline

use crate::error::RenderError;
use image::{ImageBuffer, RgbaImage};
use std::fmt;

/// Spatial extents of a decoded volume, plus its channel count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub x: usize,
    pub y: usize,
    pub z: usize,
    pub channels: usize,
}

impl Dimensions {
    #[must_use]
    pub fn new(x: usize, y: usize, z: usize, channels: usize) -> Self {
        Self { x, y, z, channels }
    }

    /// Number of voxels in one channel plane
    #[inline]
    #[must_use]
    pub fn voxel_count(&self) -> usize {
        self.x * self.y * self.z
    }

    /// Total number of stored elements across all channels
    #[inline]
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.voxel_count() * self.channels
    }

    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.x > 0 && self.y > 0 && self.z > 0 && self.channels > 0
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{x}x{y}x{z}", x = self.x, y = self.y, z = self.z)?;
        if self.channels > 1 {
            write!(f, " ({channels} channels)", channels = self.channels)?;
        }
        Ok(())
    }
}

/// Affine scale applied to raw voxel values at decode time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RescaleParams {
    pub slope: f32,
    pub intercept: f32,
}

impl RescaleParams {
    #[must_use]
    pub fn new(slope: f32, intercept: f32) -> Self {
        Self { slope, intercept }
    }

    #[must_use]
    pub const fn identity() -> Self {
        Self {
            slope: 1.0,
            intercept: 0.0,
        }
    }

    /// True when applying the rescale would be a no-op
    #[inline]
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.slope == 1.0 && self.intercept == 0.0
    }

    #[inline(always)]
    #[must_use]
    // Hot path: called for every element during decode
    pub fn apply(&self, value: f32) -> f32 {
        value.mul_add(self.slope, self.intercept)
    }
}

impl Default for RescaleParams {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Display for RescaleParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "slope={slope}, intercept={intercept}",
            slope = self.slope,
            intercept = self.intercept
        )
    }
}

/// Physical voxel spacing in millimetres per axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelSpacing {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl VoxelSpacing {
    #[must_use]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn isotropic() -> Self {
        Self {
            x: 1.0,
            y: 1.0,
            z: 1.0,
        }
    }
}

impl fmt::Display for VoxelSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{x}x{y}x{z} mm", x = self.x, y = self.y, z = self.z)
    }
}

/// Window/level parameters for the professional intensity mapping mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowLevel {
    pub center: f32,
    pub width: f32,
}

impl WindowLevel {
    #[must_use]
    pub fn new(center: f32, width: f32) -> Self {
        Self { center, width }
    }

    /// Lower and upper intensity bounds of the window
    #[inline]
    #[must_use]
    pub fn bounds(&self) -> (f32, f32) {
        let half = self.width / 2.0;
        (self.center - half, self.center + half)
    }
}

impl fmt::Display for WindowLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "C{center}/W{width}",
            center = self.center,
            width = self.width
        )
    }
}

/// Brightness/contrast parameters for the simple intensity mapping mode,
/// expressed as percentages where 100 is neutral
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightnessContrast {
    pub brightness: f32,
    pub contrast: f32,
}

impl BrightnessContrast {
    #[must_use]
    pub fn new(brightness: f32, contrast: f32) -> Self {
        Self {
            brightness,
            contrast,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.brightness == 100.0 && self.contrast == 100.0
    }
}

impl Default for BrightnessContrast {
    fn default() -> Self {
        Self::new(100.0, 100.0)
    }
}

/// A resliced 2D frame of raw intensities, row-major with explicit extents
#[derive(Debug, Clone, PartialEq)]
pub struct SliceFrame {
    pub width: usize,
    pub height: usize,
    pub values: Vec<f32>,
}

impl SliceFrame {
    #[must_use]
    pub fn new(width: usize, height: usize, values: Vec<f32>) -> Self {
        debug_assert_eq!(values.len(), width * height);
        Self {
            width,
            height,
            values,
        }
    }

    #[inline]
    #[must_use]
    pub fn value(&self, x: usize, y: usize) -> f32 {
        self.values[y * self.width + x]
    }
}

/// An RGBA8 pixel buffer produced by a single render call
#[derive(Debug, Clone, PartialEq)]
pub struct RgbaFrame {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl RgbaFrame {
    #[must_use]
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width * height * 4);
        Self {
            width,
            height,
            pixels,
        }
    }

    #[inline]
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let offset = (y * self.width + x) * 4;
        [
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
            self.pixels[offset + 3],
        ]
    }

    /// Alpha-over composite of `self` on top of `base`
    ///
    /// # Errors
    ///
    /// Returns an error if the two frames have different extents
    pub fn composite_over(&self, base: &RgbaFrame) -> Result<RgbaFrame, RenderError> {
        if self.width != base.width || self.height != base.height {
            return Err(RenderError::FrameMismatch {
                frame_width: self.width,
                frame_height: self.height,
                base_width: base.width,
                base_height: base.height,
            });
        }

        let pixels = self
            .pixels
            .chunks_exact(4)
            .zip(base.pixels.chunks_exact(4))
            .flat_map(|(top, bottom)| {
                let alpha = f32::from(top[3]) / 255.0;
                let blend =
                    |t: u8, b: u8| f32::from(t).mul_add(alpha, f32::from(b) * (1.0 - alpha)) as u8;
                [
                    blend(top[0], bottom[0]),
                    blend(top[1], bottom[1]),
                    blend(top[2], bottom[2]),
                    bottom[3].max(top[3]),
                ]
            })
            .collect();

        Ok(RgbaFrame::new(self.width, self.height, pixels))
    }

    /// Convert into an [`image::RgbaImage`] for the raster sink
    #[must_use]
    pub fn into_image(self) -> Option<RgbaImage> {
        ImageBuffer::from_raw(self.width as u32, self.height as u32, self.pixels)
    }
}
