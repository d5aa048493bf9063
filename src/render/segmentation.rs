//! Discrete-class segmentation rendering
//!
//! Each voxel of a segmentation volume holds an integer class id. Rendering
//! either produces a standalone mask (background transparent) or blends the
//! class colors over an already-rendered base frame.

use crate::error::RenderError;
use crate::types::{RgbaFrame, SliceFrame};

/// Fixed class palette; index 0 is background
pub const SEGMENTATION_PALETTE: [[u8; 3]; 5] = [
    [0, 0, 0],       // background
    [100, 180, 255], // NETC
    [255, 255, 150], // SNFH
    [255, 100, 100], // ET
    [200, 100, 200], // RC
];

/// Color for class ids beyond the palette
pub const UNKNOWN_CLASS_COLOR: [u8; 3] = [128, 128, 128];

/// Opacity of class colors in the blended presentation
const BLEND_OPACITY: f32 = 0.5;

/// How segmentation classes are presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentationView {
    /// Standalone mask: background has alpha 0, classes are opaque
    #[default]
    Mask,
    /// Classes blended over the base frame; background shows the base
    Blended,
}

/// Palette lookup for a class id
#[inline]
#[must_use]
pub fn class_color(class: u32) -> [u8; 3] {
    SEGMENTATION_PALETTE
        .get(class as usize)
        .copied()
        .unwrap_or(UNKNOWN_CLASS_COLOR)
}

/// Nearest class id for a resliced value
///
/// Slab averaging can leave fractional values between neighbouring classes;
/// rounding keeps thin structures stable at thickness 1.
#[inline]
fn class_of(value: f32) -> u32 {
    if value <= 0.0 { 0 } else { value.round() as u32 }
}

/// Render a segmentation frame as a standalone mask
#[must_use]
pub fn render_segmentation_mask(frame: &SliceFrame) -> RgbaFrame {
    let pixels = frame
        .values
        .iter()
        .flat_map(|&value| {
            let class = class_of(value);
            let [r, g, b] = class_color(class);
            let alpha = if class == 0 { 0 } else { 255 };
            [r, g, b, alpha]
        })
        .collect();

    RgbaFrame::new(frame.width, frame.height, pixels)
}

/// Blend a segmentation frame over a rendered base frame
///
/// # Errors
///
/// Returns [`RenderError::FrameMismatch`] when the segmentation frame and the
/// base frame have different extents
pub fn render_segmentation_blended(
    frame: &SliceFrame,
    base: &RgbaFrame,
) -> Result<RgbaFrame, RenderError> {
    if frame.width != base.width || frame.height != base.height {
        return Err(RenderError::FrameMismatch {
            frame_width: frame.width,
            frame_height: frame.height,
            base_width: base.width,
            base_height: base.height,
        });
    }

    let pixels = frame
        .values
        .iter()
        .zip(base.pixels.chunks_exact(4))
        .flat_map(|(&value, under)| {
            let class = class_of(value);
            if class == 0 {
                // Background stays the opaque base pixel
                return [under[0], under[1], under[2], 255];
            }
            let [r, g, b] = class_color(class);
            let mix = |c: u8, u: u8| {
                f32::from(c).mul_add(BLEND_OPACITY, f32::from(u) * (1.0 - BLEND_OPACITY)) as u8
            };
            [mix(r, under[0]), mix(g, under[1]), mix(b, under[2]), 255]
        })
        .collect();

    Ok(RgbaFrame::new(frame.width, frame.height, pixels))
}
