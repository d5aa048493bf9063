//! Raw intensity to 8-bit display value
//!
//! Two mutually exclusive tone-mapping policies: window/level as used in
//! clinical viewers, and a simpler brightness/contrast pair that normalizes
//! against the volume-global intensity range.

use crate::error::RenderError;
use crate::types::{BrightnessContrast, RgbaFrame, SliceFrame, WindowLevel};
use rayon::prelude::*;

/// The tone-mapping policy for one render
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayMapping {
    Window(WindowLevel),
    BrightnessContrast(BrightnessContrast),
}

impl DisplayMapping {
    /// Check parameters that would make the mapping undefined
    pub(crate) fn validate(&self) -> Result<(), RenderError> {
        if let Self::Window(window) = self {
            if window.width <= 0.0 {
                return Err(RenderError::NonPositiveWindow {
                    width: window.width,
                });
            }
        }
        Ok(())
    }

    /// Map one raw intensity to a display value under this policy
    #[inline]
    #[must_use]
    pub fn apply(&self, intensity: f32, data_range: (f32, f32)) -> u8 {
        match self {
            Self::Window(window) => map_window(intensity, *window),
            Self::BrightnessContrast(bc) => {
                map_brightness_contrast(intensity, *bc, data_range)
            }
        }
    }
}

/// Linear window/level mapping: 0 at or below the window, 255 at or above
#[inline]
#[must_use]
pub fn map_window(intensity: f32, window: WindowLevel) -> u8 {
    let (lo, hi) = window.bounds();
    if intensity <= lo {
        0
    } else if intensity >= hi {
        255
    } else {
        ((intensity - lo) / window.width * 255.0).round() as u8
    }
}

/// Brightness/contrast mapping over the volume-global intensity range
///
/// Normalizes to 0..255 against `data_range`, scales by `brightness/100`,
/// then pivots contrast around the 127.5 midpoint. At 100/100 the result is
/// the plain linear normalization. A collapsed range maps everything to 0.
#[inline]
#[must_use]
pub fn map_brightness_contrast(
    intensity: f32,
    bc: BrightnessContrast,
    data_range: (f32, f32),
) -> u8 {
    let (data_min, data_max) = data_range;
    if data_max <= data_min {
        return 0;
    }

    let norm = (intensity - data_min) / (data_max - data_min) * 255.0;
    let scaled = norm * (bc.brightness / 100.0);
    let adjusted = 127.5 + (scaled - 127.5) * (bc.contrast / 100.0);
    adjusted.clamp(0.0, 255.0).round() as u8
}

/// Render a resliced frame as opaque grayscale RGBA
///
/// # Errors
///
/// Returns [`RenderError::NonPositiveWindow`] for a degenerate window width
pub fn render_grayscale(
    frame: &SliceFrame,
    mapping: DisplayMapping,
    data_range: (f32, f32),
) -> Result<RgbaFrame, RenderError> {
    mapping.validate()?;

    // Rows are independent, so shard them across the rayon pool
    let pixels: Vec<u8> = frame
        .values
        .par_chunks(frame.width.max(1))
        .flat_map_iter(|row| {
            row.iter().flat_map(move |&intensity| {
                let gray = mapping.apply(intensity, data_range);
                [gray, gray, gray, 255]
            })
        })
        .collect();

    Ok(RgbaFrame::new(frame.width, frame.height, pixels))
}
