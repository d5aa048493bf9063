//! Overlay classification, RGB triple rendering, and false-color mapping

use super::DisplayMapping;
use crate::error::RenderError;
use crate::slice::{extract_channel_slice, SliceRequest};
use crate::types::{BrightnessContrast, RgbaFrame, SliceFrame};
use crate::volume::Volume;
use rayon::prelude::*;
use std::fmt;

/// What a secondary volume represents and how it should be rendered
///
/// Prefer carrying this tag explicitly from the point the volume is produced;
/// [`classify_overlay`] exists only for ingest paths that lack one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    /// Three concatenated channel planes rendered as true color
    RgbTriple,
    /// Integer class ids rendered through the segmentation palette
    Segmentation,
    /// Single-channel intensities rendered through the hot color ramp
    FalseColor,
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RgbTriple => write!(f, "RGB triple"),
            Self::Segmentation => write!(f, "segmentation"),
            Self::FalseColor => write!(f, "false-color"),
        }
    }
}

/// Heuristic classification from a filename hint and the bytes-per-voxel
/// ratio of the uploaded payload
///
/// One fixed contract: a ratio within `3.0 ± 0.2` is an RGB triple; a `seg`
/// hint forces segmentation; a ratio within `1.0 ± 0.2` without an `rgb`
/// hint is segmentation; everything else renders as false-color grayscale.
#[must_use]
pub fn classify_overlay(name_hint: Option<&str>, bytes_per_voxel: f32) -> OverlayKind {
    let name = name_hint.map(str::to_ascii_lowercase).unwrap_or_default();
    let hints_rgb = name.contains("rgb");
    let hints_seg = name.contains("seg");

    if (bytes_per_voxel - 3.0).abs() <= 0.2 {
        return OverlayKind::RgbTriple;
    }
    if hints_seg {
        return OverlayKind::Segmentation;
    }
    if (bytes_per_voxel - 1.0).abs() <= 0.2 && !hints_rgb {
        return OverlayKind::Segmentation;
    }
    OverlayKind::FalseColor
}

/// Render a three-channel overlay volume as true-color RGBA
///
/// Each channel plane is resliced and slab-averaged independently.
/// Brightness and contrast act as plain multiplicative factors on the
/// channel values, not through the windowing formula.
///
/// # Errors
///
/// Returns [`RenderError::OverlayShape`] when the volume does not carry
/// exactly three channels, and propagates reslicing errors
pub fn render_rgb_triple(
    volume: &Volume,
    request: &SliceRequest,
    bc: BrightnessContrast,
) -> Result<RgbaFrame, RenderError> {
    if volume.dims().channels != 3 {
        return Err(RenderError::OverlayShape {
            kind: "RGB triple",
            expected: 3,
            actual: volume.dims().channels,
        });
    }

    let red = extract_channel_slice(volume, request, 0)?;
    let green = extract_channel_slice(volume, request, 1)?;
    let blue = extract_channel_slice(volume, request, 2)?;

    let factor = (bc.brightness / 100.0) * (bc.contrast / 100.0);
    let scale = |value: f32| (value * factor).clamp(0.0, 255.0) as u8;

    let pixels = red
        .values
        .iter()
        .zip(green.values.iter())
        .zip(blue.values.iter())
        .flat_map(|((&r, &g), &b)| [scale(r), scale(g), scale(b), 255])
        .collect();

    Ok(RgbaFrame::new(red.width, red.height, pixels))
}

/// Four-stop "hot" ramp over a display value: black, red, yellow, white
#[inline]
#[must_use]
pub fn hot_color(value: u8) -> [u8; 3] {
    let t = f32::from(value) / 255.0;
    let r = (3.0 * t).min(1.0);
    let g = (3.0 * t - 1.0).clamp(0.0, 1.0);
    let b = (3.0 * t - 2.0).clamp(0.0, 1.0);
    [
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    ]
}

/// Render a single-channel frame through the hot ramp
///
/// Intensities are first brought into the display domain with the same
/// mapping used for grayscale rendering, then colorized.
///
/// # Errors
///
/// Propagates mapping-parameter errors from the grayscale stage
pub fn render_false_color(
    frame: &SliceFrame,
    mapping: DisplayMapping,
    data_range: (f32, f32),
) -> Result<RgbaFrame, RenderError> {
    mapping.validate()?;

    let pixels: Vec<u8> = frame
        .values
        .par_chunks(frame.width.max(1))
        .flat_map_iter(|row| {
            row.iter().flat_map(move |&intensity| {
                let [r, g, b] = hot_color(mapping.apply(intensity, data_range));
                [r, g, b, 255]
            })
        })
        .collect();

    Ok(RgbaFrame::new(frame.width, frame.height, pixels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slice::SlicePlane;
    use crate::testutil::rgb_volume;
    use crate::types::WindowLevel;
    use assert_matches::assert_matches;

    #[test]
    fn ratio_three_classifies_as_rgb() {
        assert_eq!(classify_overlay(None, 3.0), OverlayKind::RgbTriple);
        assert_eq!(classify_overlay(None, 2.85), OverlayKind::RgbTriple);
        assert_eq!(
            classify_overlay(Some("tumour_seg.nii"), 3.1),
            OverlayKind::RgbTriple
        );
    }

    #[test]
    fn ratio_one_without_rgb_hint_is_segmentation() {
        assert_eq!(classify_overlay(None, 1.0), OverlayKind::Segmentation);
        assert_eq!(
            classify_overlay(Some("mask_SEG.nii"), 1.1),
            OverlayKind::Segmentation
        );
        // An rgb hint at ratio 1 falls through to false-color
        assert_eq!(
            classify_overlay(Some("rgb_map.nii"), 1.0),
            OverlayKind::FalseColor
        );
    }

    #[test]
    fn seg_hint_wins_outside_the_unit_band() {
        assert_eq!(
            classify_overlay(Some("seg_probs.nii"), 4.0),
            OverlayKind::Segmentation
        );
    }

    #[test]
    fn other_ratios_are_false_color() {
        assert_eq!(classify_overlay(None, 2.0), OverlayKind::FalseColor);
        assert_eq!(classify_overlay(None, 4.0), OverlayKind::FalseColor);
    }

    #[test]
    fn rgb_triple_reads_channel_planes() {
        // 1x1x1 voxel, planes R=10, G=20, B=30
        let volume = rgb_volume(1, 1, 1, &[10.0, 20.0, 30.0]);
        let request = SliceRequest::new(SlicePlane::Axial, 0);
        let frame =
            render_rgb_triple(&volume, &request, BrightnessContrast::default()).unwrap();

        assert_eq!(frame.pixel(0, 0), [10, 20, 30, 255]);
    }

    #[test]
    fn rgb_triple_scales_multiplicatively() {
        let volume = rgb_volume(1, 1, 1, &[100.0, 200.0, 300.0]);
        let request = SliceRequest::new(SlicePlane::Axial, 0);
        let bc = BrightnessContrast::new(200.0, 100.0);
        let frame = render_rgb_triple(&volume, &request, bc).unwrap();

        // Factor 2.0, clamped at 255
        assert_eq!(frame.pixel(0, 0), [200, 255, 255, 255]);
    }

    #[test]
    fn rgb_triple_requires_three_channels() {
        let volume = crate::testutil::ramp_volume();
        let request = SliceRequest::new(SlicePlane::Axial, 0);
        assert_matches!(
            render_rgb_triple(&volume, &request, BrightnessContrast::default()),
            Err(RenderError::OverlayShape {
                kind: "RGB triple",
                expected: 3,
                actual: 1
            })
        );
    }

    #[test]
    fn hot_ramp_endpoints_and_stops() {
        assert_eq!(hot_color(0), [0, 0, 0]);
        assert_eq!(hot_color(85), [255, 0, 0]);
        assert_eq!(hot_color(170), [255, 255, 0]);
        assert_eq!(hot_color(255), [255, 255, 255]);
    }

    #[test]
    fn false_color_maps_through_display_domain() {
        let frame = SliceFrame::new(2, 1, vec![0.0, 255.0]);
        let mapping = DisplayMapping::Window(WindowLevel::new(127.5, 255.0));
        let rgba = render_false_color(&frame, mapping, (0.0, 255.0)).unwrap();

        assert_eq!(rgba.pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(rgba.pixel(1, 0), [255, 255, 255, 255]);
    }
}
