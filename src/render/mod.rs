//! Slice rendering: intensity mapping and overlay compositing
//!
//! The entry point is [`render`], a pure function of an immutable
//! [`RenderRequest`]. The caller owns all mutable viewer state and re-invokes
//! the pipeline on every parameter change; a failed call returns an error and
//! produces no partial output, so the caller's last good frame survives.

mod grayscale;
mod overlay;
mod segmentation;

pub use grayscale::{map_brightness_contrast, map_window, render_grayscale, DisplayMapping};
pub use overlay::{
    classify_overlay, hot_color, render_false_color, render_rgb_triple, OverlayKind,
};
pub use segmentation::{
    class_color, render_segmentation_blended, render_segmentation_mask, SegmentationView,
    SEGMENTATION_PALETTE, UNKNOWN_CLASS_COLOR,
};

use crate::error::RenderError;
use crate::slice::{extract_slice, SliceRequest};
use crate::types::{BrightnessContrast, RgbaFrame};
use crate::volume::Volume;
use tracing::debug;

/// A secondary volume rendered on top of (or instead of) the base scan
#[derive(Debug, Clone, Copy)]
pub struct OverlaySpec<'a> {
    pub volume: &'a Volume,
    pub kind: OverlayKind,
    /// Presentation for segmentation overlays; ignored for other kinds
    pub view: SegmentationView,
}

impl<'a> OverlaySpec<'a> {
    #[must_use]
    pub fn new(volume: &'a Volume, kind: OverlayKind) -> Self {
        Self {
            volume,
            kind,
            view: SegmentationView::default(),
        }
    }

    #[must_use]
    pub fn with_view(mut self, view: SegmentationView) -> Self {
        self.view = view;
        self
    }
}

/// Everything one render reads: base volume, slice descriptor, tone mapping,
/// and an optional overlay
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub volume: &'a Volume,
    pub slice: SliceRequest,
    pub mapping: DisplayMapping,
    pub overlay: Option<OverlaySpec<'a>>,
}

impl<'a> RenderRequest<'a> {
    #[must_use]
    pub fn new(volume: &'a Volume, slice: SliceRequest, mapping: DisplayMapping) -> Self {
        Self {
            volume,
            slice,
            mapping,
            overlay: None,
        }
    }

    #[must_use]
    pub fn with_overlay(mut self, overlay: OverlaySpec<'a>) -> Self {
        self.overlay = Some(overlay);
        self
    }
}

/// Execute one render request to completion
///
/// # Errors
///
/// Returns a [`RenderError`] for a zero-sample slab, degenerate mapping
/// parameters, or an overlay volume whose shape does not fit its kind
pub fn render(request: &RenderRequest<'_>) -> Result<RgbaFrame, RenderError> {
    debug!(
        plane = %request.slice.plane,
        index = request.slice.index,
        thickness = request.slice.thickness,
        overlay = ?request.overlay.as_ref().map(|o| o.kind),
        "rendering slice"
    );

    let Some(overlay) = &request.overlay else {
        let frame = extract_slice(request.volume, &request.slice)?;
        return render_grayscale(&frame, request.mapping, request.volume.intensity_range());
    };

    match overlay.kind {
        OverlayKind::RgbTriple => {
            // Brightness/contrast carries over as multiplicative factors;
            // windowing does not apply to true-color data
            let bc = match request.mapping {
                DisplayMapping::BrightnessContrast(bc) => bc,
                DisplayMapping::Window(_) => BrightnessContrast::default(),
            };
            render_rgb_triple(overlay.volume, &request.slice, bc)
        }
        OverlayKind::Segmentation => {
            let classes = extract_slice(overlay.volume, &request.slice)?;
            match overlay.view {
                SegmentationView::Mask => Ok(render_segmentation_mask(&classes)),
                SegmentationView::Blended => {
                    let base_frame = extract_slice(request.volume, &request.slice)?;
                    let base = render_grayscale(
                        &base_frame,
                        request.mapping,
                        request.volume.intensity_range(),
                    )?;
                    render_segmentation_blended(&classes, &base)
                }
            }
        }
        OverlayKind::FalseColor => {
            let frame = extract_slice(overlay.volume, &request.slice)?;
            render_false_color(&frame, request.mapping, overlay.volume.intensity_range())
        }
    }
}
