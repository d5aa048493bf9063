//! Error taxonomy for the reslicing pipeline
//!
//! Decode-time errors are fatal for the volume being loaded: no partially
//! decoded buffer is ever exposed. Render-time errors fail the single render
//! call that produced them; the previous frame held by the caller is never
//! touched. All failures are deterministic functions of their input.

use thiserror::Error;

/// Failures while turning a raw byte buffer into a typed volume
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Header missing entries or declaring impossible extents
    #[error("invalid volume header: {reason}")]
    Format { reason: String },

    /// Buffer length inconsistent with the declared shape and datatype
    #[error("pixel buffer size mismatch: expected {expected} bytes for declared shape, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Failures of a single render call
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    /// Slab thickness of zero samples makes the average undefined
    #[error("slab thickness must be at least 1 sample")]
    ZeroThickness,

    /// Windowing requires a strictly positive width
    #[error("window width must be positive, got {width}")]
    NonPositiveWindow { width: f32 },

    /// Overlay volume does not have the shape its kind requires
    #[error("{kind} overlay expects {expected} channel(s), volume has {actual}")]
    OverlayShape {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Two frames that must share extents do not
    #[error(
        "frame extents {frame_width}x{frame_height} do not match base {base_width}x{base_height}"
    )]
    FrameMismatch {
        frame_width: usize,
        frame_height: usize,
        base_width: usize,
        base_height: usize,
    },
}
