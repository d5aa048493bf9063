//! # neuroslice
//!
//! Volumetric brain-scan reslicing and display mapping. A NIfTI-style header
//! plus raw byte buffer decode once into an immutable f32 [`volume::Volume`];
//! from there the pipeline extracts 2D frames along the axial, coronal, or
//! sagittal plane with slab averaging, maps raw intensities to display
//! values by window/level or brightness/contrast, renders colored overlays
//! (RGB triples, discrete segmentation classes, false-color heat maps), and
//! derives histogram, profile-curve, and auto-windowing statistics.
//!
//! The whole pipeline is pull-based and pure: [`render::render`] consumes an
//! immutable [`render::RenderRequest`] and either returns a complete RGBA
//! frame or fails with a typed error. File I/O, decompression, and session
//! state belong to the caller.

pub mod error;
pub mod render;
pub mod slice;
pub mod stats;
pub mod types;
pub mod volume;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export the pipeline entry points
pub use render::{render, RenderRequest};
pub use volume::decode_volume;
