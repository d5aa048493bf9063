//! NIfTI-style volume header
//!
//! The header is produced by an external parser; this module validates the
//! fields the pipeline consumes and passes the remaining calibration and
//! orientation fields through unchanged for metadata display.

use crate::error::DecodeError;
use crate::types::{Dimensions, RescaleParams, VoxelSpacing};
use std::fmt;

/// Element datatype declared by the header, following the NIfTI code table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Uint8,
    Int16,
    Int32,
    Float32,
    Float64,
    Int8,
    Uint16,
    Uint32,
    /// Unrecognized code; the buffer is reinterpreted as raw bytes
    Unknown(i16),
}

impl DataType {
    #[must_use]
    pub fn from_code(code: i16) -> Self {
        match code {
            2 => Self::Uint8,
            4 => Self::Int16,
            8 => Self::Int32,
            16 => Self::Float32,
            64 => Self::Float64,
            256 => Self::Int8,
            512 => Self::Uint16,
            768 => Self::Uint32,
            other => Self::Unknown(other),
        }
    }

    #[inline]
    #[must_use]
    pub const fn bytes_per_element(self) -> usize {
        match self {
            Self::Uint8 | Self::Int8 | Self::Unknown(_) => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float32 => 4,
            Self::Float64 => 8,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uint8 => write!(f, "uint8"),
            Self::Int16 => write!(f, "int16"),
            Self::Int32 => write!(f, "int32"),
            Self::Float32 => write!(f, "float32"),
            Self::Float64 => write!(f, "float64"),
            Self::Int8 => write!(f, "int8"),
            Self::Uint16 => write!(f, "uint16"),
            Self::Uint32 => write!(f, "uint32"),
            Self::Unknown(code) => write!(f, "unknown({code})"),
        }
    }
}

/// Parsed header fields the pipeline consumes, plus pass-through metadata
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeHeader {
    /// Dimensionality vector: `dim[0]` is the rank, `dim[1..=3]` the spatial
    /// extents, `dim[4]` the optional channel count
    pub dim: Vec<i64>,
    pub datatype: DataType,
    pub rescale: RescaleParams,
    /// Per-axis grid spacing; `pixdim[1..=3]` are the spatial steps
    pub pixdim: Vec<f32>,
    // Calibration and orientation fields are display metadata only
    pub cal_min: f32,
    pub cal_max: f32,
    pub qform_code: i16,
    pub sform_code: i16,
    pub descrip: String,
}

impl VolumeHeader {
    #[must_use]
    pub fn new(dim: Vec<i64>, datatype_code: i16, rescale: RescaleParams) -> Self {
        Self {
            dim,
            datatype: DataType::from_code(datatype_code),
            rescale,
            pixdim: vec![1.0; 8],
            cal_min: 0.0,
            cal_max: 0.0,
            qform_code: 0,
            sform_code: 0,
            descrip: String::new(),
        }
    }

    #[must_use]
    pub fn with_pixdim(mut self, pixdim: Vec<f32>) -> Self {
        self.pixdim = pixdim;
        self
    }

    /// Validate the dimensionality vector and derive the volume extents
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Format`] when the vector has fewer than four
    /// entries or any spatial extent is not positive
    pub fn dimensions(&self) -> Result<Dimensions, DecodeError> {
        if self.dim.len() < 4 {
            return Err(DecodeError::Format {
                reason: format!(
                    "dimension vector has {len} entries, need at least 4",
                    len = self.dim.len()
                ),
            });
        }

        for (axis, &extent) in self.dim[1..=3].iter().enumerate() {
            if extent <= 0 {
                return Err(DecodeError::Format {
                    reason: format!(
                        "spatial extent {extent} on axis {axis} must be positive",
                        axis = axis + 1
                    ),
                });
            }
        }

        // dim[4], when present and positive, is the channel count; a rank-3
        // file or a zero entry means a single channel
        let channels = if self.dim[0] >= 4 {
            self.dim.get(4).copied().filter(|&c| c > 0).unwrap_or(1)
        } else {
            1
        };

        Ok(Dimensions::new(
            self.dim[1] as usize,
            self.dim[2] as usize,
            self.dim[3] as usize,
            channels as usize,
        ))
    }

    /// Spatial grid spacing, defaulting to isotropic when pixdim is sparse
    #[must_use]
    pub fn spacing(&self) -> VoxelSpacing {
        let step = |i: usize| self.pixdim.get(i).copied().filter(|&s| s > 0.0).unwrap_or(1.0);
        VoxelSpacing::new(step(1), step(2), step(3))
    }

    /// Byte length the raw buffer must have for this header
    #[must_use]
    pub fn expected_byte_len(&self, dims: &Dimensions) -> usize {
        dims.element_count() * self.datatype.bytes_per_element()
    }
}
