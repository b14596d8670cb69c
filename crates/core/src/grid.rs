//! Grid shape, indexing and caller-owned buffers.
//!
//! The intensity grid is a cube of side `N` laid out flat with
//! `index = x + N*y + N²*z`. The last z layer is the floor of the fire,
//! where fresh intensity is injected every tick; propagation pulls values
//! up one layer at a time via the fixed `N²` offset.
//!
//! # Overscan
//!
//! Source injection walks `0..=N` in both floor dimensions. With
//! [`SourceOverscan::Replicate`] the intensity buffer therefore carries a
//! tail of `N + 1` cells past the cube, which injection writes into and
//! nothing else reads. [`SourceOverscan::Clamp`] walks `0..N` and needs no
//! tail.

use serde::{Deserialize, Serialize};

use crate::error::FireError;
use crate::palette::{is_valid_intensity, CHANNELS};

/// How far source injection walks past the nominal floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceOverscan {
    /// Iterate `0..=N` in both floor dimensions and keep an overscan tail.
    #[default]
    Replicate,
    /// Iterate `0..N`; the floor is exactly the last layer.
    Clamp,
}

impl SourceOverscan {
    /// Number of injected columns (and depths) per floor pass.
    #[inline]
    #[must_use]
    pub const fn span(self, side: usize) -> usize {
        match self {
            Self::Replicate => side + 1,
            Self::Clamp => side,
        }
    }

    /// Extra intensity cells required past the cube.
    #[inline]
    #[must_use]
    pub const fn tail_len(self, side: usize) -> usize {
        match self {
            Self::Replicate => side + 1,
            Self::Clamp => 0,
        }
    }
}

/// Validated dimensions of a fire grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridShape {
    side: usize,
    overscan: SourceOverscan,
}

impl GridShape {
    /// Create a shape for a cube of side `side`.
    ///
    /// # Errors
    ///
    /// Returns [`FireError::ZeroSide`] for `side == 0` and
    /// [`FireError::SideTooLarge`] if the buffer lengths overflow `usize`.
    pub fn new(side: usize, overscan: SourceOverscan) -> Result<Self, FireError> {
        if side == 0 {
            return Err(FireError::ZeroSide);
        }

        // Both buffer lengths must be representable
        let cells = side
            .checked_mul(side)
            .and_then(|sq| sq.checked_mul(side))
            .ok_or(FireError::SideTooLarge { side })?;
        cells
            .checked_add(overscan.tail_len(side))
            .ok_or(FireError::SideTooLarge { side })?;
        cells
            .checked_mul(CHANNELS)
            .ok_or(FireError::SideTooLarge { side })?;

        Ok(Self { side, overscan })
    }

    /// Side length `N`.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Overscan policy of the source injection pass.
    #[inline]
    pub fn overscan(&self) -> SourceOverscan {
        self.overscan
    }

    /// Cells in one z layer (`N²`).
    #[inline]
    pub fn layer_len(&self) -> usize {
        self.side * self.side
    }

    /// Cells in the cube (`N³`).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.layer_len() * self.side
    }

    /// First index of the floor layer (`N³ - N²`).
    #[inline]
    pub fn floor_start(&self) -> usize {
        self.cell_count() - self.layer_len()
    }

    /// Required intensity buffer length, overscan tail included.
    #[inline]
    pub fn intensity_len(&self) -> usize {
        self.cell_count() + self.overscan.tail_len(self.side)
    }

    /// Required color buffer length (four floats per cell).
    #[inline]
    pub fn color_len(&self) -> usize {
        self.cell_count() * CHANNELS
    }

    /// Flat index of `(x, y, z)`.
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.side * y + self.layer_len() * z
    }

    /// Inverse of [`GridShape::index`] for cells inside the cube.
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize, usize) {
        let z = index / self.layer_len();
        let rem = index % self.layer_len();
        (rem % self.side, rem / self.side, z)
    }

    /// Check buffer lengths and the intensity domain.
    ///
    /// Every cell of the intensity buffer, overscan tail included, must be a
    /// palette index.
    ///
    /// # Errors
    ///
    /// Returns the first violated precondition.
    pub fn validate(&self, intensity: &[i32], colors: &[f32]) -> Result<(), FireError> {
        if intensity.len() != self.intensity_len() {
            return Err(FireError::IntensityLength {
                expected: self.intensity_len(),
                actual: intensity.len(),
            });
        }
        if colors.len() != self.color_len() {
            return Err(FireError::ColorLength {
                expected: self.color_len(),
                actual: colors.len(),
            });
        }
        if let Some((index, &value)) = intensity
            .iter()
            .enumerate()
            .find(|(_, &v)| !is_valid_intensity(v))
        {
            return Err(FireError::IntensityOutOfRange { index, value });
        }
        Ok(())
    }
}

/// Owned intensity and color buffers sized for a [`GridShape`].
///
/// Embedding hosts usually own their buffers; this is for hosts that don't,
/// for the headless demo and for tests.
#[derive(Debug, Clone, PartialEq)]
pub struct FireBuffers {
    pub intensity: Vec<i32>,
    pub colors: Vec<f32>,
}

impl FireBuffers {
    /// Zeroed buffers for `shape`.
    #[must_use]
    pub fn new(shape: &GridShape) -> Self {
        Self {
            intensity: vec![0; shape.intensity_len()],
            colors: vec![0.0; shape.color_len()],
        }
    }

    /// Reset every intensity to 0 and every color to 0.
    pub fn clear(&mut self) {
        self.intensity.fill(0);
        self.colors.fill(0.0);
    }

    /// Intensities of z layer `z`.
    ///
    /// # Panics
    ///
    /// Panics if `z >= shape.side()` or the buffer is shorter than `shape` needs.
    #[must_use]
    pub fn layer(&self, shape: &GridShape, z: usize) -> &[i32] {
        let start = shape.layer_len() * z;
        &self.intensity[start..start + shape.layer_len()]
    }

    /// Intensities stored past the cube.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is shorter than the cube of `shape`.
    #[must_use]
    pub fn overscan_tail(&self, shape: &GridShape) -> &[i32] {
        &self.intensity[shape.cell_count()..]
    }

    /// Resolved RGBA of cell `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a cell of the color buffer.
    #[must_use]
    pub fn color(&self, index: usize) -> [f32; CHANNELS] {
        let base = index * CHANNELS;
        [
            self.colors[base],
            self.colors[base + 1],
            self.colors[base + 2],
            self.colors[base + 3],
        ]
    }
}
