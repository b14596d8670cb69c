//! Error types for grid construction and tick preconditions.

use std::fmt;

/// Caller bugs detected before a tick mutates anything.
#[derive(Debug, Clone, PartialEq)]
pub enum FireError {
    /// Grid side length of zero.
    ZeroSide,
    /// Side length whose buffers cannot be addressed on this platform.
    SideTooLarge {
        /// The rejected side length.
        side: usize,
    },
    /// Side passed with a tick differs from the one the simulation was built for.
    SideMismatch {
        /// Side the simulation was built for.
        expected: usize,
        /// Side supplied by the caller.
        actual: usize,
    },
    /// Intensity buffer has the wrong number of cells.
    IntensityLength {
        /// Required length, overscan tail included.
        expected: usize,
        /// Length supplied by the caller.
        actual: usize,
    },
    /// Color buffer has the wrong number of components.
    ColorLength {
        /// Required length (`cells * 4`).
        expected: usize,
        /// Length supplied by the caller.
        actual: usize,
    },
    /// An intensity cell is not a palette index.
    IntensityOutOfRange {
        /// Offending cell.
        index: usize,
        /// Its value.
        value: i32,
    },
    /// A tunable parameter is non-finite or outside its range.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f32,
    },
}

impl fmt::Display for FireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSide => write!(f, "grid side length must be at least 1"),
            Self::SideTooLarge { side } => {
                write!(f, "grid side length {side} overflows the addressable cell count")
            }
            Self::SideMismatch { expected, actual } => {
                write!(f, "grid side mismatch: simulation uses {expected}, got {actual}")
            }
            Self::IntensityLength { expected, actual } => {
                write!(f, "intensity buffer needs {expected} cells, got {actual}")
            }
            Self::ColorLength { expected, actual } => {
                write!(f, "color buffer needs {expected} components, got {actual}")
            }
            Self::IntensityOutOfRange { index, value } => {
                write!(f, "intensity {value} at cell {index} is outside [0, 36]")
            }
            Self::InvalidParameter { name, value } => {
                write!(f, "parameter {name} has invalid value {value}")
            }
        }
    }
}

impl std::error::Error for FireError {}
