//! Error types for grid construction.

use std::error::Error;
use std::fmt;

use weft_core::CellError;

/// Errors arising from grid configuration or construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// Attempted to build a grid with zero cells.
    EmptyGrid {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// `width * height` overflows the index range or cannot be allocated.
    DimensionTooLarge {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// The requested topology is not implemented.
    UnsupportedTopology {
        /// The name that was requested.
        name: String,
    },
    /// A `(row, col)` coordinate is outside the grid.
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },
    /// The cell mesh failed its consistency check.
    Cell(CellError),
    /// A configuration value is out of range.
    InvalidConfig {
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid { width, height } => {
                write!(f, "grid must have at least one cell, got {width}x{height}")
            }
            Self::DimensionTooLarge { width, height } => {
                write!(f, "grid {width}x{height} is too large to index or allocate")
            }
            Self::UnsupportedTopology { name } => {
                write!(f, "unsupported topology '{name}' (expected 'raw' or 'torus')")
            }
            Self::OutOfBounds {
                row,
                col,
                width,
                height,
            } => write!(
                f,
                "coordinate ({row}, {col}) out of bounds for {width}x{height} grid"
            ),
            Self::Cell(e) => write!(f, "cell mesh: {e}"),
            Self::InvalidConfig { reason } => write!(f, "invalid grid config: {reason}"),
        }
    }
}

impl Error for GridError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Cell(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CellError> for GridError {
    fn from(e: CellError) -> Self {
        Self::Cell(e)
    }
}
