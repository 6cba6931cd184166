//! Grid configuration and validation.
//!
//! [`GridConfig`] is plain data describing a grid's shape. It can be built
//! in code, or parsed from a compact `WIDTHxHEIGHT[:topology]` string for
//! drivers that take the shape on a command line.

use std::fmt;
use std::str::FromStr;

use crate::error::GridError;
use crate::grid::{cell_count, GridBuilder};
use crate::topology::Topology;
use crate::Grid;

// ── GridConfig ─────────────────────────────────────────────────────

/// Shape of a grid: dimensions and topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridConfig {
    /// Number of columns. Default: 64.
    pub width: usize,
    /// Number of rows. Default: 64.
    pub height: usize,
    /// Edge handling. Default: [`Topology::Torus`].
    pub topology: Topology,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            topology: Topology::Torus,
        }
    }
}

impl GridConfig {
    /// A config with the given shape.
    pub fn new(width: usize, height: usize, topology: Topology) -> Self {
        Self {
            width,
            height,
            topology,
        }
    }

    /// Number of cells the grid will hold, if the shape is valid.
    pub fn cell_count(&self) -> Option<usize> {
        self.width.checked_mul(self.height).filter(|&n| n > 0)
    }

    /// Check the shape without allocating anything.
    pub fn validate(&self) -> Result<(), GridError> {
        let (width, height) = (self.width, self.height);
        // 1. At least one cell.
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid { width, height });
        }
        // 2. Cell count must fit signed offsets and an addressable arena
        //    of the smallest possible cell.
        match cell_count::<()>(width, height) {
            Some(_) => Ok(()),
            None => Err(GridError::DimensionTooLarge { width, height }),
        }
    }

    /// A validated builder for this shape.
    pub fn builder<T>(&self) -> Result<GridBuilder<T>, GridError> {
        self.validate()?;
        Ok(Grid::builder(self.width, self.height).topology(self.topology))
    }
}

impl fmt::Display for GridConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}:{}", self.width, self.height, self.topology)
    }
}

impl FromStr for GridConfig {
    type Err = GridError;

    /// Parse `WIDTHxHEIGHT` or `WIDTHxHEIGHT:topology`.
    ///
    /// The topology defaults to torus when omitted. The parsed shape is
    /// validated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| GridError::InvalidConfig { reason };
        let (dims, topology) = match s.trim().split_once(':') {
            Some((dims, t)) => (dims, t.parse::<Topology>()?),
            None => (s.trim(), Topology::Torus),
        };
        let (w, h) = dims
            .split_once(['x', 'X'])
            .ok_or_else(|| invalid(format!("expected WIDTHxHEIGHT, got '{dims}'")))?;
        let width = w
            .trim()
            .parse::<usize>()
            .map_err(|e| invalid(format!("width '{w}': {e}")))?;
        let height = h
            .trim()
            .parse::<usize>()
            .map_err(|e| invalid(format!("height '{h}': {e}")))?;
        let config = Self::new(width, height, topology);
        config.validate()?;
        Ok(config)
    }
}
