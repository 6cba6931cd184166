//! Seeding Conway grids.
//!
//! [`Soup`] fills a grid with a deterministic random pattern: the same
//! density and seed always produce the same cells, on any platform, because
//! the RNG is a seeded ChaCha8 stream. [`place`] stamps a fixed pattern at
//! an origin.
//!
//! Seeding commits immediately. Do it between generations, never between
//! the compute and commit passes.

use std::error::Error;
use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use weft_grid::topology;
use weft_grid::{Grid, GridError, Topology};

use crate::conway::CellState;

/// A 2x2 square. Every live cell has exactly two live neighbours on a
/// 4-connected grid, so it is a still life.
pub const BLOCK: &[(i64, i64)] = &[(0, 0), (0, 1), (1, 0), (1, 1)];

/// Errors from seeding a grid.
#[derive(Clone, Debug, PartialEq)]
pub enum SeedError {
    /// The density is not a probability.
    InvalidDensity {
        /// The rejected value.
        value: f64,
    },
    /// Writing to the grid failed.
    Grid(GridError),
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDensity { value } => {
                write!(f, "density must be within [0, 1], got {value}")
            }
            Self::Grid(e) => write!(f, "seeding grid: {e}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::InvalidDensity { .. } => None,
        }
    }
}

impl From<GridError> for SeedError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

/// Deterministic random fill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Soup {
    density: f64,
    seed: u64,
}

impl Soup {
    /// A soup where each cell is alive with probability `density`.
    pub fn new(density: f64, seed: u64) -> Result<Self, SeedError> {
        if !density.is_finite() || !(0.0..=1.0).contains(&density) {
            return Err(SeedError::InvalidDensity { value: density });
        }
        Ok(Self { density, seed })
    }

    /// Probability that a cell starts alive.
    pub fn density(&self) -> f64 {
        self.density
    }

    /// RNG seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Overwrite every cell of `grid`, row-major. Returns the live count.
    pub fn fill(&self, grid: &mut Grid<CellState>) -> Result<usize, SeedError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut alive = 0;
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                let state = CellState::from(rng.random_bool(self.density));
                if state.is_alive() {
                    alive += 1;
                }
                grid.set(row, col, state)?;
            }
        }
        Ok(alive)
    }
}

/// Set the cells at `origin + offset` alive, for each offset in `cells`.
///
/// Offsets are `(row, col)`. On a torus they wrap; on a raw grid cells that
/// fall outside are skipped. Any `usize` origin is accepted. Returns how
/// many cells were set.
pub fn place(
    grid: &mut Grid<CellState>,
    origin: (usize, usize),
    cells: &[(i64, i64)],
) -> Result<usize, SeedError> {
    let (width, height, t) = (grid.width(), grid.height(), grid.topology());
    let mut placed = 0;
    for &(dr, dc) in cells {
        let (Some(row), Some(col)) = (
            shift(origin.0, dr, height, t),
            shift(origin.1, dc, width, t),
        ) else {
            debug_assert_eq!(t, Topology::Raw);
            continue;
        };
        grid.set(row, col, CellState::Alive)?;
        placed += 1;
    }
    Ok(placed)
}

/// `start + offset` resolved on an axis of `len` cells. Widened to `i128`
/// so no `usize` start or `i64` offset can overflow.
fn shift(start: usize, offset: i64, len: usize, t: Topology) -> Option<usize> {
    let value = i128::try_from(start).ok()? + i128::from(offset);
    let value = match t {
        Topology::Torus => value.rem_euclid(i128::try_from(len).ok()?),
        Topology::Raw => value,
    };
    topology::resolve_axis(i64::try_from(value).ok()?, len, t)
}
