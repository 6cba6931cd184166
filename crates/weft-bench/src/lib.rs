//! Benchmark profiles for the Weft simulation engine.
//!
//! Provides pre-seeded Conway grids for benchmarking and examples:
//!
//! - [`reference_profile`]: 100x100 torus (10K cells) at 35% density
//! - [`stress_profile`]: 316x316 torus (~100K cells) at the same density

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use weft_grid::{Grid, GridConfig, GridError, Topology};
use weft_rules::{conway_factory, CellState, SeedError, Soup};

/// Initial live-cell density of the benchmark profiles.
pub const DENSITY: f64 = 0.35;

/// Build a Conway grid of the given shape and fill it from `seed`.
pub fn seeded_conway(config: GridConfig, seed: u64) -> Result<Grid<CellState>, SeedError> {
    let mut grid = config
        .builder::<CellState>()?
        .behavior(conway_factory())
        .build()?;
    Soup::new(DENSITY, seed)?.fill(&mut grid)?;
    Ok(grid)
}

/// 100x100 torus (10K cells).
pub fn reference_profile(seed: u64) -> Result<Grid<CellState>, SeedError> {
    seeded_conway(GridConfig::new(100, 100, Topology::Torus), seed)
}

/// 316x316 torus (~100K cells).
///
/// Same rule and density as [`reference_profile`] at 10x the cell count.
pub fn stress_profile(seed: u64) -> Result<Grid<CellState>, SeedError> {
    seeded_conway(GridConfig::new(316, 316, Topology::Torus), seed)
}

/// An unseeded grid of idle `u8` cells, for wiring benchmarks.
pub fn idle_grid(width: usize, height: usize, topology: Topology) -> Result<Grid<u8>, GridError> {
    Grid::build(width, height, topology)
}
