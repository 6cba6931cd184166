//! Two-pass generation driver.
//!
//! The core offers the compute and commit halves of a generation one cell
//! at a time. These helpers sequence them the only correct way: compute
//! every cell, then commit every cell. They stop at the first error, which
//! may leave some cells staged and others not.

use std::fmt;

use weft_core::{ExecError, Mesh};
use weft_grid::Grid;

/// Run one generation over every cell of `mesh`, in slot order.
///
/// Returns how many cells had a staged value applied.
pub fn run_mesh_generation<T: Clone + fmt::Debug>(mesh: &mut Mesh<T>) -> Result<usize, ExecError> {
    let ids: Vec<_> = mesh.ids().collect();
    for &id in &ids {
        mesh.exec(id)?;
    }
    let mut applied = 0;
    for &id in &ids {
        if mesh.commit(id)? {
            applied += 1;
        }
    }
    Ok(applied)
}

/// Run one generation over every cell of `grid`, row-major.
pub fn run_generation<T: Clone + fmt::Debug>(grid: &mut Grid<T>) -> Result<usize, ExecError> {
    let ids: Vec<_> = grid.ids().collect();
    for &id in &ids {
        grid.exec(id)?;
    }
    let mut applied = 0;
    for &id in &ids {
        if grid.commit(id)? {
            applied += 1;
        }
    }
    Ok(applied)
}

/// Run `generations` generations back to back.
pub fn run_generations<T: Clone + fmt::Debug>(
    grid: &mut Grid<T>,
    generations: usize,
) -> Result<(), ExecError> {
    for _ in 0..generations {
        run_generation(grid)?;
    }
    Ok(())
}
