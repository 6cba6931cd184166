//! Grid wiring compliance helpers.
//!
//! These functions check the invariants every built grid must satisfy,
//! whatever its shape and topology. Reused by the unit tests below and the
//! property tests.

use crate::grid::Grid;
use crate::topology::{self, Topology};
use weft_core::CellId;

/// Assert that every executor is linked to its own slot.
pub fn assert_links_consistent<T>(grid: &Grid<T>) {
    assert_eq!(grid.validate(), Ok(()), "mesh failed validation");
    for (id, cell) in grid.mesh().iter() {
        assert_eq!(cell.executor().cell(), Ok(id), "cell {id} linked elsewhere");
    }
}

/// Assert that each cell's neighbour count matches its position.
pub fn assert_degrees<T>(grid: &Grid<T>) {
    let (w, h, t) = (grid.width(), grid.height(), grid.topology());
    for (id, cell) in grid.mesh().iter() {
        let (r, c) = topology::coords(id.index(), w);
        let expected = topology::expected_degree(r, c, w, h, t);
        assert_eq!(
            cell.neighborhood().size(),
            expected,
            "cell {id} at ({r}, {c}) in {w}x{h} {t}"
        );
    }
}

/// Assert that `b` appears in `N(a)` exactly as often as `a` appears in `N(b)`.
pub fn assert_neighbours_symmetric<T>(grid: &Grid<T>) {
    let mesh = grid.mesh();
    let count = |of: CellId, within: CellId| {
        mesh.cell(within)
            .map(|c| c.neighborhood().iter().filter(|&n| n == of).count())
            .unwrap_or(0)
    };
    for (a, cell) in mesh.iter() {
        for b in cell.neighborhood() {
            assert_eq!(
                count(*b, a),
                count(a, *b),
                "neighbour symmetry violated between {a} and {b}"
            );
        }
    }
}

/// Assert the total subscription count.
///
/// On a torus every cell has 4. On a raw grid each axis of length `n`
/// contributes `2 * (n - 1)` links per line.
pub fn assert_total_subscriptions<T>(grid: &Grid<T>) {
    let (w, h) = (grid.width(), grid.height());
    let expected = match grid.topology() {
        Topology::Torus => 4 * w * h,
        Topology::Raw => 2 * (w - 1) * h + 2 * (h - 1) * w,
    };
    assert_eq!(grid.mesh().subscription_count(), expected);
}

/// Run every compliance check on a grid.
pub fn run_full_compliance<T>(grid: &Grid<T>) {
    assert_links_consistent(grid);
    assert_degrees(grid);
    assert_neighbours_symmetric(grid);
    assert_total_subscriptions(grid);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(width: usize, height: usize, topology: Topology) {
        let grid: Grid<u8> = Grid::build(width, height, topology).unwrap();
        run_full_compliance(&grid);
    }

    #[test]
    fn compliance_raw() {
        check(1, 1, Topology::Raw);
        check(1, 5, Topology::Raw);
        check(3, 3, Topology::Raw);
        check(7, 4, Topology::Raw);
    }

    #[test]
    fn compliance_torus() {
        check(1, 1, Topology::Torus);
        check(2, 2, Topology::Torus);
        check(1, 6, Topology::Torus);
        check(5, 2, Topology::Torus);
        check(8, 8, Topology::Torus);
    }
}
