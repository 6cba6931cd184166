//! Coordinate-to-index mapping and neighbour resolution.
//!
//! Everything here is pure arithmetic on `(row, col)` pairs. Rows index the
//! `height` axis and columns the `width` axis; storage is row-major.

use crate::error::GridError;
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// How a grid treats neighbours that fall outside its bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Out-of-range neighbours are omitted (fewer neighbours at edges).
    Raw,
    /// Out-of-range neighbours wrap to the opposite side (periodic).
    Torus,
}

impl Topology {
    /// Canonical lowercase name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Torus => "torus",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topology {
    type Err = GridError;

    /// Parse `raw` or `torus`, case-insensitively.
    ///
    /// Any other name is rejected rather than falling back to `Raw`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "torus" => Ok(Self::Torus),
            _ => Err(GridError::UnsupportedTopology { name: s.to_string() }),
        }
    }
}

/// Offsets of the four axis-aligned neighbours, in subscription order:
/// up, down, left, right.
pub const OFFSETS: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Row-major linear index of `(row, col)`.
pub fn cell_index(row: usize, col: usize, width: usize) -> usize {
    col + row * width
}

/// Inverse of [`cell_index`]: `(row, col)` of a linear index.
pub fn coords(index: usize, width: usize) -> (usize, usize) {
    (index / width, index % width)
}

/// Resolve one axis value under `topology`.
///
/// In-range values pass through. Out-of-range values resolve to `None`
/// for [`Topology::Raw`] and wrap with `((v % len) + len) % len` for
/// [`Topology::Torus`]. Signed 64-bit arithmetic keeps negative offsets
/// exact for any axis length that fits in `i64`.
pub fn resolve_axis(value: i64, len: usize, topology: Topology) -> Option<usize> {
    let n = i64::try_from(len).ok().filter(|&n| n > 0)?;
    if (0..n).contains(&value) {
        return Some(value as usize);
    }
    match topology {
        Topology::Raw => None,
        Topology::Torus => Some((((value % n) + n) % n) as usize),
    }
}

/// Resolve a possibly out-of-range `(row, col)` to a linear index.
pub fn resolve(
    row: i64,
    col: i64,
    width: usize,
    height: usize,
    topology: Topology,
) -> Option<usize> {
    let r = resolve_axis(row, height, topology)?;
    let c = resolve_axis(col, width, topology)?;
    Some(cell_index(r, c, width))
}

/// Linear indices of the 4-connected neighbours of `(row, col)`, in
/// [`OFFSETS`] order. Absent neighbours are skipped.
pub fn neighbor_indices(
    row: usize,
    col: usize,
    width: usize,
    height: usize,
    topology: Topology,
) -> SmallVec<[usize; 4]> {
    let (r, c) = (row as i64, col as i64);
    OFFSETS
        .iter()
        .filter_map(|&(dr, dc)| resolve(r + dr, c + dc, width, height, topology))
        .collect()
}

/// How many neighbours a cell at `(row, col)` gets under `topology`.
pub fn expected_degree(
    row: usize,
    col: usize,
    width: usize,
    height: usize,
    topology: Topology,
) -> usize {
    match topology {
        Topology::Torus => 4,
        Topology::Raw => {
            let vertical = usize::from(row > 0) + usize::from(row + 1 < height);
            let horizontal = usize::from(col > 0) + usize::from(col + 1 < width);
            vertical + horizontal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn index_is_row_major() {
        assert_eq!(cell_index(0, 0, 5), 0);
        assert_eq!(cell_index(0, 4, 5), 4);
        assert_eq!(cell_index(2, 3, 5), 13);
        assert_eq!(coords(13, 5), (2, 3));
    }

    #[test]
    fn resolve_axis_in_bounds() {
        assert_eq!(resolve_axis(2, 5, Topology::Raw), Some(2));
        assert_eq!(resolve_axis(0, 5, Topology::Torus), Some(0));
    }

    #[test]
    fn resolve_axis_raw_out_of_bounds() {
        assert_eq!(resolve_axis(-1, 5, Topology::Raw), None);
        assert_eq!(resolve_axis(5, 5, Topology::Raw), None);
    }

    #[test]
    fn resolve_axis_torus() {
        assert_eq!(resolve_axis(-1, 5, Topology::Torus), Some(4));
        assert_eq!(resolve_axis(5, 5, Topology::Torus), Some(0));
        assert_eq!(resolve_axis(7, 5, Topology::Torus), Some(2));
        assert_eq!(resolve_axis(-6, 5, Topology::Torus), Some(4));
        assert_eq!(resolve_axis(-1, 1, Topology::Torus), Some(0));
    }

    #[test]
    fn resolve_axis_zero_length() {
        assert_eq!(resolve_axis(0, 0, Topology::Torus), None);
    }

    #[test]
    fn neighbors_center_raw() {
        let n = neighbor_indices(1, 1, 3, 3, Topology::Raw);
        // up (0,1)=1, down (2,1)=7, left (1,0)=3, right (1,2)=5
        assert_eq!(n.as_slice(), &[1, 7, 3, 5]);
    }

    #[test]
    fn neighbors_corner_raw() {
        let n = neighbor_indices(0, 0, 3, 3, Topology::Raw);
        assert_eq!(n.as_slice(), &[3, 1]);
    }

    #[test]
    fn neighbors_corner_torus() {
        let n = neighbor_indices(0, 0, 3, 3, Topology::Torus);
        // up wraps to (2,0)=6, down (1,0)=3, left wraps to (0,2)=2, right (0,1)=1
        assert_eq!(n.as_slice(), &[6, 3, 2, 1]);
    }

    #[test]
    fn neighbors_asymmetric_torus() {
        // width 5, height 2: up and down both land on the other row.
        let n = neighbor_indices(0, 4, 5, 2, Topology::Torus);
        assert_eq!(n.as_slice(), &[9, 9, 3, 0]);
    }

    #[test]
    fn single_cell_torus_is_self_adjacent() {
        let n = neighbor_indices(0, 0, 1, 1, Topology::Torus);
        assert_eq!(n.as_slice(), &[0, 0, 0, 0]);
        assert!(neighbor_indices(0, 0, 1, 1, Topology::Raw).is_empty());
    }

    #[test]
    fn parse_names() {
        assert_eq!("raw".parse::<Topology>(), Ok(Topology::Raw));
        assert_eq!(" Torus ".parse::<Topology>(), Ok(Topology::Torus));
        assert_eq!(Topology::Torus.to_string(), "torus");
    }

    #[test]
    fn parse_unknown_is_topology_error() {
        assert_eq!(
            "klein".parse::<Topology>(),
            Err(GridError::UnsupportedTopology {
                name: "klein".into()
            })
        );
    }

    fn arb_topology() -> impl Strategy<Value = Topology> {
        prop_oneof![Just(Topology::Raw), Just(Topology::Torus)]
    }

    proptest! {
        #[test]
        fn index_round_trip(width in 1usize..64, height in 1usize..64, seed in any::<usize>()) {
            let index = seed % (width * height);
            let (r, c) = coords(index, width);
            prop_assert!(r < height && c < width);
            prop_assert_eq!(cell_index(r, c, width), index);
        }

        #[test]
        fn degree_matches_resolution(
            width in 1usize..12,
            height in 1usize..12,
            topology in arb_topology(),
            r in 0usize..12,
            c in 0usize..12,
        ) {
            let r = r % height;
            let c = c % width;
            let n = neighbor_indices(r, c, width, height, topology);
            prop_assert_eq!(n.len(), expected_degree(r, c, width, height, topology));
            prop_assert!(n.iter().all(|&i| i < width * height));
        }

        #[test]
        fn torus_wrap_is_periodic(value in -1000i64..1000, len in 1usize..50) {
            let a = resolve_axis(value, len, Topology::Torus);
            let b = resolve_axis(value + len as i64, len, Topology::Torus);
            prop_assert_eq!(a, b);
            prop_assert!(a.unwrap() < len);
        }
    }
}
