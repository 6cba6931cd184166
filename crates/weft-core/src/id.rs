//! Strongly-typed cell handle.

use std::fmt;

/// Identifies a cell within a [`Mesh`](crate::Mesh).
///
/// A `CellId` is the cell's arena slot. Slots are assigned sequentially at
/// insertion and never reused, so a handle stays valid for the lifetime of
/// the mesh that issued it. Grids allocate cells row-major, which makes the
/// handle equal to the linear index `col + row * width`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub usize);

impl CellId {
    /// The arena slot as a plain index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<usize> for CellId {
    fn from(v: usize) -> Self {
        Self(v)
    }
}
