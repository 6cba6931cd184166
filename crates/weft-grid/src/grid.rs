//! Rectangular grids of cells.

use std::fmt;
use std::mem;
use std::sync::Arc;

use weft_core::{
    Behavior, Cell, CellError, CellId, DiagnosticSink, ExecError, Idle, Mesh, NullSink,
};

use crate::error::GridError;
use crate::topology::{self, Topology};

/// Per-cell behaviour factory: `(row, col, height, width) -> behaviour`.
///
/// Called once per cell, in row-major order, while the grid is built.
pub type BehaviorFactory<T> = Box<dyn FnMut(usize, usize, usize, usize) -> Box<dyn Behavior<T>>>;

/// Cell count of a `width x height` grid of `T`, or `None` if it does not
/// fit the signed offset range or exceeds what a `Vec` can address.
pub(crate) fn cell_count<T>(width: usize, height: usize) -> Option<usize> {
    let max = isize::MAX as usize / mem::size_of::<Cell<T>>().max(1);
    width
        .checked_mul(height)
        .filter(|&n| i64::try_from(n).is_ok() && n <= max)
}

/// A `width x height` mesh wired under a [`Topology`].
///
/// Cell `(row, col)` lives at [`CellId`] `col + row * width`. The set of
/// cells is fixed at build time.
///
/// # Examples
///
/// ```
/// use weft_grid::{Grid, Topology};
///
/// let grid: Grid<u8> = Grid::build(3, 3, Topology::Raw).unwrap();
/// let center = grid.cell(1, 1).unwrap();
/// assert_eq!(center.neighborhood().size(), 4);
/// assert_eq!(grid.mesh().subscription_count(), 24);
/// ```
pub struct Grid<T> {
    mesh: Mesh<T>,
    width: usize,
    height: usize,
    topology: Topology,
}

/// Builder for [`Grid`].
///
/// Defaults: [`Topology::Raw`], [`Idle`] behaviour everywhere, [`NullSink`].
pub struct GridBuilder<T> {
    width: usize,
    height: usize,
    topology: Topology,
    factory: Option<BehaviorFactory<T>>,
    sink: Arc<dyn DiagnosticSink>,
}

impl<T> GridBuilder<T> {
    /// Set the topology.
    pub fn topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    /// Set the per-cell behaviour factory.
    pub fn behavior<F>(mut self, factory: F) -> Self
    where
        F: FnMut(usize, usize, usize, usize) -> Box<dyn Behavior<T>> + 'static,
    {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Set the diagnostic sink the grid's mesh reports to.
    pub fn sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }
}

impl<T: Default> GridBuilder<T> {
    /// Build the grid.
    ///
    /// Cells are allocated row-major with `T::default()`, the mesh is
    /// validated, then every cell is subscribed to its resolved neighbours
    /// in up, down, left, right order.
    pub fn build(self) -> Result<Grid<T>, GridError> {
        let Self {
            width,
            height,
            topology,
            mut factory,
            sink,
        } = self;

        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid { width, height });
        }
        let too_large = GridError::DimensionTooLarge { width, height };
        let count = cell_count::<T>(width, height).ok_or_else(|| too_large.clone())?;

        let mut mesh = Mesh::with_sink(sink);
        mesh.try_reserve(count).map_err(|_| too_large)?;
        for row in 0..height {
            for col in 0..width {
                let behavior: Box<dyn Behavior<T>> = match factory.as_mut() {
                    Some(f) => f(row, col, height, width),
                    None => Box::new(Idle),
                };
                mesh.insert(T::default(), behavior);
            }
        }
        mesh.validate()?;

        for row in 0..height {
            for col in 0..width {
                let id = CellId(topology::cell_index(row, col, width));
                for n in topology::neighbor_indices(row, col, width, height, topology) {
                    mesh.subscribe(id, CellId(n))?;
                }
            }
        }

        Ok(Grid {
            mesh,
            width,
            height,
            topology,
        })
    }
}

impl<T> Grid<T> {
    /// Start building a `width x height` grid.
    pub fn builder(width: usize, height: usize) -> GridBuilder<T> {
        GridBuilder {
            width,
            height,
            topology: Topology::Raw,
            factory: None,
            sink: Arc::new(NullSink),
        }
    }

    /// Grid width (number of columns).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height (number of rows).
    pub fn height(&self) -> usize {
        self.height
    }

    /// The topology the grid was wired under.
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Number of cells, always `width * height`.
    pub fn len(&self) -> usize {
        self.mesh.len()
    }

    /// Always `false`: a built grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.mesh.is_empty()
    }

    /// The underlying mesh.
    pub fn mesh(&self) -> &Mesh<T> {
        &self.mesh
    }

    /// Handle of `(row, col)`, or `None` if out of range.
    pub fn id(&self, row: usize, col: usize) -> Option<CellId> {
        (row < self.height && col < self.width)
            .then(|| CellId(topology::cell_index(row, col, self.width)))
    }

    /// `(row, col)` of a handle, or `None` if it is not a cell of this grid.
    pub fn coords(&self, id: CellId) -> Option<(usize, usize)> {
        self.mesh
            .contains(id)
            .then(|| topology::coords(id.index(), self.width))
    }

    /// Borrow the cell at `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell<T>> {
        self.id(row, col).and_then(|id| self.mesh.cell(id))
    }

    /// Mutably borrow the cell at `(row, col)`.
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell<T>> {
        let id = self.id(row, col)?;
        self.mesh.cell_mut(id)
    }

    /// All handles, row-major.
    pub fn ids(&self) -> impl Iterator<Item = CellId> {
        self.mesh.ids()
    }

    /// Subscribe `neighbor` onto `cell`'s neighbourhood.
    pub fn subscribe(&mut self, cell: CellId, neighbor: CellId) -> Result<(), CellError> {
        self.mesh.subscribe(cell, neighbor)
    }

    /// Remove the first subscription of `neighbor` from `cell`.
    pub fn unsubscribe(&mut self, cell: CellId, neighbor: CellId) -> Result<bool, CellError> {
        self.mesh.unsubscribe(cell, neighbor)
    }

    /// Replace the behaviour of `id`. See [`Mesh::attach`].
    pub fn attach(
        &mut self,
        id: CellId,
        behavior: Box<dyn Behavior<T>>,
    ) -> Result<Box<dyn Behavior<T>>, CellError> {
        self.mesh.attach(id, behavior)
    }

    /// Re-run the mesh consistency check.
    pub fn validate(&self) -> Result<(), GridError> {
        Ok(self.mesh.validate()?)
    }

    fn checked_id(&self, row: usize, col: usize) -> Result<CellId, GridError> {
        self.id(row, col).ok_or(GridError::OutOfBounds {
            row,
            col,
            width: self.width,
            height: self.height,
        })
    }
}

impl<T: Default> Grid<T> {
    /// Build a grid of idle cells. Shorthand for the builder.
    pub fn build(width: usize, height: usize, topology: Topology) -> Result<Self, GridError> {
        Self::builder(width, height).topology(topology).build()
    }
}

impl<T: Clone> Grid<T> {
    /// Committed value at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<T, GridError> {
        let id = self.checked_id(row, col)?;
        Ok(self.mesh.get(id)?)
    }

    /// Committed values of every cell, row-major.
    pub fn snapshot(&self) -> Vec<T> {
        self.mesh.iter().map(|(_, c)| c.value().get()).collect()
    }

    /// Committed values grouped into rows.
    pub fn rows(&self) -> Vec<Vec<T>> {
        self.snapshot()
            .chunks(self.width)
            .map(<[T]>::to_vec)
            .collect()
    }
}

impl<T: Clone + fmt::Debug> Grid<T> {
    /// Compute step for one cell. See [`Mesh::exec`].
    pub fn exec(&mut self, id: CellId) -> Result<(), ExecError> {
        self.mesh.exec(id)
    }

    /// Commit step for one cell. See [`Mesh::commit`].
    pub fn commit(&mut self, id: CellId) -> Result<bool, CellError> {
        self.mesh.commit(id)
    }

    /// Seed `(row, col)` with `value`: stage and commit immediately.
    ///
    /// Meant for setting up state between generations. Calling it between
    /// the compute and commit passes discards that cell's proposal.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<(), GridError> {
        let id = self.checked_id(row, col)?;
        if let Some(cell) = self.mesh.cell_mut(id) {
            cell.value_mut().stage(value);
        }
        self.mesh.commit(id)?;
        Ok(())
    }
}

impl<T: fmt::Debug> fmt::Debug for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("topology", &self.topology)
            .field("mesh", &self.mesh)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_core::{from_fn, StepContext};

    #[test]
    fn zero_dimensions_rejected() {
        assert_eq!(
            Grid::<u8>::build(0, 3, Topology::Raw).err(),
            Some(GridError::EmptyGrid {
                width: 0,
                height: 3
            })
        );
        assert_eq!(
            Grid::<u8>::build(3, 0, Topology::Torus).err(),
            Some(GridError::EmptyGrid {
                width: 3,
                height: 0
            })
        );
    }

    #[test]
    fn overflowing_dimensions_rejected() {
        let err = Grid::<u8>::build(usize::MAX, 2, Topology::Raw).err();
        assert_eq!(
            err,
            Some(GridError::DimensionTooLarge {
                width: usize::MAX,
                height: 2
            })
        );
    }

    #[test]
    fn unallocatable_dimensions_rejected() {
        let side = 1usize << 31;
        assert_eq!(
            Grid::<u8>::build(side, side, Topology::Raw).err(),
            Some(GridError::DimensionTooLarge {
                width: side,
                height: side
            })
        );
        assert_eq!(cell_count::<u8>(side, side), None);
        assert_eq!(cell_count::<u8>(3, 4), Some(12));
    }

    #[test]
    fn ids_are_row_major() {
        let grid: Grid<u8> = Grid::build(4, 3, Topology::Raw).unwrap();
        assert_eq!(grid.len(), 12);
        assert_eq!(grid.id(0, 0), Some(CellId(0)));
        assert_eq!(grid.id(2, 3), Some(CellId(11)));
        assert_eq!(grid.id(3, 0), None);
        assert_eq!(grid.id(0, 4), None);
        assert_eq!(grid.coords(CellId(7)), Some((1, 3)));
        assert_eq!(grid.coords(CellId(12)), None);
    }

    #[test]
    fn neighbors_subscribed_in_order() {
        let grid: Grid<u8> = Grid::build(3, 3, Topology::Torus).unwrap();
        let n: Vec<_> = grid.cell(0, 0).unwrap().neighborhood().iter().collect();
        assert_eq!(n, vec![CellId(6), CellId(3), CellId(2), CellId(1)]);
    }

    #[test]
    fn factory_sees_coordinates_and_dimensions() {
        let grid = Grid::<usize>::builder(3, 2)
            .behavior(|row, col, height, width| {
                assert_eq!((height, width), (2, 3));
                let tag = col + row * width;
                Box::new(from_fn(
                    format!("tag-{tag}"),
                    move |ctx: &mut StepContext<'_, usize>| {
                        ctx.stage(tag);
                        Ok(())
                    },
                ))
            })
            .build()
            .unwrap();
        assert_eq!(grid.cell(1, 2).unwrap().executor().name(), "tag-5");
        for id in grid.ids() {
            assert_eq!(grid.mesh().cell(id).unwrap().executor().cell(), Ok(id));
        }
    }

    #[test]
    fn set_and_get() {
        let mut grid: Grid<i32> = Grid::build(2, 2, Topology::Raw).unwrap();
        grid.set(1, 0, 7).unwrap();
        assert_eq!(grid.get(1, 0), Ok(7));
        assert_eq!(grid.snapshot(), vec![0, 0, 7, 0]);
        assert_eq!(grid.rows(), vec![vec![0, 0], vec![7, 0]]);
        assert!(!grid.cell(1, 0).unwrap().value().is_staged());
    }

    #[test]
    fn out_of_bounds_access() {
        let mut grid: Grid<i32> = Grid::build(2, 2, Topology::Raw).unwrap();
        let oob = GridError::OutOfBounds {
            row: 2,
            col: 0,
            width: 2,
            height: 2,
        };
        assert_eq!(grid.get(2, 0), Err(oob.clone()));
        assert_eq!(grid.set(2, 0, 1), Err(oob));
        assert!(grid.cell(0, 2).is_none());
        assert!(grid.cell_mut(0, 2).is_none());
    }

    #[test]
    fn grid_survives_move() {
        let grid: Grid<u8> = Grid::build(5, 5, Topology::Torus).unwrap();
        let moved = vec![grid];
        assert_eq!(moved[0].validate(), Ok(()));
    }

    #[test]
    fn unsubscribe_restores_size() {
        let mut grid: Grid<u8> = Grid::build(3, 3, Topology::Raw).unwrap();
        let center = grid.id(1, 1).unwrap();
        let far = grid.id(2, 2).unwrap();
        grid.subscribe(center, far).unwrap();
        assert_eq!(grid.mesh().cell(center).unwrap().neighborhood().size(), 5);
        assert_eq!(grid.unsubscribe(center, far), Ok(true));
        assert_eq!(grid.mesh().cell(center).unwrap().neighborhood().size(), 4);
        assert_eq!(grid.unsubscribe(center, far), Ok(false));
    }
}
