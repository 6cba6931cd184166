//! Execution context handed to a behaviour during the compute pass.
//!
//! [`StepContext`] splits the borrow the same way for every behaviour:
//! shared, committed-only reads over the whole mesh, and a private write
//! slot for the evaluated cell's proposal. The mesh applies the proposal
//! to the cell's [`Value`](crate::Value) after the behaviour returns.

use crate::error::CellError;
use crate::id::CellId;
use crate::mesh::Mesh;
use crate::neighborhood::Neighborhood;

/// Execution context passed to [`Behavior::exec`](crate::Behavior::exec).
///
/// No method exposes another cell's staged value: reads always go through
/// the committed slot.
pub struct StepContext<'a, T> {
    mesh: &'a Mesh<T>,
    cell: CellId,
    staged: Option<T>,
}

impl<'a, T> StepContext<'a, T> {
    /// Construct a context evaluating `cell` against `mesh`.
    ///
    /// Typically built by [`Executor::exec`](crate::Executor::exec). Tests
    /// may build one directly, including for a handle that does not
    /// resolve, to exercise a rule's failure paths.
    pub fn new(mesh: &'a Mesh<T>, cell: CellId) -> Self {
        Self {
            mesh,
            cell,
            staged: None,
        }
    }

    /// The cell being evaluated.
    pub fn cell(&self) -> CellId {
        self.cell
    }

    /// The evaluated cell's neighbourhood.
    pub fn neighborhood(&self) -> Result<&'a Neighborhood, CellError> {
        self.mesh
            .cell(self.cell)
            .map(|c| c.neighborhood())
            .ok_or(CellError::UnknownCell { cell: self.cell })
    }

    /// Propose the next value for the evaluated cell. Replaces any earlier
    /// proposal made during this call.
    pub fn stage(&mut self, value: T) {
        self.staged = Some(value);
    }

    /// The proposal made so far, if any.
    pub fn staged(&self) -> Option<&T> {
        self.staged.as_ref()
    }

    /// Consume the context, yielding the proposal.
    pub fn into_staged(self) -> Option<T> {
        self.staged
    }
}

impl<T: Clone> StepContext<'_, T> {
    /// Committed value of the evaluated cell.
    pub fn current(&self) -> Result<T, CellError> {
        self.mesh.get(self.cell)
    }

    /// Committed value of any cell in the mesh.
    pub fn read(&self, cell: CellId) -> Result<T, CellError> {
        self.mesh.get(cell)
    }

    /// Committed values of every neighbour, in subscription order.
    ///
    /// Fails on the first handle that does not resolve.
    pub fn neighbor_values(&self) -> Result<Vec<T>, CellError> {
        self.neighborhood()?
            .map(|id| self.mesh.get(id))
            .into_iter()
            .collect()
    }
}
