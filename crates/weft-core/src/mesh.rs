//! The cell arena.
//!
//! [`Mesh`] owns every cell of a simulation in a flat `Vec`, and cells
//! refer to each other by [`CellId`]. Neighbour references therefore can
//! never outlive the cells they name: they are indices into the arena that
//! owns both ends, and cells are only ever dropped with the whole mesh.

use std::collections::TryReserveError;
use std::fmt;
use std::sync::Arc;

use crate::behavior::{Behavior, Idle};
use crate::cell::Cell;
use crate::diagnostics::{DiagnosticSink, Level, NullSink};
use crate::error::{CellError, ExecError};
use crate::id::CellId;

/// Owning container for a graph of cells.
///
/// # Generation contract
///
/// The mesh offers the two halves of a generation, one cell at a time:
/// [`exec`](Self::exec) (compute: run the behaviour, stage its proposal)
/// and [`commit`](Self::commit). A driver calls `exec` on every cell, then
/// `commit` on every cell. Interleaving the two within a generation lets a
/// later `exec` observe an earlier commit; the mesh does not detect this.
pub struct Mesh<T> {
    cells: Vec<Cell<T>>,
    sink: Arc<dyn DiagnosticSink>,
}

impl<T> Mesh<T> {
    /// An empty mesh reporting to [`NullSink`].
    pub fn new() -> Self {
        Self::with_sink(Arc::new(NullSink))
    }

    /// An empty mesh reporting to `sink`.
    pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            cells: Vec::new(),
            sink,
        }
    }

    /// An empty mesh with room for `capacity` cells, reporting to `sink`.
    pub fn with_capacity(capacity: usize, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
            sink,
        }
    }

    /// Reserve room for `additional` more cells.
    pub fn reserve(&mut self, additional: usize) {
        self.cells.reserve(additional);
    }

    /// Reserve room for `additional` more cells, reporting allocation
    /// failure instead of aborting.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.cells.try_reserve(additional)
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the mesh holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `id` names a cell of this mesh.
    pub fn contains(&self, id: CellId) -> bool {
        id.0 < self.cells.len()
    }

    /// Borrow a cell.
    pub fn cell(&self, id: CellId) -> Option<&Cell<T>> {
        self.cells.get(id.0)
    }

    /// Mutably borrow a cell.
    pub fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell<T>> {
        self.cells.get_mut(id.0)
    }

    /// All handles, in slot order.
    pub fn ids(&self) -> impl Iterator<Item = CellId> {
        (0..self.cells.len()).map(CellId)
    }

    /// All cells with their handles, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (CellId, &Cell<T>)> {
        self.cells.iter().enumerate().map(|(i, c)| (CellId(i), c))
    }

    /// The diagnostic sink this mesh reports to.
    pub fn sink(&self) -> &dyn DiagnosticSink {
        self.sink.as_ref()
    }

    /// Total neighbour entries over all cells, duplicates included.
    pub fn subscription_count(&self) -> usize {
        self.cells.iter().map(|c| c.neighborhood().size()).sum()
    }

    /// Insert a cell running `behavior`.
    ///
    /// Construction is two-step: the cell shell is allocated first, then
    /// the executor is linked to the new slot. [`validate`](Self::validate)
    /// checks the result.
    pub fn insert(&mut self, initial: T, behavior: Box<dyn Behavior<T>>) -> CellId {
        let id = CellId(self.cells.len());
        self.cells.push(Cell::shell(initial, behavior));
        let cell = &mut self.cells[id.0];
        cell.executor_mut().link(id);
        self.trace(Level::Debug, || {
            format!("cell {id} created ({})", self.cells[id.0].executor().name())
        });
        id
    }

    /// Insert a cell running [`Idle`].
    pub fn insert_idle(&mut self, initial: T) -> CellId {
        self.insert(initial, Box::new(Idle))
    }

    /// Replace the behaviour of `id` and link the new one to it.
    ///
    /// Returns the previous behaviour. Fails with
    /// [`CellError::Linkage`] if `id` does not name a cell of this mesh.
    pub fn attach(
        &mut self,
        id: CellId,
        behavior: Box<dyn Behavior<T>>,
    ) -> Result<Box<dyn Behavior<T>>, CellError> {
        let cell = self
            .cells
            .get_mut(id.0)
            .ok_or(CellError::Linkage { cell: id })?;
        let executor = cell.executor_mut();
        let previous = executor.replace(behavior);
        executor.link(id);
        self.trace(Level::Debug, || {
            format!(
                "cell {id}: behaviour '{}' replaced by '{}'",
                previous.name(),
                self.cells[id.0].executor().name()
            )
        });
        Ok(previous)
    }

    /// Subscribe `neighbor` onto the neighbourhood of `cell`.
    ///
    /// Both handles must belong to this mesh. Duplicates and self-loops are
    /// allowed.
    pub fn subscribe(&mut self, cell: CellId, neighbor: CellId) -> Result<(), CellError> {
        if !self.contains(neighbor) {
            return Err(CellError::UnknownCell { cell: neighbor });
        }
        self.cells
            .get_mut(cell.0)
            .ok_or(CellError::UnknownCell { cell })?
            .neighborhood_mut()
            .subscribe(neighbor);
        Ok(())
    }

    /// Remove the first subscription of `neighbor` from `cell`.
    ///
    /// Returns `Ok(false)` if `neighbor` was not subscribed.
    pub fn unsubscribe(&mut self, cell: CellId, neighbor: CellId) -> Result<bool, CellError> {
        Ok(self
            .cells
            .get_mut(cell.0)
            .ok_or(CellError::UnknownCell { cell })?
            .neighborhood_mut()
            .unsubscribe(neighbor))
    }

    /// Check that every executor points back at the cell that owns it, and
    /// that the value reached through the link is the cell's own.
    pub fn validate(&self) -> Result<(), CellError> {
        for (id, cell) in self.iter() {
            let linked = cell.executor().cell().ok();
            let target = linked.and_then(|l| self.cell(l));
            let consistent = linked == Some(id)
                && target.is_some_and(|t| std::ptr::eq(t.value(), cell.value()));
            if !consistent {
                return Err(CellError::BrokenLink { cell: id, linked });
            }
        }
        Ok(())
    }

    fn trace(&self, level: Level, message: impl FnOnce() -> String) {
        if self.sink.enabled(level) {
            self.sink.emit(level, format_args!("{}", message()));
        }
    }
}

impl<T: Clone> Mesh<T> {
    /// Committed value of `id`.
    pub fn get(&self, id: CellId) -> Result<T, CellError> {
        self.cells
            .get(id.0)
            .map(|c| c.value().get())
            .ok_or(CellError::UnknownCell { cell: id })
    }
}

impl<T: Clone + fmt::Debug> Mesh<T> {
    /// Compute step for one cell: run its behaviour against the committed
    /// state and stage the proposal, if any, on the cell's value.
    pub fn exec(&mut self, id: CellId) -> Result<(), ExecError> {
        let cell = self.cell(id).ok_or(CellError::UnknownCell { cell: id })?;
        let proposal = match cell.executor().exec(self) {
            Ok(p) => p,
            Err(e) => {
                self.trace(Level::Error, || format!("cell {id}: exec failed: {e}"));
                return Err(e);
            }
        };
        if let Some(next) = proposal {
            self.cells[id.0].value_mut().stage(next);
        }
        Ok(())
    }

    /// Commit step for one cell.
    ///
    /// Returns `Ok(true)` if a staged value was applied. Committing a cell
    /// with nothing staged is a no-op.
    pub fn commit(&mut self, id: CellId) -> Result<bool, CellError> {
        let cell = self
            .cells
            .get_mut(id.0)
            .ok_or(CellError::UnknownCell { cell: id })?;
        let value = cell.value_mut();
        let before = value.is_staged().then(|| value.get());
        let applied = value.commit();
        if let Some(before) = before {
            let after = value.current();
            if self.sink.enabled(Level::Debug) {
                self.sink.emit(
                    Level::Debug,
                    format_args!("cell {id}: {before:?} -> {after:?}"),
                );
            }
        }
        Ok(applied)
    }
}

impl<T> Default for Mesh<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Mesh<T> {
    fn drop(&mut self) {
        if !self.cells.is_empty() && self.sink.enabled(Level::Debug) {
            self.sink.emit(
                Level::Debug,
                format_args!("dropping mesh of {} cells", self.cells.len()),
            );
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Mesh<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mesh").field("cells", &self.cells).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::from_fn;
    use crate::context::StepContext;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Capture(Mutex<Vec<String>>);

    impl DiagnosticSink for Capture {
        fn emit(&self, _level: Level, message: fmt::Arguments<'_>) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    fn sum_neighbors() -> Box<dyn Behavior<i64>> {
        Box::new(from_fn("sum", |ctx: &mut StepContext<'_, i64>| {
            let total = ctx.neighbor_values()?.into_iter().sum();
            ctx.stage(total);
            Ok(())
        }))
    }

    #[test]
    fn insert_links_and_validates() {
        let mut mesh = Mesh::new();
        let a = mesh.insert_idle(0u8);
        let b = mesh.insert_idle(1u8);
        assert_eq!(a, CellId(0));
        assert_eq!(b, CellId(1));
        for (id, cell) in mesh.iter() {
            assert_eq!(cell.executor().cell(), Ok(id));
        }
        assert_eq!(mesh.validate(), Ok(()));
    }

    #[test]
    fn with_capacity_reports_to_sink() {
        let sink = Arc::new(Capture::default());
        let mut mesh = Mesh::with_capacity(4, sink.clone());
        assert!(mesh.is_empty());
        mesh.insert_idle('x');
        assert_eq!(mesh.len(), 1);
        assert!(mesh.sink().enabled(Level::Debug));
        assert_eq!(sink.0.lock().unwrap().len(), 1);
    }

    #[test]
    fn try_reserve_reports_capacity_overflow() {
        let mut mesh: Mesh<u8> = Mesh::new();
        assert!(mesh.try_reserve(usize::MAX).is_err());
        assert!(mesh.try_reserve(8).is_ok());
        assert!(mesh.is_empty());
    }

    #[test]
    fn links_survive_move() {
        let mut mesh = Mesh::new();
        for v in 0..16 {
            mesh.insert_idle(v);
        }
        let moved = Box::new(mesh);
        assert_eq!(moved.validate(), Ok(()));
        assert_eq!(moved.get(CellId(15)), Ok(15));
    }

    #[test]
    fn self_subscription_round_trip() {
        let mut mesh = Mesh::new();
        let a = mesh.insert_idle(6);
        mesh.subscribe(a, a).unwrap();
        let n = mesh.cell(a).unwrap().neighborhood();
        assert_eq!(n.size(), 1);
        assert_eq!(n.iter().collect::<Vec<_>>(), vec![a]);
        let plus_one = n.map(|c| mesh.get(c).unwrap() + 1);
        assert_eq!(plus_one, vec![7]);
        assert_eq!(mesh.unsubscribe(a, a), Ok(true));
        assert_eq!(mesh.cell(a).unwrap().neighborhood().size(), 0);
        assert_eq!(mesh.unsubscribe(a, a), Ok(false));
    }

    #[test]
    fn subscribe_rejects_foreign_handles() {
        let mut mesh = Mesh::new();
        let a = mesh.insert_idle(0);
        assert_eq!(
            mesh.subscribe(a, CellId(3)),
            Err(CellError::UnknownCell { cell: CellId(3) })
        );
        assert_eq!(
            mesh.subscribe(CellId(3), a),
            Err(CellError::UnknownCell { cell: CellId(3) })
        );
        assert_eq!(mesh.subscription_count(), 0);
    }

    #[test]
    fn attach_relinks_and_returns_previous() {
        let mut mesh = Mesh::new();
        let a = mesh.insert_idle(1i64);
        let previous = mesh.attach(a, sum_neighbors()).unwrap();
        assert_eq!(previous.name(), "idle");
        assert_eq!(mesh.cell(a).unwrap().executor().name(), "sum");
        assert_eq!(mesh.cell(a).unwrap().executor().cell(), Ok(a));
        assert_eq!(mesh.validate(), Ok(()));
    }

    #[test]
    fn attach_to_missing_cell_is_linkage_error() {
        let mut mesh: Mesh<i64> = Mesh::new();
        let err = mesh.attach(CellId(0), sum_neighbors()).err();
        assert_eq!(err, Some(CellError::Linkage { cell: CellId(0) }));
    }

    #[test]
    fn exec_stages_without_committing() {
        let mut mesh = Mesh::new();
        let a = mesh.insert(0i64, sum_neighbors());
        let b = mesh.insert_idle(2);
        let c = mesh.insert_idle(3);
        mesh.subscribe(a, b).unwrap();
        mesh.subscribe(a, c).unwrap();
        mesh.exec(a).unwrap();
        assert_eq!(mesh.get(a), Ok(0));
        assert_eq!(mesh.cell(a).unwrap().value().staged(), Some(&5));
        assert_eq!(mesh.commit(a), Ok(true));
        assert_eq!(mesh.get(a), Ok(5));
        assert_eq!(mesh.commit(a), Ok(false));
    }

    #[test]
    fn two_pass_is_order_independent() {
        // A ring of summing cells: each stages the sum of its two
        // neighbours' committed values.
        let build = || {
            let mut mesh = Mesh::new();
            let ids: Vec<_> = (1..=5).map(|v| mesh.insert(v, sum_neighbors())).collect();
            for (i, &id) in ids.iter().enumerate() {
                mesh.subscribe(id, ids[(i + 1) % 5]).unwrap();
                mesh.subscribe(id, ids[(i + 4) % 5]).unwrap();
            }
            mesh
        };
        let mut forward = build();
        let mut backward = build();
        let ids: Vec<_> = forward.ids().collect();
        for &id in &ids {
            forward.exec(id).unwrap();
        }
        for &id in ids.iter().rev() {
            backward.exec(id).unwrap();
        }
        for &id in &ids {
            forward.commit(id).unwrap();
            backward.commit(id).unwrap();
        }
        let a: Vec<_> = ids.iter().map(|&id| forward.get(id).unwrap()).collect();
        let b: Vec<_> = ids.iter().map(|&id| backward.get(id).unwrap()).collect();
        assert_eq!(a, vec![7, 4, 6, 8, 5]);
        assert_eq!(a, b);
    }

    #[test]
    fn exec_unknown_cell() {
        let mut mesh: Mesh<i64> = Mesh::new();
        assert_eq!(
            mesh.exec(CellId(0)),
            Err(ExecError::Cell(CellError::UnknownCell { cell: CellId(0) }))
        );
        assert_eq!(
            mesh.commit(CellId(0)),
            Err(CellError::UnknownCell { cell: CellId(0) })
        );
    }

    #[test]
    fn sink_sees_lifecycle_events() {
        let sink = Arc::new(Capture::default());
        {
            let mut mesh = Mesh::with_sink(sink.clone());
            let a = mesh.insert_idle(1);
            mesh.cell_mut(a).unwrap().value_mut().stage(2);
            mesh.commit(a).unwrap();
            mesh.commit(a).unwrap();
        }
        let log = sink.0.lock().unwrap().clone();
        assert_eq!(
            log,
            vec![
                "cell #0 created (idle)".to_string(),
                "cell #0: 1 -> 2".to_string(),
                "dropping mesh of 1 cells".to_string(),
            ]
        );
    }

    #[test]
    fn exec_failure_is_reported() {
        let sink = Arc::new(Capture::default());
        let mut mesh = Mesh::with_sink(sink.clone());
        let a = mesh.insert(0i64, sum_neighbors());
        mesh.cell_mut(a)
            .unwrap()
            .neighborhood_mut()
            .subscribe(CellId(9));
        let err = mesh.exec(a).unwrap_err();
        assert_eq!(err, ExecError::Cell(CellError::UnknownCell { cell: CellId(9) }));
        assert!(sink
            .0
            .lock()
            .unwrap()
            .iter()
            .any(|m| m.contains("exec failed")));
    }
}
