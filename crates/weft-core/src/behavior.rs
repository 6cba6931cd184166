//! The [`Behavior`] trait and the [`Executor`] that links it to a cell.
//!
//! Behaviours are the open extension point of the engine: any rule, not
//! only Conway's, is added by implementing [`Behavior::exec`]. A behaviour
//! reads committed values through its [`StepContext`] and writes only its
//! own cell's staged slot.

use crate::context::StepContext;
use crate::error::{CellError, ExecError};
use crate::id::CellId;
use crate::mesh::Mesh;
use std::fmt;

/// Per-cell update logic, invoked once per generation.
///
/// # Contract
///
/// - `exec()` reads only committed values (own and neighbours') and writes
///   only through [`StepContext::stage`]. It never commits.
/// - `&self`: behaviours are stateless between calls; state that must
///   persist belongs in the cell's [`Value`](crate::Value).
///
/// # Examples
///
/// A behaviour that stages the number of neighbours:
///
/// ```
/// use weft_core::{Behavior, ExecError, Mesh, StepContext};
///
/// struct Degree;
///
/// impl Behavior<usize> for Degree {
///     fn name(&self) -> &str { "degree" }
///
///     fn exec(&self, ctx: &mut StepContext<'_, usize>) -> Result<(), ExecError> {
///         let n = ctx.neighborhood()?.size();
///         ctx.stage(n);
///         Ok(())
///     }
/// }
///
/// let mut mesh: Mesh<usize> = Mesh::new();
/// let a = mesh.insert(0, Box::new(Degree));
/// mesh.subscribe(a, a).unwrap();
/// mesh.exec(a).unwrap();
/// mesh.commit(a).unwrap();
/// assert_eq!(mesh.get(a).unwrap(), 1);
/// ```
pub trait Behavior<T> {
    /// Human-readable name for diagnostics and error reporting.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Propose the cell's next value. The default does nothing, leaving the
    /// cell unchanged at commit.
    fn exec(&self, ctx: &mut StepContext<'_, T>) -> Result<(), ExecError> {
        let _ = ctx;
        Ok(())
    }
}

/// The no-op behaviour given to cells that never change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Idle;

impl<T> Behavior<T> for Idle {
    fn name(&self) -> &str {
        "idle"
    }
}

/// A behaviour backed by a closure. Built with [`from_fn`].
pub struct FnBehavior<F> {
    name: String,
    f: F,
}

/// Wrap a closure as a [`Behavior`].
///
/// Handy for per-cell rules produced by a grid factory without declaring a
/// type for each of them.
pub fn from_fn<T, F>(name: impl Into<String>, f: F) -> FnBehavior<F>
where
    F: Fn(&mut StepContext<'_, T>) -> Result<(), ExecError> + 'static,
{
    FnBehavior {
        name: name.into(),
        f,
    }
}

impl<T, F> Behavior<T> for FnBehavior<F>
where
    F: Fn(&mut StepContext<'_, T>) -> Result<(), ExecError> + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn exec(&self, ctx: &mut StepContext<'_, T>) -> Result<(), ExecError> {
        (self.f)(ctx)
    }
}

/// A behaviour together with its back-reference to the owning cell.
///
/// The link is a [`CellId`] rather than a pointer, so it stays valid when
/// the owning mesh moves. It is set by the mesh when the behaviour is
/// attached; an executor built by hand starts unlinked and refuses to run.
pub struct Executor<T> {
    behavior: Box<dyn Behavior<T>>,
    cell: Option<CellId>,
}

impl<T> Executor<T> {
    /// Wrap a behaviour. The executor starts unlinked.
    pub fn new(behavior: Box<dyn Behavior<T>>) -> Self {
        Self {
            behavior,
            cell: None,
        }
    }

    /// An unlinked executor running [`Idle`].
    pub fn idle() -> Self {
        Self::new(Box::new(Idle))
    }

    /// The cell this executor is linked to.
    pub fn cell(&self) -> Result<CellId, CellError> {
        self.cell.ok_or(CellError::Unlinked)
    }

    /// Whether [`cell`](Self::cell) would succeed.
    pub fn is_linked(&self) -> bool {
        self.cell.is_some()
    }

    /// The wrapped behaviour.
    pub fn behavior(&self) -> &dyn Behavior<T> {
        self.behavior.as_ref()
    }

    /// Name of the wrapped behaviour.
    pub fn name(&self) -> &str {
        self.behavior.name()
    }

    /// Bind to `cell`, replacing any earlier binding. The mesh checks that
    /// the handle resolves before calling this.
    pub(crate) fn link(&mut self, cell: CellId) {
        self.cell = Some(cell);
    }

    /// Swap the behaviour, keeping the link. Returns the previous one.
    pub(crate) fn replace(&mut self, behavior: Box<dyn Behavior<T>>) -> Box<dyn Behavior<T>> {
        std::mem::replace(&mut self.behavior, behavior)
    }
}

impl<T: Clone> Executor<T> {
    /// Run the behaviour against the committed state of `mesh`.
    ///
    /// Returns the value the behaviour staged, if any. The caller decides
    /// where the proposal goes; [`Mesh::exec`] stages it on the linked cell.
    pub fn exec(&self, mesh: &Mesh<T>) -> Result<Option<T>, ExecError> {
        let cell = self.cell()?;
        let mut ctx = StepContext::new(mesh, cell);
        self.behavior.exec(&mut ctx)?;
        Ok(ctx.into_staged())
    }
}

impl<T> fmt::Debug for Executor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor")
            .field("behavior", &self.behavior.name())
            .field("cell", &self.cell)
            .finish()
    }
}
