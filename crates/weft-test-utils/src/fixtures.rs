//! Reusable behaviour fixtures.
//!
//! - [`NeighborCount`]: stages the number of subscribed neighbours.
//! - [`Constant`]: stages a fixed value, reading nothing.
//! - [`Failing`]: fails deterministically after N successful calls.
//! - [`NeighborSum`]: stages the sum of the neighbours' committed values.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use weft_core::{Behavior, ExecError, StepContext};

/// Stages the size of the cell's neighbourhood.
///
/// Useful for checking topology wiring through the normal exec/commit
/// path rather than by inspecting neighbourhoods directly.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeighborCount;

impl Behavior<usize> for NeighborCount {
    fn name(&self) -> &str {
        "neighbor-count"
    }

    fn exec(&self, ctx: &mut StepContext<'_, usize>) -> Result<(), ExecError> {
        let n = ctx.neighborhood()?.size();
        ctx.stage(n);
        Ok(())
    }
}

/// Stages a constant on every call.
pub struct Constant<T> {
    pub value: T,
}

impl<T> Constant<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Clone + 'static> Behavior<T> for Constant<T> {
    fn name(&self) -> &str {
        "constant"
    }

    fn exec(&self, ctx: &mut StepContext<'_, T>) -> Result<(), ExecError> {
        ctx.stage(self.value.clone());
        Ok(())
    }
}

/// Fails after a configurable number of successful calls.
///
/// Successful calls stage nothing. The call counter is shared, so a test
/// can keep a [`counter`](Self::counter) handle after the behaviour has
/// been boxed into a mesh.
pub struct Failing {
    pub succeed_count: usize,
    calls: Arc<AtomicUsize>,
}

impl Failing {
    /// Create a behaviour that succeeds `succeed_count` times then fails.
    pub fn new(succeed_count: usize) -> Self {
        Self {
            succeed_count,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many times `exec()` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    /// Shared handle to the call counter.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl<T> Behavior<T> for Failing {
    fn name(&self) -> &str {
        "failing"
    }

    fn exec(&self, _ctx: &mut StepContext<'_, T>) -> Result<(), ExecError> {
        let n = self.calls.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(ExecError::Failed {
                behavior: "failing".into(),
                reason: format!(
                    "deliberate failure after {} successful calls",
                    self.succeed_count
                ),
            });
        }
        Ok(())
    }
}

/// Stages the sum of the neighbours' committed values.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeighborSum;

impl Behavior<i64> for NeighborSum {
    fn name(&self) -> &str {
        "neighbor-sum"
    }

    fn exec(&self, ctx: &mut StepContext<'_, i64>) -> Result<(), ExecError> {
        let total = ctx.neighbor_values()?.into_iter().sum();
        ctx.stage(total);
        Ok(())
    }
}
