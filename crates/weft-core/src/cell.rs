//! The composite cell: one value, one neighbourhood, one executor.

use crate::behavior::{Behavior, Executor};
use crate::neighborhood::Neighborhood;
use crate::value::Value;

/// A graph node holding a value, its neighbours and its behaviour.
///
/// The three delegates are created together and dropped together. Cells
/// only exist inside a [`Mesh`](crate::Mesh), which owns them and assigns
/// their identity; the executor's back-reference is the mesh handle.
///
/// There is no setter for any delegate. The value and neighbourhood are
/// changed through their own operations; the behaviour is swapped through
/// [`Mesh::attach`](crate::Mesh::attach), which relinks it.
#[derive(Debug)]
pub struct Cell<T> {
    value: Value<T>,
    neighborhood: Neighborhood,
    executor: Executor<T>,
}

impl<T> Cell<T> {
    /// Allocate an unlinked shell. The mesh links the executor right after.
    pub(crate) fn shell(initial: T, behavior: Box<dyn Behavior<T>>) -> Self {
        Self {
            value: Value::new(initial),
            neighborhood: Neighborhood::new(),
            executor: Executor::new(behavior),
        }
    }

    /// The value delegate.
    pub fn value(&self) -> &Value<T> {
        &self.value
    }

    /// Mutable access to the value delegate, for staging and committing.
    pub fn value_mut(&mut self) -> &mut Value<T> {
        &mut self.value
    }

    /// The neighbourhood delegate.
    pub fn neighborhood(&self) -> &Neighborhood {
        &self.neighborhood
    }

    /// Mutable access to the neighbourhood delegate.
    ///
    /// Handles subscribed through here are not checked against the mesh;
    /// prefer [`Mesh::subscribe`](crate::Mesh::subscribe).
    pub fn neighborhood_mut(&mut self) -> &mut Neighborhood {
        &mut self.neighborhood
    }

    /// The executor delegate.
    pub fn executor(&self) -> &Executor<T> {
        &self.executor
    }

    /// The behaviour the executor runs.
    pub fn behavior(&self) -> &dyn Behavior<T> {
        self.executor.behavior()
    }

    pub(crate) fn executor_mut(&mut self) -> &mut Executor<T> {
        &mut self.executor
    }
}
