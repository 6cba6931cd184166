//! Core primitives for Weft meshes.
//!
//! This is the leaf crate of the workspace. It defines the pieces every
//! simulation is composed of:
//!
//! - [`Value`]: a two-slot (committed / staged) datum.
//! - [`Neighborhood`]: an ordered adjacency list of [`CellId`] handles.
//! - [`Behavior`] and [`Executor`]: pluggable per-cell update logic and the
//!   link that binds it to its cell.
//! - [`Cell`] and [`Mesh`]: the composite node and the arena that owns it.
//! - [`DiagnosticSink`]: the explicitly passed tracing capability.
//!
//! # Generation contract
//!
//! A generation is two caller-driven passes over a mesh: a compute pass
//! ([`Mesh::exec`] on every cell) followed by a commit pass
//! ([`Mesh::commit`] on every cell). Behaviours only ever read committed
//! values and only ever write their own staged slot, so the order of cells
//! within each pass does not affect the result. The mesh does not sequence
//! the passes itself.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod behavior;
pub mod cell;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod id;
pub mod mesh;
pub mod neighborhood;
pub mod value;

pub use behavior::{from_fn, Behavior, Executor, FnBehavior, Idle};
pub use cell::Cell;
pub use context::StepContext;
pub use diagnostics::{DiagnosticSink, Fanout, Filtered, Level, NullSink, TracingSink};
pub use error::{CellError, ExecError};
pub use id::CellId;
pub use mesh::Mesh;
pub use neighborhood::Neighborhood;
pub use value::Value;
