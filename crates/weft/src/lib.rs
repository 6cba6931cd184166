//! Weft: a graph-based synchronous cellular simulation engine.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Weft sub-crates. For most users, adding `weft` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use weft::prelude::*;
//!
//! // An 8x8 torus of Conway cells with a block in the middle.
//! let mut grid = Grid::<CellState>::builder(8, 8)
//!     .topology(Topology::Torus)
//!     .behavior(conway_factory())
//!     .build()
//!     .unwrap();
//! weft::rules::place(&mut grid, (3, 3), weft::rules::BLOCK).unwrap();
//!
//! // One generation: compute every cell, then commit every cell.
//! let ids: Vec<CellId> = grid.ids().collect();
//! for &id in &ids {
//!     grid.exec(id).unwrap();
//! }
//! for &id in &ids {
//!     grid.commit(id).unwrap();
//! }
//! assert_eq!(grid.get(3, 3), Ok(CellState::Alive));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`cells`] | `weft-core` | Values, neighbourhoods, behaviours, cells, the mesh arena, diagnostics |
//! | [`grid`] | `weft-grid` | Raw and torus topologies, grid builder and config |
//! | [`rules`] | `weft-rules` | Conway's Game of Life and seeding helpers |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core primitives (`weft-core`).
///
/// Contains [`cells::Value`], [`cells::Neighborhood`], the
/// [`cells::Behavior`] trait, [`cells::Mesh`] and the diagnostic sinks.
pub use weft_core as cells;

/// Rectangular topologies (`weft-grid`).
///
/// [`grid::Grid`] wires a mesh into a raw or toroidal lattice;
/// [`grid::topology`] exposes the index arithmetic on its own.
pub use weft_grid as grid;

/// Rules layered on the core (`weft-rules`).
///
/// [`rules::Conway`] and the seeding helpers [`rules::Soup`] and
/// [`rules::place`].
pub use weft_rules as rules;

/// Common imports for typical Weft usage.
///
/// ```rust
/// use weft::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use weft_core::{Behavior, CellId, Mesh, StepContext, Value};

    // Diagnostics
    pub use weft_core::{DiagnosticSink, Level, NullSink, TracingSink};

    // Errors
    pub use weft_core::{CellError, ExecError};
    pub use weft_grid::GridError;
    pub use weft_rules::SeedError;

    // Grid
    pub use weft_grid::{Grid, GridConfig, Topology};

    // Rules
    pub use weft_rules::{conway_factory, CellState, Conway, Soup};
}
