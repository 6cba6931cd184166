//! Rectangular topologies for Weft meshes.
//!
//! [`Grid`] owns a row-major [`Mesh`](weft_core::Mesh) of `width * height`
//! cells and wires each cell to its four axis-aligned neighbours under a
//! [`Topology`]:
//!
//! - [`Topology::Raw`]: bounded, out-of-range neighbours are omitted
//!   (corners have 2 neighbours, edges 3, interior 4).
//! - [`Topology::Torus`]: wraparound on both axes, every cell has exactly 4
//!   neighbours (self-adjacency on axes of length 1 or 2).
//!
//! The pure index arithmetic lives in [`topology`] and can be used without
//! building a grid.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod grid;
pub mod topology;

#[cfg(test)]
pub(crate) mod compliance;

pub use config::GridConfig;
pub use error::GridError;
pub use grid::{BehaviorFactory, Grid, GridBuilder};
pub use topology::Topology;
