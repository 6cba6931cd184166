//! Rules for Weft grids.
//!
//! - [`conway`]: Conway's Game of Life on the 4-connected neighbourhoods a
//!   [`Grid`](weft_grid::Grid) wires up.
//! - [`soup`]: deterministic random fills and pattern placement for seeding
//!   a grid before the first generation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod conway;
pub mod soup;

pub use conway::{conway_factory, CellState, Conway, Environment};
pub use soup::{place, SeedError, Soup, BLOCK};
