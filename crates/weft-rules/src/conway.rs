//! Conway's Game of Life.
//!
//! Each tick a cell counts its live neighbours, classifies that count into
//! an [`Environment`], and stages its next [`CellState`]:
//!
//! | neighbours alive | environment | dead cell | live cell |
//! |------------------|-------------|-----------|-----------|
//! | 2                | Support     | stays dead | survives |
//! | 3                | Birth       | is born   | survives  |
//! | anything else    | Dead        | stays dead | dies     |
//!
//! The neighbourhood is whatever the grid subscribed, so on a 4-connected
//! grid the live-neighbour count ranges over 0..=4.

use std::fmt;

use weft_core::{Behavior, ExecError, StepContext};

/// State of one Conway cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    /// Not alive. The initial state of every grid cell.
    #[default]
    Dead,
    /// Alive.
    Alive,
}

impl CellState {
    /// Whether the cell is alive.
    pub fn is_alive(self) -> bool {
        self == Self::Alive
    }

    /// The state after one tick in `environment`.
    pub fn next(self, environment: Environment) -> Self {
        match (self, environment) {
            (Self::Alive, Environment::Support | Environment::Birth) => Self::Alive,
            (Self::Dead, Environment::Birth) => Self::Alive,
            _ => Self::Dead,
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            Self::Alive
        } else {
            Self::Dead
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dead => "dead",
            Self::Alive => "alive",
        })
    }
}

/// Classification of a cell's neighbourhood.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Too few or too many live neighbours.
    Dead,
    /// Exactly two live neighbours: a live cell survives.
    Support,
    /// Exactly three live neighbours: a dead cell is born, a live one survives.
    Birth,
}

impl Environment {
    /// Classify a live-neighbour count.
    pub fn classify(alive: usize) -> Self {
        match alive {
            2 => Self::Support,
            3 => Self::Birth,
            _ => Self::Dead,
        }
    }
}

/// The Conway rule as a cell behaviour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Conway;

impl Behavior<CellState> for Conway {
    fn name(&self) -> &str {
        "conway"
    }

    fn exec(&self, ctx: &mut StepContext<'_, CellState>) -> Result<(), ExecError> {
        let cell = ctx.cell();
        let alive = ctx
            .neighbor_values()
            .map_err(|reason| ExecError::EnvironmentCollection { cell, reason })?
            .into_iter()
            .filter(|s| s.is_alive())
            .count();
        let environment = Environment::classify(alive);
        let current = ctx
            .current()
            .map_err(|reason| ExecError::OwnState { cell, reason })?;
        ctx.stage(current.next(environment));
        Ok(())
    }
}

/// A grid factory that gives every cell a [`Conway`] behaviour.
///
/// ```
/// use weft_grid::{Grid, Topology};
/// use weft_rules::{conway_factory, CellState};
///
/// let grid = Grid::<CellState>::builder(4, 4)
///     .topology(Topology::Torus)
///     .behavior(conway_factory())
///     .build()
///     .unwrap();
/// assert_eq!(grid.cell(0, 0).unwrap().executor().name(), "conway");
/// ```
pub fn conway_factory() -> impl FnMut(usize, usize, usize, usize) -> Box<dyn Behavior<CellState>> {
    |_, _, _, _| -> Box<dyn Behavior<CellState>> { Box::new(Conway) }
}
