//! Error types for cell wiring and behaviour execution.
//!
//! Every variant describes a programmer or wiring mistake. None of them is
//! transient: callers are expected to stop at the first error rather than
//! retry.

use std::error::Error;
use std::fmt;

use crate::id::CellId;

/// Errors arising from the cell graph itself: links, handles and
/// neighbourhoods.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellError {
    /// An executor was asked for its cell before being linked to one.
    Unlinked,
    /// Attempted to link a behaviour to a cell that does not exist.
    Linkage {
        /// The handle that did not resolve.
        cell: CellId,
    },
    /// A handle does not resolve to a cell of this mesh.
    UnknownCell {
        /// The offending handle.
        cell: CellId,
    },
    /// A cell's executor does not point back at the cell that owns it.
    BrokenLink {
        /// The cell whose executor is inconsistent.
        cell: CellId,
        /// Where the executor points instead (`None` if unlinked).
        linked: Option<CellId>,
    },
    /// A bounded neighbourhood is full.
    ///
    /// Reserved: neighbourhoods are currently unbounded and never produce
    /// this error.
    NeighborhoodCapacity {
        /// The neighbourhood's capacity.
        capacity: usize,
    },
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlinked => write!(f, "executor is not linked to a cell"),
            Self::Linkage { cell } => {
                write!(f, "cannot link executor to {cell}: no such cell")
            }
            Self::UnknownCell { cell } => write!(f, "unknown cell {cell}"),
            Self::BrokenLink { cell, linked } => match linked {
                Some(other) => write!(f, "executor of cell {cell} is linked to {other}"),
                None => write!(f, "executor of cell {cell} is unlinked"),
            },
            Self::NeighborhoodCapacity { capacity } => {
                write!(f, "neighbourhood is full (capacity {capacity})")
            }
        }
    }
}

impl Error for CellError {}

/// Errors from running a cell's behaviour during the compute pass.
///
/// Rules translate lower-level [`CellError`]s into the domain-specific
/// variants so callers can tell which phase of the rule failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecError {
    /// The cell graph rejected the operation before the behaviour ran.
    Cell(CellError),
    /// Collecting the committed states of the neighbourhood failed.
    EnvironmentCollection {
        /// The cell being evaluated.
        cell: CellId,
        /// The underlying wiring error.
        reason: CellError,
    },
    /// Reading the cell's own committed state failed.
    ///
    /// Only a rule that reads its own state before its neighbourhood can
    /// produce this. A handle that does not resolve has no neighbourhood
    /// either, so rules that collect neighbours first (Conway among them)
    /// fail with [`EnvironmentCollection`](Self::EnvironmentCollection)
    /// instead.
    OwnState {
        /// The cell being evaluated.
        cell: CellId,
        /// The underlying wiring error.
        reason: CellError,
    },
    /// A behaviour-specific failure.
    Failed {
        /// Name of the failing behaviour.
        behavior: String,
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cell(e) => write!(f, "{e}"),
            Self::EnvironmentCollection { cell, reason } => {
                write!(f, "cell {cell}: failed to collect environment: {reason}")
            }
            Self::OwnState { cell, reason } => {
                write!(f, "cell {cell}: failed to read own state: {reason}")
            }
            Self::Failed { behavior, reason } => {
                write!(f, "behaviour '{behavior}' failed: {reason}")
            }
        }
    }
}

impl Error for ExecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Cell(e) => Some(e),
            Self::EnvironmentCollection { reason, .. } | Self::OwnState { reason, .. } => {
                Some(reason)
            }
            Self::Failed { .. } => None,
        }
    }
}

impl From<CellError> for ExecError {
    fn from(e: CellError) -> Self {
        Self::Cell(e)
    }
}
