//! Allocation error types.

use seatplan_types::CellState;

/// Errors that can occur while serving a seat request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    #[error("Malformed request: {input:?}")]
    MalformedRequest { input: String },

    #[error("Requested {requested} seats but only {available} are available")]
    InsufficientCapacity { requested: usize, available: usize },

    #[error("Cell ({row}, {col}) is {state}, expected free")]
    InvalidCellState {
        row: usize,
        col: usize,
        state: CellState,
    },

    #[error("Cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

impl AllocationError {
    /// Per-request outcomes that leave the grid untouched.
    ///
    /// `InvalidCellState` and `OutOfBounds` are not recoverable: they mean
    /// the caller's coordinate bookkeeping is wrong.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AllocationError::MalformedRequest { .. } | AllocationError::InsufficientCapacity { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AllocationError>;
