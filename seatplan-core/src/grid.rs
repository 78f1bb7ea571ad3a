//! Seat grid model: cell states, row stride and the available-seat counter.

use crate::error::{AllocationError, Result};
use seatplan_types::{CellState, Seat};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of grid rows
pub const DEFAULT_ROWS: usize = 10;

/// Default number of grid columns
pub const DEFAULT_COLS: usize = 20;

/// Number of blocked rows between two usable rows
pub const SAFETY_ROW_WIDTH: usize = 1;

/// Rectangular grid of seat cells.
///
/// Rows `0, stride, 2 * stride, ...` are usable and start out free; every
/// other row is a safety row and starts out blocked. The grid is never
/// resized; cells only ever move away from `Free`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatGrid {
    rows: usize,
    cols: usize,
    stride: usize,
    cells: Vec<CellState>,
    available: usize,
}

impl SeatGrid {
    /// Build a grid with the given dimensions and safety-row width
    pub fn new(rows: usize, cols: usize, safety_row_width: usize) -> Self {
        let stride = safety_row_width + 1;
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            let state = if row % stride == 0 {
                CellState::Free
            } else {
                CellState::Blocked
            };
            cells.extend(std::iter::repeat(state).take(cols));
        }

        let safety_rows = (0..rows).filter(|row| row % stride != 0).count();
        let available = rows * cols - safety_rows * cols;

        tracing::debug!(
            "Initialized {}x{} grid (stride {}, {} seats available)",
            rows,
            cols,
            stride,
            available
        );

        Self {
            rows,
            cols,
            stride,
            cells,
            available,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Distance between two consecutive usable rows
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn total_seats(&self) -> usize {
        self.rows * self.cols
    }

    /// Number of `Free` cells, tracked incrementally
    pub fn available_seats(&self) -> usize {
        self.available
    }

    pub fn is_usable_row(&self, row: usize) -> bool {
        row < self.rows && row % self.stride == 0
    }

    /// Usable row indices in ascending order
    pub fn usable_rows(&self) -> impl Iterator<Item = usize> {
        (0..self.rows).step_by(self.stride)
    }

    /// State of a cell, or `None` outside the grid
    pub fn state(&self, row: usize, col: usize) -> Option<CellState> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    pub fn is_free(&self, row: usize, col: usize) -> bool {
        self.state(row, col).is_some_and(|state| state.is_free())
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: usize) -> Option<&[CellState]> {
        if row < self.rows {
            let start = row * self.cols;
            Some(&self.cells[start..start + self.cols])
        } else {
            None
        }
    }

    pub fn mark_reserved(&mut self, row: usize, col: usize) -> Result<()> {
        self.transition(row, col, CellState::Reserved)
    }

    pub fn mark_blocked(&mut self, row: usize, col: usize) -> Result<()> {
        self.transition(row, col, CellState::Blocked)
    }

    /// Recount free cells by scanning the whole grid.
    ///
    /// Always equal to [`SeatGrid::available_seats`].
    pub fn count_free(&self) -> usize {
        self.cells.iter().filter(|state| state.is_free()).count()
    }

    /// Serializable view of the grid for diagnostics
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            rows: self.rows,
            cols: self.cols,
            total_seats: self.total_seats(),
            available_seats: self.available,
            cells: self
                .cells
                .chunks(self.cols.max(1))
                .map(|row| row.iter().map(CellState::code).collect())
                .collect(),
        }
    }

    fn transition(&mut self, row: usize, col: usize, next: CellState) -> Result<()> {
        let idx = self.index(row, col).ok_or(AllocationError::OutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        })?;

        let current = self.cells[idx];
        if !current.is_free() {
            return Err(AllocationError::InvalidCellState {
                row,
                col,
                state: current,
            });
        }

        self.cells[idx] = next;
        self.available -= 1;
        Ok(())
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }
}

impl Default for SeatGrid {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS, SAFETY_ROW_WIDTH)
    }
}

/// Renders one `[c0, c1, ...]` line of integer codes per row
impl fmt::Display for SeatGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let start = row * self.cols;
            let codes: Vec<String> = self.cells[start..start + self.cols]
                .iter()
                .map(|state| state.code().to_string())
                .collect();
            writeln!(f, "[{}]", codes.join(", "))?;
        }
        Ok(())
    }
}

/// Grid state dump with its counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub total_seats: usize,
    pub available_seats: usize,
    pub cells: Vec<Vec<u8>>,
}

impl GridSnapshot {
    /// Cell state at (row, col), decoded from the stored code
    pub fn state(&self, seat: Seat) -> Option<CellState> {
        self.cells
            .get(seat.row)
            .and_then(|row| row.get(seat.col))
            .and_then(|code| CellState::from_code(*code))
    }
}
