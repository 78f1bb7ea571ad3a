//! First-come-first-served seat allocation with distancing buffers.
//!
//! A request is served in priority order:
//!
//! 1. **Run search**: first-fit scan of usable rows for `quantity`
//!    consecutive free cells within a single row.
//! 2. **Assignment**: reserve the run, continuing onto the next usable row
//!    if the current one ends first.
//! 3. **Buffer**: block up to [`SEAT_BUFFER_WIDTH`] free cells after the
//!    last reserved seat.
//!
//! When no run exists but enough seats are free, the request is scattered
//! over the first free cells in row-major order and still gets a buffer.

use crate::error::{AllocationError, Result};
use crate::grid::SeatGrid;
use crate::labels::join_labels;
use seatplan_types::Seat;
use serde::{Deserialize, Serialize};

/// Cells blocked after each satisfied request
pub const SEAT_BUFFER_WIDTH: usize = 3;

/// Where a multi-row assignment resumes on the next usable row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContinuationMode {
    /// Resume at the column the run started in. Columns to the left of it
    /// on the next row are skipped.
    #[default]
    SameColumn,
    /// Resume at column 0
    RowStart,
}

/// Path a request took through the allocator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Contiguous,
    Scattered,
}

/// Outcome of a satisfied request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Reserved seats in reservation order
    pub seats: Vec<Seat>,
    /// Cells blocked as the trailing buffer
    pub buffer: Vec<Seat>,
    pub placement: Placement,
}

impl Reservation {
    /// Seat labels joined with `", "`
    pub fn labels(&self) -> String {
        join_labels(&self.seats)
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
}

/// Allocation engine owning the shared seat grid
#[derive(Debug, Clone, Default)]
pub struct Allocator {
    grid: SeatGrid,
    continuation: ContinuationMode,
}

impl Allocator {
    pub fn new(grid: SeatGrid) -> Self {
        Self {
            grid,
            continuation: ContinuationMode::default(),
        }
    }

    pub fn with_continuation(mut self, continuation: ContinuationMode) -> Self {
        self.continuation = continuation;
        self
    }

    pub fn grid(&self) -> &SeatGrid {
        &self.grid
    }

    pub fn into_grid(self) -> SeatGrid {
        self.grid
    }

    pub fn continuation(&self) -> ContinuationMode {
        self.continuation
    }

    pub fn available_seats(&self) -> usize {
        self.grid.available_seats()
    }

    /// Serve a request given as raw text, e.g. the quantity column of an
    /// input line.
    pub fn request_seats(&mut self, input: &str) -> Result<Reservation> {
        let quantity = parse_quantity(input)?;
        self.reserve(quantity)
    }

    /// Serve a request for `quantity` seats.
    ///
    /// Either exactly `quantity` seats are reserved or the grid is left
    /// untouched.
    pub fn reserve(&mut self, quantity: usize) -> Result<Reservation> {
        if quantity == 0 {
            return Err(AllocationError::MalformedRequest {
                input: quantity.to_string(),
            });
        }

        let available = self.grid.available_seats();
        if quantity > available {
            tracing::warn!(
                "Rejected request for {} seats ({} available)",
                quantity,
                available
            );
            return Err(AllocationError::InsufficientCapacity {
                requested: quantity,
                available,
            });
        }

        if let Some(start) = self.find_run(quantity) {
            tracing::debug!(
                "Found run of {} at ({}, {})",
                quantity,
                start.row,
                start.col
            );
            let seats = self.assign(start, quantity)?;
            let buffer = match seats.last() {
                Some(last) => self.add_buffer(*last),
                None => Vec::new(),
            };
            return Ok(Reservation {
                seats,
                buffer,
                placement: Placement::Contiguous,
            });
        }

        tracing::debug!("No run of {} seats, scattering", quantity);
        self.fill_remaining(quantity)
    }

    /// First-fit search for `quantity` consecutive free cells in one usable
    /// row. Returns the first cell of the run.
    pub fn find_run(&self, quantity: usize) -> Option<Seat> {
        if quantity == 0 {
            return None;
        }

        for row in self.grid.usable_rows() {
            let mut run = 0;
            let mut start_col = 0;
            for col in 0..self.grid.cols() {
                if self.grid.is_free(row, col) {
                    if run == 0 {
                        start_col = col;
                    }
                    run += 1;
                    if run == quantity {
                        return Some(Seat::new(row, start_col));
                    }
                } else {
                    run = 0;
                }
            }
        }
        None
    }

    /// Reserve `quantity` cells starting at `start`, filling left to right
    /// and continuing on the next usable row per the continuation mode.
    ///
    /// Every target cell is checked before the first one is mutated.
    pub fn assign(&mut self, start: Seat, quantity: usize) -> Result<Vec<Seat>> {
        if self.grid.state(start.row, start.col).is_none() {
            return Err(AllocationError::OutOfBounds {
                row: start.row,
                col: start.col,
                rows: self.grid.rows(),
                cols: self.grid.cols(),
            });
        }

        let cols = self.grid.cols();
        let mut planned = Vec::with_capacity(quantity);
        let mut row = start.row;
        let mut col = start.col;

        'rows: while row < self.grid.rows() && planned.len() < quantity {
            for c in col..cols {
                if let Some(state) = self.grid.state(row, c).filter(|s| !s.is_free()) {
                    return Err(AllocationError::InvalidCellState { row, col: c, state });
                }
                planned.push(Seat::new(row, c));
                if planned.len() == quantity {
                    break 'rows;
                }
            }
            row += self.grid.stride();
            col = match self.continuation {
                ContinuationMode::SameColumn => start.col,
                ContinuationMode::RowStart => 0,
            };
        }

        if planned.len() < quantity {
            return Err(AllocationError::InsufficientCapacity {
                requested: quantity,
                available: planned.len(),
            });
        }

        for seat in &planned {
            self.grid.mark_reserved(seat.row, seat.col)?;
        }
        Ok(planned)
    }

    /// Block up to [`SEAT_BUFFER_WIDTH`] free cells after `last`.
    ///
    /// Starts right of `last` (or at column 0 of the next row when `last` is
    /// in the final column) and never continues past the end of that row.
    /// Non-free cells are skipped without counting toward the quota.
    pub fn add_buffer(&mut self, last: Seat) -> Vec<Seat> {
        let (row, col) = if last.col + 1 < self.grid.cols() {
            (last.row, last.col + 1)
        } else {
            (last.row + 1, 0)
        };

        let mut blocked = Vec::with_capacity(SEAT_BUFFER_WIDTH);
        if row >= self.grid.rows() {
            return blocked;
        }

        for c in col..self.grid.cols() {
            if blocked.len() == SEAT_BUFFER_WIDTH {
                break;
            }
            if self.grid.mark_blocked(row, c).is_ok() {
                blocked.push(Seat::new(row, c));
            }
        }

        tracing::debug!(
            "Blocked {} buffer cells after ({}, {})",
            blocked.len(),
            last.row,
            last.col
        );
        blocked
    }

    /// Scatter `quantity` seats over the first free cells of the usable
    /// rows, then add a buffer after the last one.
    pub fn fill_remaining(&mut self, quantity: usize) -> Result<Reservation> {
        let cols = self.grid.cols();
        let seats: Vec<Seat> = self
            .grid
            .usable_rows()
            .flat_map(|row| (0..cols).map(move |col| Seat::new(row, col)))
            .filter(|seat| self.grid.is_free(seat.row, seat.col))
            .take(quantity)
            .collect();

        if seats.len() < quantity {
            return Err(AllocationError::InsufficientCapacity {
                requested: quantity,
                available: self.grid.available_seats(),
            });
        }

        for seat in &seats {
            self.grid.mark_reserved(seat.row, seat.col)?;
        }

        let buffer = match seats.last() {
            Some(last) => self.add_buffer(*last),
            None => Vec::new(),
        };

        Ok(Reservation {
            seats,
            buffer,
            placement: Placement::Scattered,
        })
    }
}

/// Parse a request quantity, rejecting anything that is not a positive
/// integer.
pub fn parse_quantity(input: &str) -> Result<usize> {
    let malformed = || AllocationError::MalformedRequest {
        input: input.to_string(),
    };
    let value: i64 = input.parse().map_err(|_| malformed())?;
    if value <= 0 {
        return Err(malformed());
    }
    usize::try_from(value).map_err(|_| malformed())
}
