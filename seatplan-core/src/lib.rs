//! # seatplan-core
//!
//! Core library for the seatplan theater seat allocator.
//!
//! This crate owns the seat grid, the first-fit allocation strategy with
//! its distancing buffers, seat labeling, and batch processing of request
//! lines.

pub mod allocator;
pub mod batch;
pub mod config;
pub mod error;
pub mod grid;
pub mod labels;

pub use allocator::{
    parse_quantity, Allocator, ContinuationMode, Placement, Reservation, SEAT_BUFFER_WIDTH,
};
pub use batch::{
    BatchRecord, BatchReport, BatchRunner, BatchSummary, Outcome, RequestLine, CAPACITY_MESSAGE,
    MALFORMED_MESSAGE,
};
pub use config::{Config, ConfigError, MAX_GRID_CELLS};
pub use error::AllocationError;
pub use grid::{GridSnapshot, SeatGrid, DEFAULT_COLS, DEFAULT_ROWS, SAFETY_ROW_WIDTH};
pub use labels::{join_labels, seat_label};
pub use seatplan_types::{CellState, Seat};
