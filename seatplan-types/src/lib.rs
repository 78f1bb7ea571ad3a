//! Shared types for seatplan
//!
//! This crate provides the plain-data types used across the seatplan
//! workspace: the state of a single grid cell and a seat coordinate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a single cell in the seat grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    /// Open for reservation
    #[default]
    Free,
    /// Taken by a request
    Reserved,
    /// Safety row or post-assignment buffer. The two are indistinguishable.
    Blocked,
}

impl CellState {
    /// Numeric code used when dumping the grid
    pub fn code(&self) -> u8 {
        match self {
            CellState::Free => 0,
            CellState::Reserved => 1,
            CellState::Blocked => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(CellState::Free),
            1 => Some(CellState::Reserved),
            3 => Some(CellState::Blocked),
            _ => None,
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, CellState::Free)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CellState::Free => "free",
            CellState::Reserved => "reserved",
            CellState::Blocked => "blocked",
        }
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zero-based (row, col) coordinate of a seat in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seat {
    pub row: usize,
    pub col: usize,
}

impl Seat {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Seat {
    fn from((row, col): (usize, usize)) -> Self {
        Seat { row, col }
    }
}

impl From<Seat> for (usize, usize) {
    fn from(seat: Seat) -> Self {
        (seat.row, seat.col)
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.row, self.col)
    }
}
