//! Human-readable seat labels.
//!
//! Rows get one letter per raw grid row index, so with the default stride
//! the usable rows 0, 2, 4 are labeled `A`, `C`, `E`. Columns are 1-based.

use seatplan_types::Seat;

/// Letter label for a raw row index
///
/// Rows past `Z` continue as `AA`, `AB`, ... in spreadsheet style.
///
/// # Examples
///
/// ```
/// use seatplan_core::labels::row_label;
///
/// assert_eq!(row_label(0), "A");
/// assert_eq!(row_label(2), "C");
/// assert_eq!(row_label(26), "AA");
/// ```
pub fn row_label(row: usize) -> String {
    let mut letters = Vec::new();
    let mut n = row + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Label for a single seat, e.g. `(0, 0)` -> `A1`
pub fn seat_label(seat: Seat) -> String {
    format!("{}{}", row_label(seat.row), seat.col + 1)
}

/// Labels for a reservation, joined with `", "` in reservation order
pub fn join_labels(seats: &[Seat]) -> String {
    seats
        .iter()
        .map(|seat| seat_label(*seat))
        .collect::<Vec<_>>()
        .join(", ")
}
