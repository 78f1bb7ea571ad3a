//! Batch processing of request lines.
//!
//! Each input line is `<request-id> <quantity>`. Every line produces one
//! output line `<request-id> <result>` where the result is the joined seat
//! labels or one of the fixed rejection messages.

use crate::allocator::{Allocator, Reservation};
use crate::error::AllocationError;
use crate::grid::GridSnapshot;
use serde::Serialize;
use std::fmt;

/// Output text for a line or quantity that cannot be parsed
pub const MALFORMED_MESSAGE: &str = "Error: Malformed input.";

/// Output text for a request larger than the remaining capacity
pub const CAPACITY_MESSAGE: &str =
    "No reservation made. Amount of seats requested exceeds available seats. ";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestLine<'a> {
    Request { id: &'a str, quantity: &'a str },
    Malformed { id: &'a str },
}

impl<'a> RequestLine<'a> {
    /// Split a line on whitespace. Exactly two tokens make a request;
    /// anything else is malformed and keeps the first token as its id.
    pub fn parse(line: &'a str) -> Self {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match *tokens.as_slice() {
            [id, quantity] => RequestLine::Request { id, quantity },
            [id, ..] => RequestLine::Malformed { id },
            [] => RequestLine::Malformed { id: "" },
        }
    }

    pub fn id(&self) -> &'a str {
        match *self {
            RequestLine::Request { id, .. } | RequestLine::Malformed { id } => id,
        }
    }
}

/// Result of one request as seen by the output file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Reserved { reservation: Reservation },
    Malformed,
    Rejected { requested: usize, available: usize },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Reserved { reservation } => f.write_str(&reservation.labels()),
            Outcome::Malformed => f.write_str(MALFORMED_MESSAGE),
            Outcome::Rejected { .. } => f.write_str(CAPACITY_MESSAGE),
        }
    }
}

/// One output record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchRecord {
    pub id: String,
    pub outcome: Outcome,
}

impl BatchRecord {
    /// Output file line, without trailing newline
    pub fn to_line(&self) -> String {
        format!("{} {}", self.id, self.outcome)
    }
}

/// Counters over a processed batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub requests: usize,
    pub fulfilled: usize,
    pub malformed: usize,
    pub rejected: usize,
    pub seats_reserved: usize,
    pub seats_available: usize,
}

/// Everything a finished batch produced
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub records: Vec<BatchRecord>,
    pub summary: BatchSummary,
    pub grid: GridSnapshot,
}

/// Runs request lines in order against one allocator
#[derive(Debug)]
pub struct BatchRunner {
    allocator: Allocator,
    records: Vec<BatchRecord>,
    summary: BatchSummary,
}

impl BatchRunner {
    pub fn new(allocator: Allocator) -> Self {
        let seats_available = allocator.available_seats();
        Self {
            allocator,
            records: Vec::new(),
            summary: BatchSummary {
                seats_available,
                ..BatchSummary::default()
            },
        }
    }

    pub fn allocator(&self) -> &Allocator {
        &self.allocator
    }

    pub fn records(&self) -> &[BatchRecord] {
        &self.records
    }

    /// Process one input line. Blank lines are skipped and yield `None`.
    ///
    /// Rejected and malformed requests become records; an invalid cell
    /// transition aborts with the error.
    pub fn process_line(&mut self, line: &str) -> Result<Option<&BatchRecord>, AllocationError> {
        if line.trim().is_empty() {
            tracing::debug!("Skipping blank request line");
            return Ok(None);
        }

        let request = RequestLine::parse(line);
        let id = request.id().to_string();
        let outcome = match request {
            RequestLine::Request { quantity, .. } => {
                match self.allocator.request_seats(quantity) {
                    Ok(reservation) => Outcome::Reserved { reservation },
                    Err(err) if !err.is_recoverable() => return Err(err),
                    Err(AllocationError::InsufficientCapacity {
                        requested,
                        available,
                    }) => Outcome::Rejected {
                        requested,
                        available,
                    },
                    Err(_) => Outcome::Malformed,
                }
            }
            RequestLine::Malformed { .. } => Outcome::Malformed,
        };

        self.record(id, outcome);
        Ok(self.records.last())
    }

    /// Process every line of `input`
    pub fn process_all(&mut self, input: &str) -> Result<(), AllocationError> {
        tracing::info!(
            "Processing {} request lines ({} seats available)",
            input.lines().count(),
            self.allocator.available_seats()
        );
        for line in input.lines() {
            self.process_line(line)?;
        }
        Ok(())
    }

    pub fn summary(&self) -> &BatchSummary {
        &self.summary
    }

    /// Output file contents, one line per record
    pub fn output(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&record.to_line());
            out.push('\n');
        }
        out
    }

    pub fn finish(self) -> BatchReport {
        tracing::info!(
            "Processed {} requests: {} fulfilled, {} malformed, {} rejected ({} seats left)",
            self.summary.requests,
            self.summary.fulfilled,
            self.summary.malformed,
            self.summary.rejected,
            self.summary.seats_available
        );
        BatchReport {
            grid: self.allocator.grid().snapshot(),
            records: self.records,
            summary: self.summary,
        }
    }

    fn record(&mut self, id: String, outcome: Outcome) {
        self.summary.requests += 1;
        match &outcome {
            Outcome::Reserved { reservation } => {
                self.summary.fulfilled += 1;
                self.summary.seats_reserved += reservation.len();
            }
            Outcome::Malformed => {
                tracing::warn!("Malformed request {:?}", id);
                self.summary.malformed += 1;
            }
            Outcome::Rejected { .. } => self.summary.rejected += 1,
        }
        self.summary.seats_available = self.allocator.available_seats();
        self.records.push(BatchRecord { id, outcome });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request_line() {
        assert_eq!(
            RequestLine::parse("R001 5"),
            RequestLine::Request {
                id: "R001",
                quantity: "5"
            }
        );
        assert_eq!(
            RequestLine::parse("R002 5 extra"),
            RequestLine::Malformed { id: "R002" }
        );
        assert_eq!(RequestLine::parse("R003"), RequestLine::Malformed { id: "R003" });
        assert_eq!(RequestLine::parse(""), RequestLine::Malformed { id: "" });
    }

    #[test]
    fn test_reference_batch_output() {
        let mut runner = BatchRunner::new(Allocator::default());
        runner
            .process_all("R001 5\nR002 3\nR003 1\nR004 1\n")
            .unwrap();
        assert_eq!(
            runner.output(),
            "R001 A1, A2, A3, A4, A5\nR002 A9, A10, A11\nR003 A15\nR004 A19\n"
        );
    }

    #[test]
    fn test_rejections_render_fixed_messages() {
        let mut runner = BatchRunner::new(Allocator::default());
        runner.process_all("R001 #\nR002\nR003 101\n\nR004 0").unwrap();

        let lines: Vec<String> = runner.records().iter().map(BatchRecord::to_line).collect();
        assert_eq!(
            lines,
            vec![
                "R001 Error: Malformed input.".to_string(),
                "R002 Error: Malformed input.".to_string(),
                "R003 No reservation made. Amount of seats requested exceeds available seats. "
                    .to_string(),
                "R004 Error: Malformed input.".to_string(),
            ]
        );

        let summary = runner.summary();
        assert_eq!(summary.requests, 4);
        assert_eq!(summary.malformed, 3);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.seats_available, 100);
    }

    #[test]
    fn test_recoverable_errors_keep_going() {
        let mut runner = BatchRunner::new(Allocator::default());
        runner.process_all("R001 abc\nR002 500\nR003 2\n").unwrap();

        let outcomes: Vec<&Outcome> = runner.records().iter().map(|r| &r.outcome).collect();
        assert_eq!(outcomes[0], &Outcome::Malformed);
        assert_eq!(
            outcomes[1],
            &Outcome::Rejected {
                requested: 500,
                available: 100
            }
        );
        assert!(matches!(outcomes[2], Outcome::Reserved { .. }));
        assert_eq!(runner.summary().fulfilled, 1);
    }

    #[test]
    fn test_summary_counts_seats() {
        let mut runner = BatchRunner::new(Allocator::default());
        runner.process_all("R001 5\nR002 3\n").unwrap();
        let report = runner.finish();
        assert_eq!(report.summary.fulfilled, 2);
        assert_eq!(report.summary.seats_reserved, 8);
        assert_eq!(report.summary.seats_available, 86);
        assert_eq!(report.grid.available_seats, 86);
    }

    #[test]
    fn test_report_serializes() {
        let mut runner = BatchRunner::new(Allocator::default());
        runner.process_all("R001 2\nR002 x\n").unwrap();
        let value = serde_json::to_value(runner.finish()).unwrap();
        assert_eq!(value["records"][0]["id"], "R001");
        assert_eq!(value["records"][0]["outcome"]["status"], "reserved");
        assert_eq!(
            value["records"][0]["outcome"]["reservation"]["placement"],
            "contiguous"
        );
        assert_eq!(value["records"][1]["outcome"]["status"], "malformed");
    }
}
