//! Logical record tokenization
//!
//! Physical lines are joined into logical records by tracking the parity
//! of quote characters seen so far. A line leaving an odd number of quotes
//! open is continued by the following line(s). Only cumulative parity
//! across lines matters: a single line with an even, non-zero number of
//! quotes never splits a record.

use std::str::Lines;
use tracing::debug;

use crate::constants::QUOTE;

/// Iterator over logical records of an export, header included
#[derive(Debug)]
pub struct LogicalRecords<'a> {
    lines: Lines<'a>,
    buffer: String,
    in_quotes: bool,
    finished: bool,
}

impl<'a> LogicalRecords<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            buffer: String::new(),
            in_quotes: false,
            finished: false,
        }
    }

    fn append(&mut self, line: &str) {
        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
        self.buffer.push_str(line);
    }
}

impl Iterator for LogicalRecords<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.finished {
            return None;
        }

        while let Some(line) = self.lines.next() {
            let quotes = line.chars().filter(|&c| c == QUOTE).count();
            if quotes % 2 == 1 {
                self.in_quotes = !self.in_quotes;
            }
            self.append(line);

            if !self.in_quotes {
                if self.buffer.trim().is_empty() {
                    self.buffer.clear();
                    continue;
                }
                return Some(std::mem::take(&mut self.buffer));
            }
        }

        self.finished = true;
        if self.buffer.trim().is_empty() {
            return None;
        }

        if self.in_quotes {
            debug!(
                "Export ended inside a quoted span; emitting {} buffered bytes as a final record",
                self.buffer.len()
            );
        }
        Some(std::mem::take(&mut self.buffer))
    }
}

/// Split export text into logical data records
///
/// The first logical record is the header and is discarded.
pub fn split_logical_records(text: &str) -> Vec<String> {
    LogicalRecords::new(text).skip(1).collect()
}
