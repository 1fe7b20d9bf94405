//! Field splitting for one logical record
//!
//! A single left-to-right scan tracks whether the cursor is inside a
//! quoted span. Inside quotes, `""` is an escaped literal quote and commas
//! are literal; outside quotes a comma ends the current field. Fields are
//! trimmed of surrounding whitespace.

use crate::Result;
use crate::app::models::RawRecord;
use crate::constants::{FIELD_SEPARATOR, QUOTE};

/// Split a logical record into its ordered, trimmed fields
pub fn split_fields(record: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = record.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            QUOTE if in_quotes && chars.peek() == Some(&QUOTE) => {
                current.push(QUOTE);
                chars.next();
            }
            QUOTE => in_quotes = !in_quotes,
            FIELD_SEPARATOR if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    fields.push(current.trim().to_string());
    fields
}

/// Split a logical record and map it onto the six-field schema
pub fn split_record(record: &str) -> Result<RawRecord> {
    RawRecord::from_fields(split_fields(record))
}
