//! Export parser orchestration
//!
//! Runs the tokenizer and the field splitter over a whole export, keeping
//! the records that map onto the six-field schema and counting the rest.

use tracing::{debug, info, warn};

use super::field_splitter::split_record;
use super::stats::{ParseResult, ParseStats};
use super::tokenizer::split_logical_records;

/// Longest record prefix quoted in log messages
const LOG_PREVIEW_CHARS: usize = 80;

/// Best-effort parser for calendar export text
#[derive(Debug, Clone, Default)]
pub struct ExportParser;

impl ExportParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse export text into raw records with statistics
    ///
    /// A record with fewer than six fields is skipped and logged; it never
    /// aborts parsing of the remaining records.
    pub fn parse_text(&self, text: &str) -> ParseResult {
        let mut stats = ParseStats::new();
        let mut records = Vec::new();

        for logical in split_logical_records(text) {
            stats.total_records += 1;

            match split_record(&logical) {
                Ok(record) => {
                    debug!("Parsed record {}: {}", stats.total_records, record.subject);
                    records.push(record);
                    stats.records_parsed += 1;
                }
                Err(e) => {
                    stats.records_skipped += 1;
                    let preview: String = logical.chars().take(LOG_PREVIEW_CHARS).collect();
                    warn!("Skipped record {}: {} ({:?})", stats.total_records, e, preview);
                    stats
                        .errors
                        .push(format!("Record {}: {}", stats.total_records, e));
                }
            }
        }

        info!(
            "Parsed {} records from {} logical records ({} skipped)",
            stats.records_parsed, stats.total_records, stats.records_skipped
        );

        ParseResult { records, stats }
    }
}
