//! Parser for calendar export text
//!
//! The export is a fixed six-field, comma-separated, double-quote-escaped
//! format whose last field (the free-text body) may span several physical
//! lines. Parsing is best-effort: malformed records are counted and
//! skipped, never fatal to the batch.
//!
//! ## Architecture
//!
//! - [`tokenizer`] - Joins physical lines into logical records by quote parity
//! - [`field_splitter`] - Splits one logical record into its fields
//! - [`parser`] - Drives both stages over a whole export
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use calendar_ingest::app::services::export_parser::ExportParser;
//!
//! let text = "\"件名\",\"開始日\",\"開始時刻\",\"終了日\",\"終了時刻\",\"内容\"\n\
//!             \"定例\",\"2025/8/6\",\"13:00:00\",\"2025/8/6\",\"14:00:00\",\"議事\"";
//! let result = ExportParser::new().parse_text(text);
//!
//! assert_eq!(result.records.len(), 1);
//! assert_eq!(result.records[0].subject, "定例");
//! ```

pub mod field_splitter;
pub mod parser;
pub mod stats;
pub mod tokenizer;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use field_splitter::{split_fields, split_record};
pub use parser::ExportParser;
pub use stats::{ParseResult, ParseStats};
pub use tokenizer::{LogicalRecords, split_logical_records};
