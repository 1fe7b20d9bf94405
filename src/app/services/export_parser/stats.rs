//! Parsing statistics and result structures for export processing
//!
//! This module provides types for tracking how many logical records were
//! recovered from an export and why the rest were skipped.

use crate::app::models::RawRecord;

/// Parsing result with records and basic statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Successfully split records, in export order
    pub records: Vec<RawRecord>,

    /// Basic parsing statistics
    pub stats: ParseStats,
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Number of logical data records encountered (header excluded)
    pub total_records: usize,

    /// Number of records mapped onto the six-field schema
    pub records_parsed: usize,

    /// Number of records skipped as structurally malformed
    pub records_skipped: usize,

    /// Parsing errors for debugging
    pub errors: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            (self.records_parsed as f64 / self.total_records as f64) * 100.0
        }
    }

    /// Check if every record was recovered
    pub fn is_clean(&self) -> bool {
        self.records_skipped == 0
    }
}
