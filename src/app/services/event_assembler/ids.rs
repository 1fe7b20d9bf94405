//! Event id generation
//!
//! Ids are `<prefix>_<unix millis>_<sequence>`. The sequence belongs to
//! the generator and is never reset, so two runs inside the same
//! millisecond still produce distinct ids. Ids carry no event content.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic id source shared by all ingestion runs of one orchestrator
#[derive(Debug, Default)]
pub struct EventIdGenerator {
    sequence: AtomicU64,
}

impl EventIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the next id for `prefix`
    pub fn next_id(&self, prefix: &str) -> String {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("{}_{}_{}", prefix, Utc::now().timestamp_millis(), sequence)
    }
}
