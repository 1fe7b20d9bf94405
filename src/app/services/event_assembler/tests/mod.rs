//! Test utilities for event assembly
//!
//! Provides raw record builders and a shared assembler fixture.

use std::sync::Arc;

use crate::app::models::RawRecord;
use crate::app::services::equipment_registry::EquipmentRegistry;
use crate::app::services::event_assembler::{EventAssembler, EventIdGenerator};

mod enrichment_tests;

/// Build a record on 2025/8/6 13:00-14:00 with the given body
pub fn record_with_body(subject: &str, body: &str) -> RawRecord {
    RawRecord {
        subject: subject.to_string(),
        start_date: "2025/8/6".to_string(),
        start_time: "13:00:00".to_string(),
        end_date: "2025/8/6".to_string(),
        end_time: "14:00:00".to_string(),
        body: body.to_string(),
    }
}

/// Assembler over the built-in equipment table
pub fn create_test_assembler() -> EventAssembler {
    EventAssembler::new(
        Arc::new(EquipmentRegistry::with_defaults()),
        Arc::new(EventIdGenerator::new()),
    )
}
