//! Canonical event assembly
//!
//! [`assemble_event`] is the pure merge of a windowed record, its
//! metadata block and its equipment resolution. [`EventAssembler`] wires
//! it to metadata extraction, the equipment registry and id generation.

use std::sync::Arc;
use tracing::{debug, warn};

use super::enrichment::{clean_description, extract_attendees, extract_location};
use super::ids::EventIdGenerator;
use super::metadata::extract_metadata;
use crate::Result;
use crate::app::models::{CanonicalEvent, EquipmentResolution, MetadataBlock, RawRecord};
use crate::app::services::equipment_registry::EquipmentRegistry;
use crate::app::services::temporal::combine;
use crate::constants::{CSV_EVENT_ID_PREFIX, STATUS_CLOSED, STATUS_DONE, metadata_keys};

/// Map the export's "done" progress value to the canonical closed status
///
/// Only this one literal is canonicalized; every other value passes
/// through unchanged.
pub fn canonical_status(status: &str) -> String {
    if status == STATUS_DONE {
        STATUS_CLOSED.to_string()
    } else {
        status.to_string()
    }
}

/// Merge a record, its metadata and its equipment resolution
///
/// Fails only when a date cannot be parsed. An end before the start is
/// clamped to the start.
pub fn assemble_event(
    record: &RawRecord,
    metadata: &MetadataBlock,
    equipment: &EquipmentResolution,
    id: String,
    employee_number: &str,
) -> Result<CanonicalEvent> {
    let start_time = combine(&record.start_date, &record.start_time)?;
    let mut end_time = combine(&record.end_date, &record.end_time)?;
    if end_time < start_time {
        warn!(
            "Event '{}' ends ({}) before it starts ({}); clamping end to start",
            record.subject, end_time, start_time
        );
        end_time = start_time;
    }

    let field = |keys: &[&str]| metadata.first_non_empty(keys).unwrap_or_default().to_string();
    let field_or = |keys: &[&str], fallback: &str| {
        metadata
            .first_non_empty(keys)
            .unwrap_or(fallback)
            .to_string()
    };

    let category_code = field(metadata_keys::CATEGORY_CODE);
    let activity_code = field_or(metadata_keys::ACTIVITY_CODE, &category_code);

    let description = match metadata.first_non_empty(metadata_keys::DESCRIPTION) {
        Some(description) => description.to_string(),
        None => clean_description(&record.body),
    };

    let event = CanonicalEvent {
        id,
        subject: field_or(metadata_keys::SUBJECT, &record.subject),
        start_time,
        end_time,
        is_all_day: false,
        location: extract_location(&record.body),
        attendees: extract_attendees(&record.body),
        description,
        employee_number: employee_number.to_string(),
        project: field(metadata_keys::PROJECT),
        color: field(metadata_keys::COLOR),
        status: canonical_status(&field(metadata_keys::STATUS)),
        category_code,
        priority: field(metadata_keys::PRIORITY),
        activity_code,
        equipment_number: field(metadata_keys::EQUIPMENT_NUMBER),
        equipment_name: field_or(metadata_keys::EQUIPMENT_NAME, &equipment.equipment_name),
        equipment_id: field_or(metadata_keys::EQUIPMENT_ID, &equipment.equipment_id),
        equipment_display_name: field_or(
            metadata_keys::EQUIPMENT_DISPLAY_NAME,
            &equipment.equipment_display_name,
        ),
        item_name: field(metadata_keys::ITEM_NAME),
    };

    Ok(event)
}

/// Registry-backed assembler for export records
#[derive(Debug, Clone)]
pub struct EventAssembler {
    registry: Arc<EquipmentRegistry>,
    ids: Arc<EventIdGenerator>,
}

impl EventAssembler {
    pub fn new(registry: Arc<EquipmentRegistry>, ids: Arc<EventIdGenerator>) -> Self {
        Self { registry, ids }
    }

    /// Shared equipment registry
    pub fn registry(&self) -> &Arc<EquipmentRegistry> {
        &self.registry
    }

    /// Extract, resolve and assemble one record
    pub fn assemble(&self, record: &RawRecord, employee_number: &str) -> Result<CanonicalEvent> {
        let metadata = extract_metadata(&record.body);
        let equipment = match metadata.first_non_empty(metadata_keys::EQUIPMENT_NUMBER) {
            Some(code) => self.registry.resolve(code),
            None => EquipmentResolution::unresolved(),
        };

        let event = assemble_event(
            record,
            &metadata,
            &equipment,
            self.ids.next_id(CSV_EVENT_ID_PREFIX),
            employee_number,
        )?;

        debug!(
            "Assembled event {} '{}' (category={}, activity={}, equipment={})",
            event.id, event.subject, event.category_code, event.activity_code, event.equipment_number
        );
        Ok(event)
    }
}
