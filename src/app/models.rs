//! Data models for calendar ingestion
//!
//! This module contains the core data structures flowing through the
//! ingestion pipeline: raw export records, the embedded metadata block,
//! equipment resolutions, week windows and the canonical event produced
//! at the end.

use crate::constants::{self, EXPORT_FIELD_COUNT, work_item_defaults};
use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// =============================================================================
// Raw Export Record
// =============================================================================

/// Six ordered fields exactly as found in one logical export line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub subject: String,
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    /// Free-text body, possibly spanning several lines
    pub body: String,
}

impl RawRecord {
    /// Map split fields positionally onto the record schema
    ///
    /// Fields beyond the sixth are ignored. Fewer than six fields is a
    /// structural failure for this record.
    pub fn from_fields(fields: Vec<String>) -> Result<Self> {
        if fields.len() < EXPORT_FIELD_COUNT {
            return Err(Error::record_format(format!(
                "expected {} fields, found {}",
                EXPORT_FIELD_COUNT,
                fields.len()
            )));
        }

        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();

        Ok(Self {
            subject: next(),
            start_date: next(),
            start_time: next(),
            end_date: next(),
            end_time: next(),
            body: next(),
        })
    }
}

// =============================================================================
// Metadata Block
// =============================================================================

/// Ordered key/value pairs extracted from the body's metadata block
///
/// Keys are unique; inserting an existing key overwrites its value in
/// place so the first-seen order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataBlock {
    entries: Vec<(String, String)>,
}

impl MetadataBlock {
    /// Create an empty block
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair, overwriting any earlier value for the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Get the value stored for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Get the first non-empty value among several alias keys
    pub fn first_non_empty(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|key| self.get(key))
            .find(|value| !value.is_empty())
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the block carries no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// =============================================================================
// Equipment Resolution
// =============================================================================

/// Equipment names resolved from an equipment code
///
/// All fields are empty when the code is unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentResolution {
    pub equipment_id: String,
    pub equipment_display_name: String,
    pub equipment_name: String,
}

impl EquipmentResolution {
    pub fn new(
        equipment_id: impl Into<String>,
        equipment_display_name: impl Into<String>,
        equipment_name: impl Into<String>,
    ) -> Self {
        Self {
            equipment_id: equipment_id.into(),
            equipment_display_name: equipment_display_name.into(),
            equipment_name: equipment_name.into(),
        }
    }

    /// The all-empty "no resolution available" value
    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn is_resolved(&self) -> bool {
        !(self.equipment_id.is_empty()
            && self.equipment_display_name.is_empty()
            && self.equipment_name.is_empty())
    }
}

// =============================================================================
// Week Key and Window
// =============================================================================

/// Cache bucket identifier: a (year, week-number) pair
///
/// Only [`WeekKey::new`] builds a key, so every key carries a representable
/// window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WeekKey {
    year: i32,
    week: u32,
    #[serde(skip)]
    window: WeekWindow,
}

impl WeekKey {
    /// Create a key, rejecting week numbers outside 1..=53 and years whose
    /// window falls outside the supported date range
    pub fn new(year: i32, week: u32) -> Result<Self> {
        if week == 0 || week > constants::MAX_WEEK_NUMBER {
            return Err(Error::invalid_week(
                year,
                week,
                format!("week must be between 1 and {}", constants::MAX_WEEK_NUMBER),
            ));
        }
        let window = crate::app::services::temporal::week_window(year, week)
            .ok_or_else(|| Error::invalid_week(year, week, "year out of range"))?;
        Ok(Self { year, week, window })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    /// Storage key used by event caches
    pub fn cache_key(&self) -> String {
        format!("{}_{}_{}", constants::CACHE_KEY_PREFIX, self.year, self.week)
    }

    /// Monday-to-Sunday date range of this week
    pub fn window(&self) -> WeekWindow {
        self.window
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

/// Inclusive date range `[start, end]` of one week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeekWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekWindow {
    /// Whether a date falls inside the window, both ends inclusive
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

// =============================================================================
// Canonical Event
// =============================================================================

/// Fully normalized output record of the ingestion pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalEvent {
    pub id: String,
    pub subject: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub attendees: BTreeSet<String>,
    #[serde(default)]
    pub description: String,

    // User information
    #[serde(default)]
    pub employee_number: String,

    // Scheduling attributes from the metadata block
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub category_code: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub activity_code: String,

    // Equipment
    #[serde(default)]
    pub equipment_number: String,
    #[serde(default)]
    pub equipment_name: String,
    #[serde(default, rename = "equipment_id")]
    pub equipment_id: String,
    #[serde(default, rename = "equipment_Name")]
    pub equipment_display_name: String,

    // Purchased item
    #[serde(default)]
    pub item_name: String,
}

impl CanonicalEvent {
    /// Create an event with the required fields; everything else is empty
    pub fn new(
        id: impl Into<String>,
        subject: impl Into<String>,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            subject: subject.into(),
            start_time,
            end_time,
            is_all_day: false,
            location: String::new(),
            attendees: BTreeSet::new(),
            description: String::new(),
            employee_number: String::new(),
            project: String::new(),
            color: String::new(),
            status: String::new(),
            category_code: String::new(),
            priority: String::new(),
            activity_code: String::new(),
            equipment_number: String::new(),
            equipment_name: String::new(),
            equipment_id: String::new(),
            equipment_display_name: String::new(),
            item_name: String::new(),
        }
    }

    /// Check the start/end ordering invariant
    pub fn validate(&self) -> Result<()> {
        if self.start_time > self.end_time {
            return Err(Error::record_format(format!(
                "event '{}' starts at {} after its end {}",
                self.id, self.start_time, self.end_time
            )));
        }
        Ok(())
    }

    /// Duration in whole minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Project the event onto the weekly work grid's item shape
    pub fn to_work_item(&self) -> WorkItem {
        fn or_default(value: &str, default: &str) -> String {
            if value.is_empty() {
                default.to_string()
            } else {
                value.to_string()
            }
        }

        WorkItem {
            id: format!("{}{}", work_item_defaults::ID_PREFIX, self.id),
            title: self.subject.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            location: self.location.clone(),
            attendees: self.attendees.iter().cloned().collect(),
            description: self.description.clone(),
            source: work_item_defaults::SOURCE.to_string(),
            is_all_day: self.is_all_day,
            employee_number: self.employee_number.clone(),
            project: self.project.clone(),
            color: or_default(&self.color, work_item_defaults::COLOR),
            status: or_default(&self.status, work_item_defaults::STATUS),
            category_code: or_default(&self.category_code, work_item_defaults::CATEGORY_CODE),
            priority: self.priority.clone(),
            activity_code: self.activity_code.clone(),
        }
    }
}

// =============================================================================
// Source Inputs
// =============================================================================

/// Event shape returned by a host calendar capability
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NativeEvent {
    pub id: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub location: Option<String>,
    pub attendees: Option<Vec<String>>,
    pub description: Option<String>,
    pub is_all_day: Option<bool>,
}

/// Structured input for adding one event by hand
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualEventInput {
    pub subject: Option<String>,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub location: Option<String>,
    pub attendees: Vec<String>,
    pub description: Option<String>,
    pub is_all_day: bool,
}

// =============================================================================
// Work Item Projection
// =============================================================================

/// Item consumed by the weekly work grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub id: String,
    pub title: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub location: String,
    pub attendees: Vec<String>,
    pub description: String,
    pub source: String,
    pub is_all_day: bool,
    pub employee_number: String,
    pub project: String,
    pub color: String,
    pub status: String,
    pub category_code: String,
    pub priority: String,
    pub activity_code: String,
}
