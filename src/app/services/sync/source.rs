//! Native calendar capability
//!
//! A host may expose a calendar it can query directly for a date range.
//! Availability is always checked before use. Native events bypass the
//! text pipeline and are converted straight into canonical events.

use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::debug;

use crate::app::models::{CanonicalEvent, NativeEvent};
use crate::app::services::event_assembler::EventIdGenerator;
use crate::constants::{NATIVE_EVENT_ID_PREFIX, UNTITLED_EVENT_SUBJECT};

/// Host calendar that can be queried for a date range
#[async_trait]
pub trait CalendarSource: Send + Sync {
    /// Short name used in log messages
    fn name(&self) -> &str;

    /// Whether the capability exists in this environment
    fn is_available(&self) -> bool;

    /// Events starting within `[start, end]`, both inclusive
    async fn query(&self, start: NaiveDate, end: NaiveDate) -> anyhow::Result<Vec<NativeEvent>>;
}

/// Calendar capability backed by a JSON dump of native events
#[derive(Debug, Clone)]
pub struct JsonCalendarSource {
    path: PathBuf,
}

impl JsonCalendarSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CalendarSource for JsonCalendarSource {
    fn name(&self) -> &str {
        "json-calendar"
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    async fn query(&self, start: NaiveDate, end: NaiveDate) -> anyhow::Result<Vec<NativeEvent>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read calendar dump {}", self.path.display()))?;
        let events: Vec<NativeEvent> = serde_json::from_str(&content)
            .with_context(|| format!("Invalid calendar dump {}", self.path.display()))?;

        let total = events.len();
        let in_range: Vec<NativeEvent> = events
            .into_iter()
            .filter(|event| {
                event
                    .start
                    .map(|ts| ts.date() >= start && ts.date() <= end)
                    .unwrap_or(false)
            })
            .collect();

        debug!(
            "Calendar dump {}: {} of {} events in {}..={}",
            self.path.display(),
            in_range.len(),
            total,
            start,
            end
        );
        Ok(in_range)
    }
}

/// Convert a native event into a canonical event
///
/// Returns `None` for an event without a start time. A missing end takes
/// the start; an end before the start is clamped to it.
pub fn native_to_canonical(
    native: NativeEvent,
    ids: &EventIdGenerator,
    employee_number: &str,
) -> Option<CanonicalEvent> {
    let Some(start_time) = native.start else {
        debug!("Dropping native event {:?} without start", native.id);
        return None;
    };
    let end_time = native.end.filter(|end| *end >= start_time).unwrap_or(start_time);

    let id = native
        .id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| ids.next_id(NATIVE_EVENT_ID_PREFIX));
    let subject = native
        .title
        .filter(|s| !s.is_empty())
        .or(native.summary.filter(|s| !s.is_empty()))
        .unwrap_or_else(|| UNTITLED_EVENT_SUBJECT.to_string());

    let mut event = CanonicalEvent::new(id, subject, start_time, end_time);
    event.is_all_day = native.is_all_day.unwrap_or(false);
    event.location = native.location.unwrap_or_default();
    event.attendees = native.attendees.unwrap_or_default().into_iter().collect();
    event.description = native.description.unwrap_or_default();
    event.employee_number = employee_number.to_string();
    Some(event)
}
