//! Sync orchestrator and its sourcing state machine
//!
//! A fetch walks `Idle → Resolving(source) → Parsing → Normalizing →
//! Cached`, trying the cache, the native calendar and manual text in that
//! order. A strategy that fails while resolving or parsing hands over to
//! the next one. When every strategy fails the outcome is empty; a fetch
//! never returns an error.

use chrono::Local;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::cache::EventCache;
use super::identity::UserIdentity;
use super::prompt::{PresetText, TextPrompt};
use super::source::{CalendarSource, native_to_canonical};
use crate::Result;
use crate::app::models::{CanonicalEvent, ManualEventInput, WeekKey};
use crate::app::services::equipment_registry::EquipmentRegistry;
use crate::app::services::event_assembler::{EventAssembler, EventIdGenerator};
use crate::app::services::pipeline::{IngestStats, IngestionPipeline};
use crate::constants::{MANUAL_EVENT_ID_PREFIX, MANUAL_EVENT_SUBJECT};

/// Where a week's events came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceKind {
    Cache,
    Native,
    Manual,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Cache => "cache",
            SourceKind::Native => "native calendar",
            SourceKind::Manual => "manual text",
        };
        f.write_str(name)
    }
}

/// Orchestrator states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SyncState {
    Idle,
    Resolving(SourceKind),
    Parsing,
    Normalizing,
    Cached,
}

/// Result of one orchestrated operation
#[derive(Debug, Clone, Default)]
pub struct SyncOutcome {
    /// Events for the week, empty when every strategy failed
    pub events: Vec<CanonicalEvent>,
    /// Strategy that produced the events
    pub source: Option<SourceKind>,
    /// Every state entered, in order
    pub transitions: Vec<SyncState>,
    /// Pipeline statistics when manual text was ingested
    pub stats: Option<IngestStats>,
}

impl SyncOutcome {
    fn enter(&mut self, state: SyncState) {
        debug!("Sync state -> {:?}", state);
        self.transitions.push(state);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Coordinates sources, the ingestion pipeline and the per-week cache
pub struct SyncOrchestrator {
    cache: Arc<dyn EventCache>,
    source: Option<Arc<dyn CalendarSource>>,
    prompt: Arc<dyn TextPrompt>,
    pipeline: IngestionPipeline,
    identity: UserIdentity,
    ids: Arc<EventIdGenerator>,
    cancellation: CancellationToken,
}

impl SyncOrchestrator {
    /// Create an orchestrator with no native source and no manual text
    pub fn new(
        cache: Arc<dyn EventCache>,
        registry: Arc<EquipmentRegistry>,
        identity: UserIdentity,
    ) -> Self {
        let ids = Arc::new(EventIdGenerator::new());
        Self {
            cache,
            source: None,
            prompt: Arc::new(PresetText::none()),
            pipeline: IngestionPipeline::new(EventAssembler::new(registry, Arc::clone(&ids))),
            identity,
            ids,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_source(mut self, source: Arc<dyn CalendarSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_prompt(mut self, prompt: Arc<dyn TextPrompt>) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Equipment registry shared with the assembler, for runtime merges
    pub fn registry(&self) -> &Arc<EquipmentRegistry> {
        self.pipeline.assembler().registry()
    }

    /// Events for `week` from the first strategy that succeeds
    pub async fn fetch_week(&self, week: &WeekKey) -> SyncOutcome {
        let mut outcome = SyncOutcome::default();
        outcome.enter(SyncState::Idle);

        outcome.enter(SyncState::Resolving(SourceKind::Cache));
        match self.cache.get(week).await {
            Ok(events) if !events.is_empty() => {
                outcome.enter(SyncState::Cached);
                info!("Cache hit for {}: {} events", week, events.len());
                outcome.events = events;
                outcome.source = Some(SourceKind::Cache);
                return outcome;
            }
            Ok(_) => debug!("Cache miss for {}", week),
            Err(e) => warn!("Cache read failed for {}: {}", week, e),
        }

        let employee_number = self.identity.resolve().await;

        if let Some(events) = self.try_native(week, &employee_number, &mut outcome).await {
            return self.store(week, events, SourceKind::Native, outcome).await;
        }

        if let Some((events, stats)) = self.try_manual(week, &employee_number, &mut outcome).await {
            outcome.stats = Some(stats);
            return self.store(week, events, SourceKind::Manual, outcome).await;
        }

        outcome.enter(SyncState::Idle);
        info!("No source produced events for {}", week);
        outcome
    }

    /// Run `text` through the pipeline and overwrite the week's cache slot
    ///
    /// Re-importing the same text replaces the slot rather than adding to
    /// it.
    pub async fn import_text(&self, week: &WeekKey, text: &str) -> Result<SyncOutcome> {
        let mut outcome = SyncOutcome::default();
        outcome.enter(SyncState::Idle);
        outcome.enter(SyncState::Resolving(SourceKind::Manual));

        let employee_number = self.identity.resolve().await;
        outcome.enter(SyncState::Parsing);
        let parsed = self.pipeline.parse(text);
        outcome.enter(SyncState::Normalizing);
        let (events, stats) = self.pipeline.normalize(parsed, week, &employee_number);

        outcome.enter(SyncState::Cached);
        self.cache.put(week, &events).await?;
        info!("Imported {} events into {}", events.len(), week);

        outcome.events = events;
        outcome.source = Some(SourceKind::Manual);
        outcome.stats = Some(stats);
        Ok(outcome)
    }

    /// Build one event from structured input and append it to the week
    pub async fn add_manual_event(
        &self,
        week: &WeekKey,
        input: ManualEventInput,
    ) -> Result<CanonicalEvent> {
        let now = Local::now().naive_local();
        let start_time = input.start_time.unwrap_or(now);
        let end_time = input.end_time.unwrap_or(start_time.max(now));
        let subject = input
            .subject
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| MANUAL_EVENT_SUBJECT.to_string());

        let mut event = CanonicalEvent::new(
            self.ids.next_id(MANUAL_EVENT_ID_PREFIX),
            subject,
            start_time,
            end_time,
        );
        event.is_all_day = input.is_all_day;
        event.location = input.location.unwrap_or_default();
        event.attendees = input.attendees.into_iter().collect();
        event.description = input.description.unwrap_or_default();
        event.employee_number = self.identity.resolve().await;
        event.validate()?;

        if !week.window().contains(event.start_time.date()) {
            warn!(
                "Manual event '{}' starts {} outside {}",
                event.subject, event.start_time, week
            );
        }

        let mut events = self.cache.get(week).await?;
        events.push(event.clone());
        self.cache.put(week, &events).await?;

        info!("Added manual event {} to {} ({} total)", event.id, week, events.len());
        Ok(event)
    }

    /// Events currently cached for `week`
    pub async fn read_week(&self, week: &WeekKey) -> Result<Vec<CanonicalEvent>> {
        self.cache.get(week).await
    }

    /// Drop the cache slot of `week`
    pub async fn clear_week(&self, week: &WeekKey) -> Result<()> {
        self.cache.clear(week).await?;
        info!("Cleared cached events for {}", week);
        Ok(())
    }

    async fn try_native(
        &self,
        week: &WeekKey,
        employee_number: &str,
        outcome: &mut SyncOutcome,
    ) -> Option<Vec<CanonicalEvent>> {
        outcome.enter(SyncState::Resolving(SourceKind::Native));

        let source = match &self.source {
            Some(source) if source.is_available() => source,
            Some(source) => {
                debug!("Native source {} unavailable", source.name());
                return None;
            }
            None => {
                debug!("No native source configured");
                return None;
            }
        };

        let window = week.window();
        let queried = tokio::select! {
            result = source.query(window.start, window.end) => result,
            _ = self.cancellation.cancelled() => {
                debug!("Native query for {} cancelled", week);
                return None;
            }
        };

        let native_events = match queried {
            Ok(events) => events,
            Err(e) => {
                warn!("Native source {} failed for {}: {:#}", source.name(), week, e);
                return None;
            }
        };

        outcome.enter(SyncState::Normalizing);
        let received = native_events.len();
        let events: Vec<CanonicalEvent> = native_events
            .into_iter()
            .filter_map(|native| native_to_canonical(native, &self.ids, employee_number))
            .collect();

        info!(
            "Native source {} returned {} events for {} ({} dropped)",
            source.name(),
            events.len(),
            week,
            received - events.len()
        );
        Some(events)
    }

    async fn try_manual(
        &self,
        week: &WeekKey,
        employee_number: &str,
        outcome: &mut SyncOutcome,
    ) -> Option<(Vec<CanonicalEvent>, IngestStats)> {
        outcome.enter(SyncState::Resolving(SourceKind::Manual));

        let text = tokio::select! {
            text = self.prompt.request_text(week) => text,
            _ = self.cancellation.cancelled() => {
                debug!("Manual text prompt for {} cancelled", week);
                None
            }
        };
        let Some(text) = text else {
            debug!("No manual text supplied for {}", week);
            return None;
        };

        outcome.enter(SyncState::Parsing);
        let parsed = self.pipeline.parse(&text);
        if parsed.records.is_empty() {
            warn!("Manual text for {} contained no parseable records", week);
            return None;
        }

        outcome.enter(SyncState::Normalizing);
        Some(self.pipeline.normalize(parsed, week, employee_number))
    }

    async fn store(
        &self,
        week: &WeekKey,
        events: Vec<CanonicalEvent>,
        source: SourceKind,
        mut outcome: SyncOutcome,
    ) -> SyncOutcome {
        outcome.enter(SyncState::Cached);
        if let Err(e) = self.cache.put(week, &events).await {
            warn!("Cache write failed for {}: {}", week, e);
        }

        info!("Resolved {} events for {} from {}", events.len(), week, source);
        outcome.events = events;
        outcome.source = Some(source);
        outcome
    }
}
