//! Sync orchestration for weekly event sets
//!
//! This module decides where a week's events come from and keeps the
//! per-week cache current. Sources are tried in a fixed order: the cache,
//! a capability-checked native calendar, then manual text run through the
//! ingestion pipeline. The first success wins and is written back.
//!
//! # Architecture
//!
//! - [`cache`] - Per-week event cache contract and implementations
//! - [`source`] - Native calendar capability and native event conversion
//! - [`prompt`] - Cancellable "text or none" boundary for manual input
//! - [`identity`] - Caller identity resolution for `employeeNumber`
//! - [`orchestrator`] - The strategy chain and its state machine

pub mod cache;
pub mod identity;
pub mod orchestrator;
pub mod prompt;
pub mod source;


// Re-export main types for easy access
pub use cache::{EventCache, JsonFileCache, MemoryEventCache};
pub use identity::UserIdentity;
pub use orchestrator::{SourceKind, SyncOrchestrator, SyncOutcome, SyncState};
pub use prompt::{FileTextPrompt, PresetText, StdinTextPrompt, TextPrompt};
pub use source::{CalendarSource, JsonCalendarSource, native_to_canonical};
