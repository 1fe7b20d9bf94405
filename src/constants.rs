//! Application constants for calendar ingestion
//!
//! This module contains the literal markers, metadata keys, default values
//! and lookup tables used throughout the ingestion pipeline.

// =============================================================================
// Export Format
// =============================================================================

/// Number of positional fields in one export record
pub const EXPORT_FIELD_COUNT: usize = 6;

/// Quote character used for field escaping
pub const QUOTE: char = '"';

/// Field separator
pub const FIELD_SEPARATOR: char = ',';

/// Start marker of the embedded metadata block
pub const METADATA_START_MARKER: &str = "[[str]]";

/// End marker of the embedded metadata block
pub const METADATA_END_MARKER: &str = "[[end]]";

/// Separator between key and value inside the metadata block
pub const METADATA_KEY_SEPARATOR: char = ':';

// =============================================================================
// Metadata Keys
// =============================================================================

/// Keys recognized inside the metadata block
///
/// Each field lists its export key first followed by any accepted alias.
/// The first key carrying a non-empty value wins.
pub mod metadata_keys {
    pub const SUBJECT: &[&str] = &["件名"];
    pub const DESCRIPTION: &[&str] = &["内容"];
    pub const PROJECT: &[&str] = &["project"];
    pub const COLOR: &[&str] = &["color"];
    pub const STATUS: &[&str] = &["進捗"];
    pub const CATEGORY_CODE: &[&str] = &["分類コード"];
    pub const PRIORITY: &[&str] = &["優先度"];
    pub const ACTIVITY_CODE: &[&str] = &["業務コード", "activityCode"];
    pub const EQUIPMENT_NUMBER: &[&str] = &["設備番号", "equipmentNumber"];
    pub const EQUIPMENT_NAME: &[&str] = &["設備名", "equipmentName"];
    pub const EQUIPMENT_ID: &[&str] = &["装置ID", "equipment_id"];
    pub const EQUIPMENT_DISPLAY_NAME: &[&str] = &["装置名", "equipment_Name"];
    pub const ITEM_NAME: &[&str] = &["購入品名", "itemName"];
}

// =============================================================================
// Status Canonicalization
// =============================================================================

/// Progress value written by the export when a task is done
pub const STATUS_DONE: &str = "完了";

/// Canonical closed status stored on events
pub const STATUS_CLOSED: &str = "終了";

// =============================================================================
// Temporal Defaults
// =============================================================================

/// Hour used when a time field is missing or malformed
pub const DEFAULT_HOUR: u32 = 9;

/// Minute used when a time field is missing or malformed
pub const DEFAULT_MINUTE: u32 = 0;

/// Days from a window's Monday to its Sunday (inclusive end)
pub const WEEK_SPAN_DAYS: u64 = 6;

/// Highest week number accepted for a window
pub const MAX_WEEK_NUMBER: u32 = 53;

// =============================================================================
// Body Heuristics
// =============================================================================

/// Export artifact token removed from descriptions
pub const BODY_ARTIFACT_TOKEN: &str = "@@EH________0000000::O::O_000::O_Z0@@";

/// Room label pattern; the first capture group is the room
pub const ROOM_PATTERN: &str = r"会議室[：:]\s*(\S+)";

/// Keyword marking an online meeting
pub const ONLINE_MEETING_KEYWORD: &str = "Teams";

/// Location used for online meetings
pub const ONLINE_MEETING_LOCATION: &str = "オンライン";

/// Generic all-recipients marker
pub const ALL_RECIPIENTS_MARKER: &str = "各位";

/// Literal attendee names recognized in bodies
pub const KNOWN_ATTENDEES: &[&str] = &["北川", "田中", "佐藤", "山田"];

/// Maximum description lines kept before truncation
pub const MAX_DESCRIPTION_LINES: usize = 5;

/// Suffix appended to truncated descriptions
pub const DESCRIPTION_ELLIPSIS: &str = "...";

// =============================================================================
// Event Defaults
// =============================================================================

/// Id prefix for events produced by the text pipeline
pub const CSV_EVENT_ID_PREFIX: &str = "csv";

/// Id prefix for events added by hand
pub const MANUAL_EVENT_ID_PREFIX: &str = "manual";

/// Id prefix for native events lacking an id
pub const NATIVE_EVENT_ID_PREFIX: &str = "event";

/// Subject given to native events without title or summary
pub const UNTITLED_EVENT_SUBJECT: &str = "無題のイベント";

/// Subject given to manual events without a subject
pub const MANUAL_EVENT_SUBJECT: &str = "手動追加イベント";

/// Work item defaults applied by [`crate::app::models::CanonicalEvent::to_work_item`]
pub mod work_item_defaults {
    pub const ID_PREFIX: &str = "outlook-";
    pub const SOURCE: &str = "outlook";
    pub const COLOR: &str = "#3B82F6";
    pub const STATUS: &str = "未分類";
    pub const CATEGORY_CODE: &str = "PP01";
}

// =============================================================================
// Equipment Table
// =============================================================================

/// Built-in equipment code table: (code, id, display name, name)
pub const DEFAULT_EQUIPMENT_TABLE: &[(&str, &str, &str, &str)] = &[
    ("1700", "25", "鋳床設備", "鋳床設備"),
    ("1100", "5", "本体", "本体"),
    ("0000", "9", "テスト", "テスト"),
    ("1500", "15", "DX業務", "DX業務"),
    ("2300", "23", "っっっっっｓ", "っっっっっｓ"),
];

// =============================================================================
// Cache and Identity
// =============================================================================

/// Prefix of per-week cache keys
pub const CACHE_KEY_PREFIX: &str = "outlook_events";

/// Application directory name under the platform cache/config roots
pub const APP_DIR_NAME: &str = "calendar-ingest";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Session identity file name inside the cache directory
pub const SESSION_FILE_NAME: &str = "current_user.json";

/// Environment variable overriding the cache directory
pub const ENV_CACHE_DIR: &str = "CALENDAR_INGEST_CACHE_DIR";

/// Environment variable supplying the fallback user id
pub const ENV_USER_ID: &str = "CALENDAR_INGEST_USER_ID";
