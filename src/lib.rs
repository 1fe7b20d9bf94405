//! Calendar Ingest Library
//!
//! A Rust library for turning semi-structured calendar export text into
//! canonical, typed work events bucketed by (year, week).
//!
//! This library provides tools for:
//! - Tokenizing multi-line export text with quoted fields spanning lines
//! - Splitting logical records into the fixed six-field schema
//! - Extracting the `[[str]]`/`[[end]]` metadata block from event bodies
//! - Resolving equipment codes through a runtime-updatable registry
//! - Windowing records to a fixed-anchor (year, week) range
//! - Assembling canonical events and caching them per week
//! - Orchestrating cache, native calendar and manual text sources

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod equipment_registry;
        pub mod event_assembler;
        pub mod export_parser;
        pub mod pipeline;
        pub mod sync;
        pub mod temporal;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{CanonicalEvent, MetadataBlock, RawRecord, WeekKey, WeekWindow};
pub use config::Config;

/// Result type alias for calendar ingestion
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for calendar ingestion operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Logical record could not be mapped onto the six-field schema
    #[error("Record format error: {message}")]
    RecordFormat { message: String },

    /// Date string was not in `YYYY/M/D` form
    #[error("Date parsing error: {message}")]
    DateParsing { message: String },

    /// Requested (year, week) is outside the supported range
    #[error("Invalid week {year}-W{week}: {reason}")]
    InvalidWeek { year: i32, week: u32, reason: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Event cache could not be read or written
    #[error("Cache error for key '{key}': {message}")]
    Cache { key: String, message: String },

    /// JSON (de)serialization failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// A sourcing strategy is not available in this environment
    #[error("Source unavailable: {source_name}")]
    SourceUnavailable { source_name: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a record format error
    pub fn record_format(message: impl Into<String>) -> Self {
        Self::RecordFormat {
            message: message.into(),
        }
    }

    /// Create a date parsing error
    pub fn date_parsing(message: impl Into<String>) -> Self {
        Self::DateParsing {
            message: message.into(),
        }
    }

    /// Create an invalid week error
    pub fn invalid_week(year: i32, week: u32, reason: impl Into<String>) -> Self {
        Self::InvalidWeek {
            year,
            week,
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a cache error
    pub fn cache(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Cache {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a serialization error with context
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a source unavailable error
    pub fn source_unavailable(source_name: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            source_name: source_name.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid TOML configuration: {}", error),
        }
    }
}
