//! Event assembly for parsed export records
//!
//! This module turns a raw export record into a [`CanonicalEvent`]. It
//! extracts the embedded metadata block, derives location, attendees and
//! a cleaned description from the free-text body, resolves equipment
//! codes and merges everything according to the field mapping rules.
//!
//! # Architecture
//!
//! - [`metadata`] - `[[str]]`…`[[end]]` block extraction
//! - [`enrichment`] - Body heuristics (location, attendees, description)
//! - [`ids`] - Timestamp + sequence event id generation
//! - [`assembler`] - The merge step and the registry-backed assembler
//!
//! [`CanonicalEvent`]: crate::app::models::CanonicalEvent

pub mod assembler;
pub mod enrichment;
pub mod ids;
pub mod metadata;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use assembler::{EventAssembler, assemble_event, canonical_status};
pub use enrichment::{clean_description, extract_attendees, extract_location};
pub use ids::EventIdGenerator;
pub use metadata::extract_metadata;
