//! Metadata block extraction from event bodies
//!
//! The block sits between the first `[[str]]` and the first `[[end]]` in
//! the body and holds one `key: value` pair per line. Keys are split on
//! the first ASCII colon; blank lines, lines without a colon and lines
//! with an empty key are ignored. A repeated key overwrites the earlier
//! value.

use tracing::debug;

use crate::app::models::MetadataBlock;
use crate::constants::{METADATA_END_MARKER, METADATA_KEY_SEPARATOR, METADATA_START_MARKER};

/// Extract the metadata block from a body, empty when markers are missing
pub fn extract_metadata(body: &str) -> MetadataBlock {
    let mut block = MetadataBlock::new();

    let (Some(start), Some(end)) = (
        body.find(METADATA_START_MARKER),
        body.find(METADATA_END_MARKER),
    ) else {
        return block;
    };

    let content_start = start + METADATA_START_MARKER.len();
    if end < content_start {
        debug!("Metadata end marker precedes start marker; ignoring block");
        return block;
    }

    for line in body[content_start..end].lines() {
        let Some((key, value)) = line.split_once(METADATA_KEY_SEPARATOR) else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        block.insert(key, value.trim());
    }

    debug!("Extracted {} metadata keys", block.len());
    block
}
