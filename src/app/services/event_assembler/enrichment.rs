//! Body heuristics for location, attendees and description
//!
//! These are keyword searches over the free-text body. They never fail:
//! a body without any recognizable content yields empty values.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::constants::{
    ALL_RECIPIENTS_MARKER, BODY_ARTIFACT_TOKEN, DESCRIPTION_ELLIPSIS, KNOWN_ATTENDEES,
    MAX_DESCRIPTION_LINES, ONLINE_MEETING_KEYWORD, ONLINE_MEETING_LOCATION, ROOM_PATTERN,
};

static ROOM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ROOM_PATTERN).expect("room pattern is a valid regex"));

static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is a valid regex"));

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("url pattern is a valid regex"));

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is a valid regex"));

/// Find the meeting location in a body
///
/// A room label (`会議室: X`) wins; otherwise an online meeting keyword
/// maps to the online location. Empty when neither is present.
pub fn extract_location(body: &str) -> String {
    if let Some(room) = ROOM_REGEX.captures(body).and_then(|c| c.get(1)) {
        return room.as_str().to_string();
    }

    if body.contains(ONLINE_MEETING_KEYWORD) {
        return ONLINE_MEETING_LOCATION.to_string();
    }

    String::new()
}

/// Collect attendee tokens mentioned in a body, deduplicated
pub fn extract_attendees(body: &str) -> BTreeSet<String> {
    std::iter::once(ALL_RECIPIENTS_MARKER)
        .chain(KNOWN_ATTENDEES.iter().copied())
        .filter(|token| body.contains(token))
        .map(str::to_string)
        .collect()
}

/// Clean a body for use as a description
///
/// Removes the export artifact token, HTML-like tags and URLs, collapses
/// whitespace runs to single spaces and keeps at most the first five
/// lines followed by an ellipsis.
pub fn clean_description(body: &str) -> String {
    let cleaned = body.replace(BODY_ARTIFACT_TOKEN, "");
    let cleaned = TAG_REGEX.replace_all(&cleaned, "");
    let cleaned = URL_REGEX.replace_all(&cleaned, "");
    let cleaned = WHITESPACE_REGEX.replace_all(&cleaned, " ");
    let cleaned = cleaned.trim();

    let lines: Vec<&str> = cleaned.split('\n').collect();
    if lines.len() > MAX_DESCRIPTION_LINES {
        format!(
            "{}{}",
            lines[..MAX_DESCRIPTION_LINES].join("\n"),
            DESCRIPTION_ELLIPSIS
        )
    } else {
        cleaned.to_string()
    }
}
