//! Tests for body heuristics

use crate::app::services::event_assembler::{
    clean_description, extract_attendees, extract_location,
};

#[test]
fn test_location_from_room_label() {
    assert_eq!(extract_location("場所 会議室: A-101 です"), "A-101");
    assert_eq!(extract_location("会議室：B2"), "B2");
}

#[test]
fn test_location_online_keyword() {
    assert_eq!(extract_location("Microsoft Teams 会議に参加"), "オンライン");
}

#[test]
fn test_room_label_wins_over_online_keyword() {
    assert_eq!(extract_location("Teams 併用 会議室: C3"), "C3");
}

#[test]
fn test_location_empty_when_not_found() {
    assert_eq!(extract_location("nothing useful"), "");
}

#[test]
fn test_attendees_are_deduplicated() {
    let attendees = extract_attendees("各位 田中さん、佐藤さん、田中さん");
    let names: Vec<&str> = attendees.iter().map(String::as_str).collect();
    assert_eq!(attendees.len(), 3);
    assert!(names.contains(&"各位"));
    assert!(names.contains(&"田中"));
    assert!(names.contains(&"佐藤"));
}

#[test]
fn test_no_attendees() {
    assert!(extract_attendees("hello").is_empty());
}

#[test]
fn test_clean_description_strips_noise() {
    let body = "@@EH________0000000::O::O_000::O_Z0@@<p>Agenda</p>\n  see https://example.com/x   now";
    assert_eq!(clean_description(body), "Agenda see now");
}

#[test]
fn test_clean_description_plain_text_unchanged() {
    assert_eq!(clean_description("  short note  "), "short note");
}
