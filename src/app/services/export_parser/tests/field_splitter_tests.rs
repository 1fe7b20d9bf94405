//! Tests for splitting logical records into fields

use crate::Error;
use crate::app::services::export_parser::field_splitter::{split_fields, split_record};

#[test]
fn test_plain_quoted_fields() {
    let fields = split_fields(r#""会議","2025/8/6","13:00:00","2025/8/6","14:00:00","本文""#);
    assert_eq!(
        fields,
        vec!["会議", "2025/8/6", "13:00:00", "2025/8/6", "14:00:00", "本文"]
    );
}

#[test]
fn test_escaped_quotes_become_literal() {
    let fields = split_fields(r#""He said ""hi""",b"#);
    assert_eq!(fields[0], r#"He said "hi""#);
    assert_eq!(fields[1], "b");
}

#[test]
fn test_comma_inside_quotes_is_literal() {
    let fields = split_fields(r#""a, b",c"#);
    assert_eq!(fields, vec!["a, b", "c"]);
}

#[test]
fn test_fields_are_trimmed() {
    let fields = split_fields(r#"  x  , "y" ,z "#);
    assert_eq!(fields, vec!["x", "y", "z"]);
}

#[test]
fn test_trailing_empty_field_is_kept() {
    let fields = split_fields("a,b,");
    assert_eq!(fields, vec!["a", "b", ""]);
}

#[test]
fn test_multiline_body_survives_splitting() {
    let record = "\"s\",\"2025/8/6\",\"13:00:00\",\"2025/8/6\",\"14:00:00\",\"line1\nline2, with comma\"";
    let raw = split_record(record).unwrap();
    assert_eq!(raw.body, "line1\nline2, with comma");
}

#[test]
fn test_short_record_is_rejected() {
    let result = split_record(r#""s","2025/8/6","13:00:00""#);
    assert!(matches!(result, Err(Error::RecordFormat { .. })));
}

#[test]
fn test_extra_fields_are_ignored() {
    let raw = split_record(r#"s,2025/8/6,13:00:00,2025/8/6,14:00:00,body,extra"#).unwrap();
    assert_eq!(raw.body, "body");
}
