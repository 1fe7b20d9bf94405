//! Tests for logical record tokenization

use super::*;
use crate::app::services::export_parser::tokenizer::{LogicalRecords, split_logical_records};

#[test]
fn test_header_is_discarded() {
    let records = split_logical_records(&create_simple_export());
    assert_eq!(records.len(), 2);
    assert!(records[0].starts_with("\"定例会議\""));
    assert!(records.iter().all(|r| !r.contains("開始時刻")));
}

#[test]
fn test_header_only_yields_nothing() {
    assert!(split_logical_records(EXPORT_HEADER).is_empty());
    assert!(split_logical_records("").is_empty());
}

#[test]
fn test_quoted_body_spanning_three_lines_is_one_record() {
    let records = split_logical_records(&create_multiline_export());
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].lines().count(), 3);
    assert!(records[0].contains("[[str]]分類コード: PP01\n優先度: 高[[end]]"));
    assert!(records[1].starts_with("\"次\""));
}

#[test]
fn test_even_quotes_on_one_line_never_split() {
    let text = format!(
        "{}\n{}",
        EXPORT_HEADER, r#""a ""quoted"" b","2025/8/6","13:00:00","2025/8/6","14:00:00","x""#
    );
    let records = split_logical_records(&text);
    assert_eq!(records.len(), 1);
}

#[test]
fn test_unterminated_quote_still_emits_buffer() {
    let text = format!(
        "{}\n{}\nline two",
        EXPORT_HEADER, r#""s","2025/8/6","13:00:00","2025/8/6","14:00:00","open body"#
    );
    let records = split_logical_records(&text);
    assert_eq!(records.len(), 1);
    assert!(records[0].ends_with("open body\nline two"));
}

#[test]
fn test_blank_lines_between_records_are_ignored() {
    let text = format!(
        "{}\n\n{}\n   \n{}\n",
        EXPORT_HEADER,
        r#""a","2025/8/6","13:00:00","2025/8/6","14:00:00","x""#,
        r#""b","2025/8/7","13:00:00","2025/8/7","14:00:00","y""#
    );
    let records = split_logical_records(&text);
    assert_eq!(records.len(), 2);
    assert!(records[1].starts_with("\"b\""));
}

#[test]
fn test_crlf_line_endings() {
    let text = create_simple_export().replace('\n', "\r\n");
    let records = split_logical_records(&text);
    assert_eq!(records.len(), 2);
    assert!(!records[0].ends_with('\r'));
}

#[test]
fn test_iterator_includes_header() {
    let all: Vec<String> = LogicalRecords::new(&create_simple_export()).collect();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0], EXPORT_HEADER);
}
