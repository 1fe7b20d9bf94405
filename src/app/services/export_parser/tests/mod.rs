//! Test utilities for export parser testing
//!
//! This module provides sample export text shared by the parser test modules.

// Test modules
mod field_splitter_tests;
mod tokenizer_tests;

/// Header line as written by the calendar export
pub const EXPORT_HEADER: &str = r#""件名","開始日","開始時刻","終了日","終了時刻","内容""#;

/// Helper to create an export with a header and two single-line records
pub fn create_simple_export() -> String {
    format!(
        "{}\n{}\n{}",
        EXPORT_HEADER,
        r#""定例会議","2025/8/6","13:00:00","2025/8/6","14:00:00","会議室: A-101""#,
        r#""設計レビュー","2025/8/7","10:00:00","2025/8/7","11:30:00","Teams で実施""#
    )
}

/// Helper to create an export whose body spans several physical lines
pub fn create_multiline_export() -> String {
    format!(
        "{}\n{}\n{}\n{}\n{}",
        EXPORT_HEADER,
        r#""打合せ","2025/8/6","13:00:00","2025/8/6","14:00:00","各位"#,
        "[[str]]分類コード: PP01",
        r#"優先度: 高[[end]]""#,
        r#""次","2025/8/8","9:00:00","2025/8/8","10:00:00","short""#
    )
}
