//! Text ingestion pipeline
//!
//! Chains the export parser, week windowing and event assembly over one
//! export blob. The pipeline is synchronous and pure apart from logging;
//! caching and sourcing belong to the sync orchestrator.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::app::models::{CanonicalEvent, WeekKey};
use crate::app::services::event_assembler::EventAssembler;
use crate::app::services::export_parser::{ExportParser, ParseResult, ParseStats};
use crate::app::services::temporal::filter_by_window;

/// Per-run ingestion statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestStats {
    /// Tokenizer and field splitter statistics
    pub parse: ParseStats,
    /// Records whose start date fell inside the target week
    pub in_window: usize,
    /// Records outside the target week
    pub outside_window: usize,
    /// Records dropped because their start date did not parse
    pub dates_rejected: usize,
    /// Events produced by the assembler
    pub events_assembled: usize,
    /// Per-record failures after parsing
    pub errors: Vec<String>,
}

impl IngestStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records dropped anywhere in the pipeline
    pub fn total_dropped(&self) -> usize {
        self.parse.records_skipped
            + self.dates_rejected
            + self.in_window.saturating_sub(self.events_assembled)
    }
}

/// Parser and assembler chained for one target week
#[derive(Debug, Clone)]
pub struct IngestionPipeline {
    parser: ExportParser,
    assembler: EventAssembler,
}

impl IngestionPipeline {
    pub fn new(assembler: EventAssembler) -> Self {
        Self {
            parser: ExportParser::new(),
            assembler,
        }
    }

    pub fn assembler(&self) -> &EventAssembler {
        &self.assembler
    }

    /// Run export text through every stage for `week`
    ///
    /// Never fails: malformed records, unparseable dates and records
    /// outside the window are counted in the returned stats and dropped.
    pub fn run(
        &self,
        text: &str,
        week: &WeekKey,
        employee_number: &str,
    ) -> (Vec<CanonicalEvent>, IngestStats) {
        self.normalize(self.parse(text), week, employee_number)
    }

    /// Tokenize and split export text into raw records
    pub fn parse(&self, text: &str) -> ParseResult {
        self.parser.parse_text(text)
    }

    /// Window parsed records to `week` and assemble canonical events
    pub fn normalize(
        &self,
        parsed: ParseResult,
        week: &WeekKey,
        employee_number: &str,
    ) -> (Vec<CanonicalEvent>, IngestStats) {
        let mut stats = IngestStats::new();
        stats.parse = parsed.stats;

        let window = week.window();
        let windowed = filter_by_window(parsed.records, &window);
        stats.in_window = windowed.kept.len();
        stats.outside_window = windowed.outside;
        stats.dates_rejected = windowed.rejected.len();
        stats.errors.extend(windowed.rejected);

        let mut events = Vec::with_capacity(windowed.kept.len());
        for record in &windowed.kept {
            match self.assembler.assemble(record, employee_number) {
                Ok(event) => events.push(event),
                Err(e) => {
                    warn!("Dropping record '{}': {}", record.subject, e);
                    stats.errors.push(format!("{}: {}", record.subject, e));
                }
            }
        }
        stats.events_assembled = events.len();

        info!(
            "Ingested {} events for {} ({} in window, {} outside, {} dropped)",
            stats.events_assembled,
            week,
            stats.in_window,
            stats.outside_window,
            stats.total_dropped()
        );

        (events, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::equipment_registry::EquipmentRegistry;
    use crate::app::services::event_assembler::EventIdGenerator;
    use std::sync::Arc;

    const HEADER: &str = "\"件名\",\"開始日\",\"開始時刻\",\"終了日\",\"終了時刻\",\"内容\"";

    fn pipeline() -> IngestionPipeline {
        IngestionPipeline::new(EventAssembler::new(
            Arc::new(EquipmentRegistry::with_defaults()),
            Arc::new(EventIdGenerator::new()),
        ))
    }

    #[test]
    fn test_run_counts_every_drop_reason() {
        let text = format!(
            "{}\n{}\n{}\n{}\n{}\n",
            HEADER,
            "\"in\",\"2025/8/5\",\"10:00:00\",\"2025/8/5\",\"11:00:00\",\"[[str]]分類コード: PP02[[end]]\"",
            "\"out\",\"2025/9/1\",\"10:00:00\",\"2025/9/1\",\"11:00:00\",\"\"",
            "\"bad date\",\"yesterday\",\"10:00:00\",\"2025/8/5\",\"11:00:00\",\"\"",
            "\"bad end\",\"2025/8/6\",\"10:00:00\",\"later\",\"11:00:00\",\"\"",
        );
        let week = WeekKey::new(2025, 32).unwrap();

        let (events, stats) = pipeline().run(&text, &week, "338782");

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].subject, "in");
        assert_eq!(events[0].activity_code, "PP02");
        assert_eq!(events[0].employee_number, "338782");
        assert_eq!(stats.parse.total_records, 4);
        assert_eq!(stats.in_window, 2);
        assert_eq!(stats.outside_window, 1);
        assert_eq!(stats.dates_rejected, 1);
        assert_eq!(stats.events_assembled, 1);
        assert_eq!(stats.errors.len(), 2);
        assert_eq!(stats.total_dropped(), 2);
    }

    #[test]
    fn test_run_on_header_only() {
        let week = WeekKey::new(2025, 1).unwrap();
        let (events, stats) = pipeline().run(HEADER, &week, "");
        assert!(events.is_empty());
        assert_eq!(stats.parse.total_records, 0);
    }
}
