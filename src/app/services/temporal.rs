//! Date/time parsing and week windowing
//!
//! Export dates arrive as `YYYY/M/D` and times as `H:MM:SS` or `H:MM`.
//! Both combine into a local wall-clock [`NaiveDateTime`]; no timezone
//! conversion happens anywhere in the pipeline.
//!
//! Week windows use a fixed anchor: week 1 starts on the Monday on or
//! before January 1st of the year, and week `n` starts `(n - 1) * 7` days
//! later. This is not ISO-8601 week numbering. January 1st always falls
//! in week 1 here, whereas ISO may place it in week 52/53 of the prior
//! year, so the two numberings disagree for some years.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::app::models::{RawRecord, WeekWindow};
use crate::constants::{DEFAULT_HOUR, DEFAULT_MINUTE, WEEK_SPAN_DAYS};
use crate::{Error, Result};

/// Parse a `YYYY/M/D` date
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let parts: Vec<&str> = value.trim().split('/').collect();
    if parts.len() != 3 {
        return Err(Error::date_parsing(format!(
            "invalid date '{}' (expected YYYY/M/D)",
            value
        )));
    }

    let parse_part = |part: &str| -> Result<u32> {
        part.trim().parse::<u32>().map_err(|e| {
            Error::date_parsing(format!("invalid date component '{}' in '{}': {}", part, value, e))
        })
    };

    let year = parts[0].trim().parse::<i32>().map_err(|e| {
        Error::date_parsing(format!("invalid year '{}' in '{}': {}", parts[0], value, e))
    })?;
    let month = parse_part(parts[1])?;
    let day = parse_part(parts[2])?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| Error::date_parsing(format!("date '{}' does not exist", value)))
}

/// Parse an `H:MM:SS` or `H:MM` time, falling back to 09:00
///
/// Seconds are accepted but dropped.
pub fn parse_time(value: &str) -> NaiveTime {
    let default = || {
        NaiveTime::from_hms_opt(DEFAULT_HOUR, DEFAULT_MINUTE, 0).unwrap_or(NaiveTime::MIN)
    };

    let parts: Vec<&str> = value.trim().split(':').collect();
    if parts.len() < 2 {
        return default();
    }

    match (
        parts[0].trim().parse::<u32>(),
        parts[1].trim().parse::<u32>(),
    ) {
        (Ok(hour), Ok(minute)) => NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_else(|| {
            debug!("Time '{}' out of range, using default", value);
            default()
        }),
        _ => {
            debug!("Malformed time '{}', using default", value);
            default()
        }
    }
}

/// Combine an export date and time into one timestamp
pub fn combine(date: &str, time: &str) -> Result<NaiveDateTime> {
    Ok(parse_date(date)?.and_time(parse_time(time)))
}

/// Monday of week 1: the Monday on or before January 1st of `year`
///
/// `None` when the anchor falls outside the representable date range.
pub fn first_week_anchor(year: i32) -> Option<NaiveDate> {
    let jan_first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let back = u64::from(jan_first.weekday().num_days_from_monday());
    jan_first.checked_sub_days(Days::new(back))
}

/// Compute the inclusive Monday-to-Sunday window of a (year, week) pair
///
/// `None` when any day of the window is not representable.
pub fn week_window(year: i32, week: u32) -> Option<WeekWindow> {
    let offset = u64::from(week.checked_sub(1)?) * 7;
    let start = first_week_anchor(year)?.checked_add_days(Days::new(offset))?;
    let end = start.checked_add_days(Days::new(WEEK_SPAN_DAYS))?;
    Some(WeekWindow { start, end })
}

/// Outcome of windowing a batch of records
#[derive(Debug, Default)]
pub struct WindowedRecords {
    /// Records whose start date falls inside the window
    pub kept: Vec<RawRecord>,
    /// Number of records outside the window
    pub outside: usize,
    /// Records dropped because their start date did not parse
    pub rejected: Vec<String>,
}

/// Keep only records whose start date lies inside `window`
///
/// The time component is ignored. A record whose start date cannot be
/// parsed is dropped and reported, never fatal to the batch.
pub fn filter_by_window(records: Vec<RawRecord>, window: &WeekWindow) -> WindowedRecords {
    let mut result = WindowedRecords::default();

    for record in records {
        match parse_date(&record.start_date) {
            Ok(date) if window.contains(date) => result.kept.push(record),
            Ok(_) => result.outside += 1,
            Err(e) => {
                debug!("Dropping record '{}': {}", record.subject, e);
                result.rejected.push(format!("{}: {}", record.subject, e));
            }
        }
    }

    debug!(
        "Window {}..={}: {} kept, {} outside, {} rejected",
        window.start,
        window.end,
        result.kept.len(),
        result.outside,
        result.rejected.len()
    );

    result
}
