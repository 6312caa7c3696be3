// src/services/opening_hours.rs
// DOCUMENTATION: Opening-hours evaluator
// PURPOSE: Classify a place as open/closed from its serialized weekly schedule
//
// Pure and stateless: callers re-evaluate on every render tick.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

use crate::models::DayKey;

/// Last minute of the day (23:59); an interval ending here is shown as
/// "Open now" without an "until" suffix
pub const END_OF_DAY_MINUTE: u32 = 23 * 60 + 59;

/// Current status of a place
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpeningStatus {
    /// No usable schedule for today
    Unknown,
    /// Closed all day today
    Closed,
    /// Open around the clock today
    OpenAllDay,
    /// Open now; `until` is None when the interval runs to end of day
    Open { until: Option<String> },
    /// Outside today's interval
    ClosedUntil { opens: String },
}

impl OpeningStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, OpeningStatus::OpenAllDay | OpeningStatus::Open { .. })
    }

    /// Style class used by the listing cards
    pub fn css_class(&self) -> &'static str {
        match self {
            OpeningStatus::Unknown => "unknown",
            OpeningStatus::Closed | OpeningStatus::ClosedUntil { .. } => "closed",
            OpeningStatus::OpenAllDay => "allday",
            OpeningStatus::Open { .. } => "open",
        }
    }
}

impl fmt::Display for OpeningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpeningStatus::Unknown => write!(f, "Hours unknown"),
            OpeningStatus::Closed => write!(f, "Closed now"),
            OpeningStatus::OpenAllDay => write!(f, "Open 24/7"),
            OpeningStatus::Open { until: None } => write!(f, "Open now"),
            OpeningStatus::Open { until: Some(close) } => write!(f, "Open now · until {}", close),
            OpeningStatus::ClosedUntil { opens } => write!(f, "Closed · opens {}", opens),
        }
    }
}

/// Stored shape of one day; every field may be missing or null
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DayEntry {
    #[serde(default)]
    closed: Option<bool>,
    #[serde(default)]
    all_day: Option<bool>,
    #[serde(default)]
    open: Option<String>,
    #[serde(default)]
    close: Option<String>,
}

/// "HH:MM" to minutes since midnight
/// Hour 0-23 and minute 0-59, one or two digits each
pub fn parse_minutes(hhmm: &str) -> Option<u32> {
    let (hours, minutes) = hhmm.trim().split_once(':')?;
    let valid = |part: &str| (1..=2).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit());
    if !valid(hours) || !valid(minutes) {
        return None;
    }

    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Whether `current` falls inside [start, end], wrapping past midnight
/// when start > end
pub fn in_interval(start: u32, end: u32, current: u32) -> bool {
    if start <= end {
        start <= current && current <= end
    } else {
        current >= start || current <= end
    }
}

/// Evaluate `schedule_json` at the local wall-clock instant `at`
/// DOCUMENTATION: Never fails; anything unusable yields `Unknown`.
/// Only today's entry is decoded, so a malformed entry for another day
/// does not affect the result.
pub fn evaluate(schedule_json: Option<&str>, at: NaiveDateTime) -> OpeningStatus {
    let Some(raw) = schedule_json else {
        return OpeningStatus::Unknown;
    };

    let schedule: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            log::debug!("Unparsable opening hours: {}", e);
            return OpeningStatus::Unknown;
        }
    };

    let key = DayKey::of(&at);
    let Some(entry) = schedule.get(key.as_str()) else {
        return OpeningStatus::Unknown;
    };
    let Ok(day) = DayEntry::deserialize(entry) else {
        return OpeningStatus::Unknown;
    };

    if day.closed.unwrap_or(false) {
        return OpeningStatus::Closed;
    }
    if day.all_day.unwrap_or(false) {
        return OpeningStatus::OpenAllDay;
    }

    let (Some(open), Some(close)) = (day.open, day.close) else {
        return OpeningStatus::Unknown;
    };
    let (Some(start), Some(end)) = (parse_minutes(&open), parse_minutes(&close)) else {
        return OpeningStatus::Unknown;
    };

    let current = at.hour() * 60 + at.minute();
    if in_interval(start, end, current) {
        let until = (end != END_OF_DAY_MINUTE).then_some(close);
        OpeningStatus::Open { until }
    } else {
        OpeningStatus::ClosedUntil { opens: open }
    }
}

/// Evaluate against the local clock
pub fn evaluate_now(schedule_json: Option<&str>) -> OpeningStatus {
    evaluate(schedule_json, Local::now().naive_local())
}
