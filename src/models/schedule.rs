// src/models/schedule.rs
// DOCUMENTATION: Weekly opening-hours data structures
// PURPOSE: Weekday keys, per-day schedule and the form-side builder that
// produces the `openingHoursJson` blob stored on a place

use chrono::{Datelike, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

pub const DEFAULT_OPEN: &str = "09:00";
pub const DEFAULT_CLOSE: &str = "18:00";
pub const START_OF_DAY: &str = "00:00";
pub const END_OF_DAY: &str = "23:59";

/// Weekday key used in the serialized schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKey {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl DayKey {
    /// Evaluation order: index = days since Sunday (Sun=0 .. Sat=6)
    pub const SUNDAY_FIRST: [DayKey; 7] = [
        DayKey::Sun,
        DayKey::Mon,
        DayKey::Tue,
        DayKey::Wed,
        DayKey::Thu,
        DayKey::Fri,
        DayKey::Sat,
    ];

    /// Form order, also the serialization order
    pub const MONDAY_FIRST: [DayKey; 7] = [
        DayKey::Mon,
        DayKey::Tue,
        DayKey::Wed,
        DayKey::Thu,
        DayKey::Fri,
        DayKey::Sat,
        DayKey::Sun,
    ];

    pub fn from_weekday(weekday: Weekday) -> Self {
        Self::SUNDAY_FIRST[weekday.num_days_from_sunday() as usize]
    }

    pub fn of(at: &NaiveDateTime) -> Self {
        Self::from_weekday(at.weekday())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayKey::Sun => "sun",
            DayKey::Mon => "mon",
            DayKey::Tue => "tue",
            DayKey::Wed => "wed",
            DayKey::Thu => "thu",
            DayKey::Fri => "fri",
            DayKey::Sat => "sat",
        }
    }

    /// Short label shown next to the day's inputs
    pub fn label(&self) -> &'static str {
        match self {
            DayKey::Sun => "Sun",
            DayKey::Mon => "Mon",
            DayKey::Tue => "Tue",
            DayKey::Wed => "Wed",
            DayKey::Thu => "Thu",
            DayKey::Fri => "Fri",
            DayKey::Sat => "Sat",
        }
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self, DayKey::Sat | DayKey::Sun)
    }

    fn form_index(&self) -> usize {
        // MONDAY_FIRST is a permutation of every variant
        Self::MONDAY_FIRST
            .iter()
            .position(|d| d == self)
            .unwrap_or_default()
    }
}

/// One day of a weekly schedule
/// DOCUMENTATION: `closed` and `all_day` exclude each other; go through
/// `set_closed` / `set_all_day` to keep that true
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub closed: bool,
    pub all_day: bool,
    pub open: String,
    pub close: String,
}

impl Default for DaySchedule {
    fn default() -> Self {
        Self::hours(DEFAULT_OPEN, DEFAULT_CLOSE)
    }
}

impl DaySchedule {
    pub fn hours(open: &str, close: &str) -> Self {
        Self {
            closed: false,
            all_day: false,
            open: open.to_string(),
            close: close.to_string(),
        }
    }

    pub fn closed() -> Self {
        let mut day = Self::default();
        day.set_closed(true);
        day
    }

    pub fn all_day() -> Self {
        let mut day = Self::default();
        day.set_all_day(true);
        day
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
        if closed {
            self.all_day = false;
        }
    }

    /// Turning all-day on also spans the times over the whole day
    pub fn set_all_day(&mut self, all_day: bool) {
        self.all_day = all_day;
        if all_day {
            self.closed = false;
            self.open = START_OF_DAY.to_string();
            self.close = END_OF_DAY.to_string();
        }
    }

    /// Whether the open/close inputs apply
    pub fn editable(&self) -> bool {
        !self.closed && !self.all_day
    }
}

/// Opening hours for a full week
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub mon: DaySchedule,
    pub tue: DaySchedule,
    pub wed: DaySchedule,
    pub thu: DaySchedule,
    pub fri: DaySchedule,
    pub sat: DaySchedule,
    pub sun: DaySchedule,
}

impl WeeklySchedule {
    pub fn day(&self, key: DayKey) -> &DaySchedule {
        match key {
            DayKey::Mon => &self.mon,
            DayKey::Tue => &self.tue,
            DayKey::Wed => &self.wed,
            DayKey::Thu => &self.thu,
            DayKey::Fri => &self.fri,
            DayKey::Sat => &self.sat,
            DayKey::Sun => &self.sun,
        }
    }

    pub fn day_mut(&mut self, key: DayKey) -> &mut DaySchedule {
        match key {
            DayKey::Mon => &mut self.mon,
            DayKey::Tue => &mut self.tue,
            DayKey::Wed => &mut self.wed,
            DayKey::Thu => &mut self.thu,
            DayKey::Fri => &mut self.fri,
            DayKey::Sat => &mut self.sat,
            DayKey::Sun => &mut self.sun,
        }
    }

    /// Every day open around the clock
    pub fn preset_24_7() -> Self {
        let mut schedule = Self::default();
        for key in DayKey::MONDAY_FIRST {
            *schedule.day_mut(key) = DaySchedule::all_day();
        }
        schedule
    }

    /// Weekdays open `open`-`close`, weekend closed
    pub fn preset_week(open: &str, close: &str) -> Self {
        let mut schedule = Self::default();
        for key in DayKey::MONDAY_FIRST {
            let mut day = DaySchedule::hours(open, close);
            day.set_closed(key.is_weekend());
            *schedule.day_mut(key) = day;
        }
        schedule
    }

    /// Back to the default hours on every day
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn copy_to_all(&mut self, source: DayKey) {
        let template = self.day(source).clone();
        for key in DayKey::MONDAY_FIRST {
            if key != source {
                *self.day_mut(key) = template.clone();
            }
        }
    }

    /// Copy onto the following day in form order; no-op on the last day
    pub fn copy_to_next(&mut self, source: DayKey) {
        let Some(&next) = DayKey::MONDAY_FIRST.get(source.form_index() + 1) else {
            return;
        };
        *self.day_mut(next) = self.day(source).clone();
    }

    /// Serialized blob for the `openingHoursJson` field
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_day_key_alignment() {
        // 2024-06-02 is a Sunday
        let sunday = NaiveDate::from_ymd_opt(2024, 6, 2)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(DayKey::of(&sunday), DayKey::Sun);
        assert_eq!(DayKey::from_weekday(Weekday::Mon), DayKey::Mon);
        assert_eq!(DayKey::from_weekday(Weekday::Sat), DayKey::Sat);
        assert_eq!(DayKey::Tue.as_str(), "tue");
    }

    #[test]
    fn test_closed_and_all_day_exclude_each_other() {
        let mut day = DaySchedule::default();
        day.set_all_day(true);
        assert!(day.all_day);
        assert_eq!((day.open.as_str(), day.close.as_str()), ("00:00", "23:59"));
        assert!(!day.editable());

        day.set_closed(true);
        assert!(day.closed);
        assert!(!day.all_day);

        day.set_all_day(true);
        assert!(!day.closed);
    }

    #[test]
    fn test_preset_week() {
        let schedule = WeeklySchedule::preset_week("10:00", "19:00");
        assert_eq!(schedule.mon, DaySchedule::hours("10:00", "19:00"));
        assert!(schedule.sat.closed);
        assert!(schedule.sun.closed);
        assert_eq!(schedule.sun.open, "10:00");
    }

    #[test]
    fn test_copy_helpers() {
        let mut schedule = WeeklySchedule::default();
        *schedule.day_mut(DayKey::Wed) = DaySchedule::hours("07:30", "22:00");

        schedule.copy_to_next(DayKey::Wed);
        assert_eq!(schedule.thu, DaySchedule::hours("07:30", "22:00"));
        assert_eq!(schedule.fri, DaySchedule::default());

        let before = schedule.clone();
        schedule.copy_to_next(DayKey::Sun);
        assert_eq!(schedule, before);

        schedule.copy_to_all(DayKey::Wed);
        for key in DayKey::MONDAY_FIRST {
            assert_eq!(schedule.day(key), &DaySchedule::hours("07:30", "22:00"));
        }

        schedule.clear();
        assert_eq!(schedule, WeeklySchedule::default());
    }

    #[test]
    fn test_to_json_shape() {
        let json = WeeklySchedule::preset_24_7().to_json().unwrap();
        assert!(json.starts_with(r#"{"mon":{"closed":false,"allDay":true,"open":"00:00","close":"23:59"}"#));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 7);
    }
}
