use crate::core::types::{RotationWeek, TimeOfDay};
use crate::errors::Result;
use crate::extensions::chrono::NaiveDateExt;
use chrono::{Duration, Local, NaiveDate};

/// Days shown for a school week (Monday to Friday).
pub const SCHOOL_DAYS: u32 = 5;

pub struct CalendarView {
    start: NaiveDate,
    days: u32,
}

impl CalendarView {
    /// Default: the school week containing today.
    pub fn new() -> Self {
        Self::week_of(Local::now().date_naive())
    }

    /// Monday to Friday of the week containing `date`.
    pub fn week_of(date: NaiveDate) -> Self {
        Self {
            start: monday_of(date),
            days: SCHOOL_DAYS,
        }
    }

    pub fn with_start_date(mut self, start: NaiveDate) -> Self {
        self.start = start;
        self
    }

    /// Cover `days` consecutive days.
    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    /// Ordered list of dates.
    pub fn days(&self) -> Vec<NaiveDate> {
        (0..self.days)
            .map(|offset| self.start + Duration::days(offset as i64))
            .collect()
    }
}

impl Default for CalendarView {
    fn default() -> Self {
        Self::new()
    }
}

pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date.monday()
}

pub fn week_days(date: NaiveDate) -> Vec<NaiveDate> {
    CalendarView::week_of(date).days()
}

/// Signed whole days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Week 1 for the anchor's week and every second week from it, week 2 for the
/// others. Weeks before the anchor alternate the same way (floored division).
pub fn rotation_week(date: NaiveDate, anchor: Option<NaiveDate>) -> RotationWeek {
    let Some(anchor) = anchor else {
        return RotationWeek::None;
    };
    let weeks = days_between(monday_of(anchor), monday_of(date)).div_euclid(7);
    if weeks.rem_euclid(2) == 0 {
        RotationWeek::One
    } else {
        RotationWeek::Two
    }
}

pub fn time_to_minutes(time: &str) -> Result<u32> {
    TimeOfDay::try_from_str(time).map(TimeOfDay::minutes)
}

pub fn minutes_to_time(minutes: u32) -> Result<String> {
    TimeOfDay::try_from_minutes(minutes).map(|t| t.to_string())
}
