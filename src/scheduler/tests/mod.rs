mod calendar_tests;

use crate::core::models::{Duty, RecurringLesson, Slot, Task, Timetable};
use crate::core::types::{DayOfWeek, Priority, RotationTag, TimeOfDay};
use chrono::{NaiveDate, TimeZone, Utc};

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Monday of the anchor week used across these tests.
pub(super) fn anchor_monday() -> NaiveDate {
    date(2024, 3, 4)
}

pub(super) fn time(s: &str) -> TimeOfDay {
    TimeOfDay::try_from_str(s).unwrap()
}

pub(super) fn lesson(
    class_id: &str,
    weekday: DayOfWeek,
    start: &str,
    end: &str,
    rotation: RotationTag,
) -> RecurringLesson {
    RecurringLesson {
        class_id: class_id.to_string(),
        weekday,
        start_time: time(start),
        end_time: time(end),
        rotation,
    }
}

pub(super) fn duty(label: &str, weekday: DayOfWeek, start: &str, end: &str) -> Duty {
    Duty {
        label: label.to_string(),
        weekday,
        start_time: time(start),
        end_time: time(end),
        rotation: RotationTag::EveryWeek,
    }
}

/// Math twice on Monday morning, Physics on week B, yard duty on Tuesday.
pub(super) fn sample_timetable() -> Timetable {
    Timetable {
        lessons: vec![
            lesson("math", DayOfWeek::Mon, "10:00", "11:00", RotationTag::EveryWeek),
            lesson("math", DayOfWeek::Mon, "9:00", "10:00", RotationTag::EveryWeek),
            lesson("physics", DayOfWeek::Mon, "11:00", "12:00", RotationTag::B),
            lesson("art", DayOfWeek::Wed, "13:00", "14:30", RotationTag::A),
        ],
        duties: vec![duty("yard", DayOfWeek::Tue, "10:00", "10:15")],
        rotation_anchor_date: Some(anchor_monday()),
        ..Timetable::default()
    }
}

pub(super) fn task(id: i64, priority: Priority, minute: u32) -> Task {
    let created = Utc.with_ymd_and_hms(2024, 3, 1, 7, minute, 0).unwrap();
    Task::new(id, format!("task {id}"), priority, created)
}

pub(super) fn slot(day: NaiveDate, start: u32, end: u32) -> Slot {
    Slot::new(day, start, end)
}
