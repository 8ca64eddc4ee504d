use super::{anchor_monday, date};
use crate::core::types::RotationWeek;
use crate::scheduler::calendar::{
    CalendarView, days_between, minutes_to_time, monday_of, rotation_week, time_to_minutes,
    week_days,
};
use chrono::{Datelike, Duration, Weekday};
use proptest::prelude::*;

#[test]
fn monday_of_handles_week_edges() {
    assert_eq!(monday_of(date(2024, 3, 4)), date(2024, 3, 4));
    assert_eq!(monday_of(date(2024, 3, 10)), date(2024, 3, 4));
    assert_eq!(monday_of(date(2024, 3, 6)), date(2024, 3, 4));
    // across a year boundary
    assert_eq!(monday_of(date(2025, 1, 1)), date(2024, 12, 30));
}

#[test]
fn week_days_are_monday_to_friday() {
    let days = week_days(date(2024, 3, 7));
    assert_eq!(days.len(), 5);
    assert_eq!(days[0], date(2024, 3, 4));
    assert_eq!(days[4], date(2024, 3, 8));
    assert_eq!(days[4].weekday(), Weekday::Fri);
}

#[test]
fn calendar_view_builder_covers_requested_range() {
    let days = CalendarView::week_of(date(2024, 3, 9))
        .with_start_date(date(2024, 3, 2))
        .with_days(3)
        .days();
    assert_eq!(days, vec![date(2024, 3, 2), date(2024, 3, 3), date(2024, 3, 4)]);
    assert_eq!(CalendarView::new().days().len(), 5);
}

#[test]
fn days_between_is_signed() {
    assert_eq!(days_between(date(2024, 3, 4), date(2024, 3, 11)), 7);
    assert_eq!(days_between(date(2024, 3, 11), date(2024, 3, 4)), -7);
}

#[test]
fn rotation_week_alternates_from_anchor() {
    let anchor = Some(anchor_monday());
    assert_eq!(rotation_week(date(2024, 3, 4), anchor), RotationWeek::One);
    assert_eq!(rotation_week(date(2024, 3, 8), anchor), RotationWeek::One);
    assert_eq!(rotation_week(date(2024, 3, 11), anchor), RotationWeek::Two);
    assert_eq!(rotation_week(date(2024, 3, 18), anchor), RotationWeek::One);
    // weeks before the anchor keep alternating
    assert_eq!(rotation_week(date(2024, 2, 26), anchor), RotationWeek::Two);
    assert_eq!(rotation_week(date(2024, 2, 19), anchor), RotationWeek::One);
    assert_eq!(rotation_week(date(2024, 3, 4), None), RotationWeek::None);
}

#[test]
fn mid_week_anchor_counts_its_whole_week() {
    let anchor = Some(date(2024, 3, 6));
    assert_eq!(rotation_week(date(2024, 3, 4), anchor), RotationWeek::One);
    assert_eq!(rotation_week(date(2024, 3, 10), anchor), RotationWeek::One);
    assert_eq!(rotation_week(date(2024, 3, 11), anchor), RotationWeek::Two);
}

#[test]
fn converts_times_and_minutes() {
    assert_eq!(time_to_minutes("9:50").unwrap(), 590);
    assert_eq!(time_to_minutes("00:00").unwrap(), 0);
    assert!(time_to_minutes("9.50").is_err());
    assert_eq!(minutes_to_time(590).unwrap(), "9:50");
    assert_eq!(minutes_to_time(1440).unwrap(), "24:00");
    assert!(minutes_to_time(1441).is_err());
}

proptest! {
    #[test]
    fn rotation_is_stable_within_a_week(offset in -2000i64..2000i64, day in 0i64..7i64) {
        let anchor = Some(anchor_monday());
        let d = anchor_monday() + Duration::days(offset);
        let same_week = monday_of(d) + Duration::days(day);
        prop_assert_eq!(rotation_week(d, anchor), rotation_week(same_week, anchor));
    }

    #[test]
    fn rotation_flips_every_seven_days(offset in -2000i64..2000i64) {
        let anchor = Some(anchor_monday());
        let d = anchor_monday() + Duration::days(offset);
        let next = d + Duration::days(7);
        prop_assert_ne!(rotation_week(d, anchor), rotation_week(next, anchor));
    }
}
