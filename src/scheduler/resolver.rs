use crate::core::models::{Interval, Occurrence, Recurring, Timetable};
use crate::core::types::{DayOfWeek, RotationWeek};
use crate::extensions::chrono::NaiveDateExt;
use crate::scheduler::calendar::rotation_week;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Lessons and duties active on one date, each sorted by start time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayOccurrences {
    pub date: NaiveDate,
    pub rotation: RotationWeek,
    pub lessons: Vec<Occurrence>,
    pub duties: Vec<Occurrence>,
}

impl DayOccurrences {
    /// Every lesson and duty interval, unmerged and unfiltered.
    pub fn occupied_intervals(&self) -> Vec<Interval> {
        occupied_intervals(self.lessons.iter().chain(self.duties.iter()))
    }
}

pub fn occupied_intervals<'a>(items: impl IntoIterator<Item = &'a Occurrence>) -> Vec<Interval> {
    items.into_iter().map(Occurrence::interval).collect()
}

/// Pure function of `(timetable, date)`.
pub fn occurrences_for_date(timetable: &Timetable, date: NaiveDate) -> DayOccurrences {
    let rotation = rotation_week(date, timetable.rotation_anchor_date);
    DayOccurrences {
        date,
        rotation,
        lessons: resolve(&timetable.lessons, date, rotation),
        duties: resolve(&timetable.duties, date, rotation),
    }
}

pub fn lessons_for_week(
    timetable: &Timetable,
    week_days: &[NaiveDate],
) -> BTreeMap<DayOfWeek, Vec<Occurrence>> {
    by_weekday(week_days, |date| {
        resolve(
            &timetable.lessons,
            date,
            rotation_week(date, timetable.rotation_anchor_date),
        )
    })
}

pub fn duties_for_week(
    timetable: &Timetable,
    week_days: &[NaiveDate],
) -> BTreeMap<DayOfWeek, Vec<Occurrence>> {
    by_weekday(week_days, |date| {
        resolve(
            &timetable.duties,
            date,
            rotation_week(date, timetable.rotation_anchor_date),
        )
    })
}

fn by_weekday(
    week_days: &[NaiveDate],
    resolve_day: impl Fn(NaiveDate) -> Vec<Occurrence>,
) -> BTreeMap<DayOfWeek, Vec<Occurrence>> {
    let mut out: BTreeMap<DayOfWeek, Vec<Occurrence>> = BTreeMap::new();
    for date in week_days {
        out.entry(date.day_of_week())
            .or_default()
            .extend(resolve_day(*date));
    }
    out
}

fn resolve<R: Recurring>(items: &[R], date: NaiveDate, week: RotationWeek) -> Vec<Occurrence> {
    let weekday = date.day_of_week();
    let mut out: Vec<Occurrence> = items
        .iter()
        .filter(|item| item.weekday() == weekday && item.rotation().is_active_in(week))
        .map(|item| item.occurrence_on(date))
        .collect();
    // stable: ties keep declaration order
    out.sort_by_key(|o| o.start_time);
    out
}
