use crate::core::models::{FreePeriod, Interval};
use chrono::NaiveDate;

pub const DEFAULT_MIN_FREE_MINUTES: u32 = 30;

/// Gaps of at least `min_duration` minutes inside `[day_start, day_end)` not
/// covered by any occupied interval. Single sweep; the cursor never moves
/// backwards, so overlapping or nested intervals are handled.
pub fn free_intervals(
    occupied: &[Interval],
    day_start: u32,
    day_end: u32,
    min_duration: u32,
) -> Vec<Interval> {
    let mut busy: Vec<Interval> = occupied.iter().filter(|i| !i.is_empty()).copied().collect();
    busy.sort_by_key(|i| i.start);

    let mut out = Vec::new();
    let mut cursor = day_start;
    for interval in busy {
        if cursor >= day_end {
            break;
        }
        let gap_end = interval.start.min(day_end);
        if cursor < gap_end && gap_end - cursor >= min_duration {
            out.push(Interval::new(cursor, gap_end));
        }
        cursor = cursor.max(interval.end);
    }
    if cursor < day_end && day_end - cursor >= min_duration {
        out.push(Interval::new(cursor, day_end));
    }
    out
}

pub fn free_periods(
    date: NaiveDate,
    occupied: &[Interval],
    day_start: u32,
    day_end: u32,
    min_duration: u32,
) -> Vec<FreePeriod> {
    free_intervals(occupied, day_start, day_end, min_duration)
        .into_iter()
        .map(|gap| FreePeriod::new(date, gap.start, gap.end))
        .collect()
}
