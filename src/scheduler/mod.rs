use crate::core::models::{FreePeriod, Occurrence, Timetable};
use crate::core::types::{DayOfWeek, OverlapPolicy, RotationWeek};
use crate::extensions::chrono::NaiveDateExt;
use crate::logging::{LogTarget, Logger};
use crate::scheduler::calendar::CalendarView;
use crate::scheduler::free_periods::{DEFAULT_MIN_FREE_MINUTES, free_periods};
use crate::scheduler::merge::{LessonBlock, merge_consecutive};
use crate::scheduler::overlap::{OverlapPolicyHandler, find_overlaps, make_overlap_handler};
use crate::scheduler::resolver::occurrences_for_date;
use chrono::NaiveDate;

pub mod calendar;
pub mod comparator;
pub mod free_periods;
pub mod merge;
pub mod overlap;
pub mod resolver;
pub mod slots;
#[cfg(test)]
mod tests;

/// Observer to capture planning events (e.g., for logging).
pub trait PlanObserver {
    fn day_planned(&self, plan: &DayPlan);
    fn overlap_detected(&self, first: &Occurrence, second: &Occurrence, policy: OverlapPolicy);
    fn rotation_fallback(&self, date: NaiveDate);
}

pub struct LoggerObserver {
    logger: Logger,
}

impl LoggerObserver {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl PlanObserver for LoggerObserver {
    fn day_planned(&self, plan: &DayPlan) {
        self.logger.info(
            format!(
                "Planned {} ({}): {} lesson(s) in {} block(s), {} duty(ies), {} free period(s)",
                plan.date,
                plan.weekday,
                plan.lessons.len(),
                plan.blocks.len(),
                plan.duties.len(),
                plan.free_periods.len()
            ),
            LogTarget::FileOnly,
        );
    }

    fn overlap_detected(&self, first: &Occurrence, second: &Occurrence, policy: OverlapPolicy) {
        let outcome = match policy {
            OverlapPolicy::RenderBoth => "showing both",
            OverlapPolicy::FirstWins => "hiding the later one",
        };
        self.logger.warn(
            format!("Overlapping lessons: {} and {}; {}", first, second, outcome),
            LogTarget::FileOnly,
        );
    }

    fn rotation_fallback(&self, date: NaiveDate) {
        self.logger.warn(
            format!(
                "Timetable has week A/B lessons but no rotation anchor; treating them as every week on {}",
                date
            ),
            LogTarget::FileOnly,
        );
    }
}

/// Everything the day view needs for one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub weekday: DayOfWeek,
    pub rotation: RotationWeek,
    /// Every resolved lesson, sorted by start time.
    pub lessons: Vec<Occurrence>,
    pub duties: Vec<Occurrence>,
    /// Display blocks after the overlap policy and the merge pass.
    pub blocks: Vec<LessonBlock>,
    /// Gaps computed from all lessons and duties, unmerged.
    pub free_periods: Vec<FreePeriod>,
    /// Index pairs into `lessons`.
    pub overlaps: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekPlan {
    pub monday: NaiveDate,
    pub days: Vec<DayPlan>,
}

impl WeekPlan {
    pub fn day(&self, date: NaiveDate) -> Option<&DayPlan> {
        self.days.iter().find(|d| d.date == date)
    }

    pub fn weekday(&self, weekday: DayOfWeek) -> Option<&DayPlan> {
        self.days.iter().find(|d| d.weekday == weekday)
    }

    pub fn free_periods(&self) -> impl Iterator<Item = &FreePeriod> {
        self.days.iter().flat_map(|d| d.free_periods.iter())
    }
}

pub struct WeekPlanner<'a> {
    timetable: &'a Timetable,
    min_free_minutes: u32,
    policy: OverlapPolicy,
    overlap: Box<dyn OverlapPolicyHandler>,
    observer: Box<dyn PlanObserver + 'a>,
}

impl<'a> WeekPlanner<'a> {
    pub fn new(timetable: &'a Timetable, logger: &Logger) -> Self {
        let policy = OverlapPolicy::default();
        Self {
            timetable,
            min_free_minutes: DEFAULT_MIN_FREE_MINUTES,
            policy,
            overlap: make_overlap_handler(policy),
            observer: Box::new(LoggerObserver::new(logger.clone())),
        }
    }

    pub fn with_min_free_minutes(mut self, minutes: u32) -> Self {
        self.min_free_minutes = minutes;
        self
    }

    pub fn with_overlap_policy(mut self, policy: OverlapPolicy) -> Self {
        self.policy = policy;
        self.overlap = make_overlap_handler(policy);
        self
    }

    pub fn with_observer(mut self, observer: Box<dyn PlanObserver + 'a>) -> Self {
        self.observer = observer;
        self
    }

    /// Resolve → overlap policy → merge for display; free periods always come
    /// from the unmerged, unfiltered occupancy.
    pub fn plan_day(&self, date: NaiveDate) -> DayPlan {
        let day = occurrences_for_date(self.timetable, date);

        if day.rotation == RotationWeek::None && self.timetable.has_rotation_tags() {
            self.observer.rotation_fallback(date);
        }

        let overlaps = find_overlaps(&day.lessons);
        for (i, j) in &overlaps {
            self.observer
                .overlap_detected(&day.lessons[*i], &day.lessons[*j], self.policy);
        }

        let shown = self.overlap.handle(day.lessons.clone());
        let blocks = merge_consecutive(&shown);

        let bounds = &self.timetable.day_bounds;
        let free = free_periods(
            date,
            &day.occupied_intervals(),
            bounds.start_minutes(),
            bounds.end_minutes(),
            self.min_free_minutes,
        );

        let plan = DayPlan {
            date,
            weekday: date.day_of_week(),
            rotation: day.rotation,
            lessons: day.lessons,
            duties: day.duties,
            blocks,
            free_periods: free,
            overlaps,
        };
        self.observer.day_planned(&plan);
        plan
    }

    pub fn plan_days(&self, days: &[NaiveDate]) -> Vec<DayPlan> {
        days.iter().map(|date| self.plan_day(*date)).collect()
    }

    /// Monday to Friday of the week containing `date`.
    pub fn plan_week(&self, date: NaiveDate) -> WeekPlan {
        let days = CalendarView::week_of(date).days();
        WeekPlan {
            monday: date.monday(),
            days: self.plan_days(&days),
        }
    }
}
