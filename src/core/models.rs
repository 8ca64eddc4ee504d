use crate::core::types::{
    DayBounds, DayOfWeek, Priority, RotationTag, TimeOfDay, iso_calendar_day, iso_date,
    iso_date_opt,
};
use crate::errors::Result;
use crate::extensions::chrono::NaiveDateExt;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type ClassId = String;
pub type TaskId = i64;

// ==========
// Timetable
// ==========

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringLesson {
    pub class_id: ClassId,
    pub weekday: DayOfWeek,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(default)]
    pub rotation: RotationTag,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Duty {
    #[serde(default)]
    pub label: String,
    pub weekday: DayOfWeek,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(default)]
    pub rotation: RotationTag,
}

/// Shared shape of lessons and duties for occurrence resolution.
pub trait Recurring {
    fn weekday(&self) -> DayOfWeek;
    fn rotation(&self) -> RotationTag;
    fn occurrence_on(&self, date: NaiveDate) -> Occurrence;
}

impl Recurring for RecurringLesson {
    fn weekday(&self) -> DayOfWeek {
        self.weekday
    }
    fn rotation(&self) -> RotationTag {
        self.rotation
    }
    fn occurrence_on(&self, date: NaiveDate) -> Occurrence {
        Occurrence {
            kind: OccurrenceKind::Lesson {
                class_id: self.class_id.clone(),
            },
            date,
            start_time: self.start_time,
            end_time: self.end_time,
            weekday: date.day_of_week(),
        }
    }
}

impl Recurring for Duty {
    fn weekday(&self) -> DayOfWeek {
        self.weekday
    }
    fn rotation(&self) -> RotationTag {
        self.rotation
    }
    fn occurrence_on(&self, date: NaiveDate) -> Occurrence {
        Occurrence {
            kind: OccurrenceKind::Duty {
                label: self.label.clone(),
            },
            date,
            start_time: self.start_time,
            end_time: self.end_time,
            weekday: date.day_of_week(),
        }
    }
}

/// Imported recurring timetable. Replaced wholesale on re-import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timetable {
    #[serde(default)]
    pub classes: Vec<Class>,
    #[serde(default)]
    pub lessons: Vec<RecurringLesson>,
    #[serde(default)]
    pub duties: Vec<Duty>,
    #[serde(default)]
    pub day_bounds: DayBounds,
    #[serde(default, with = "iso_date_opt")]
    pub rotation_anchor_date: Option<NaiveDate>,
}

impl Timetable {
    pub fn class(&self, id: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.id == id)
    }

    pub fn has_rotation_tags(&self) -> bool {
        self.lessons
            .iter()
            .map(|l| l.rotation)
            .chain(self.duties.iter().map(|d| d.rotation))
            .any(|tag| tag != RotationTag::EveryWeek)
    }

    /// Day bounds are the only timetable data the engine insists on.
    pub fn validate(&self) -> Result<()> {
        self.day_bounds.validate()
    }
}

// ============
// Occurrences
// ============

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OccurrenceKind {
    Lesson { class_id: ClassId },
    Duty { label: String },
}

/// A lesson or duty resolved against one date. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Occurrence {
    pub kind: OccurrenceKind,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub weekday: DayOfWeek,
}

impl Occurrence {
    pub fn class_id(&self) -> Option<&str> {
        match &self.kind {
            OccurrenceKind::Lesson { class_id } => Some(class_id),
            OccurrenceKind::Duty { .. } => None,
        }
    }

    pub fn interval(&self) -> Interval {
        Interval::new(self.start_time.minutes(), self.end_time.minutes())
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match &self.kind {
            OccurrenceKind::Lesson { class_id } => format!("lesson '{}'", class_id),
            OccurrenceKind::Duty { label } => format!("duty '{}'", label),
        };
        write!(
            f,
            "{} {} {}-{}",
            what,
            self.date.format("%Y-%m-%d"),
            self.start_time,
            self.end_time
        )
    }
}

/// Half-open minute range `[start, end)` within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    pub start: u32,
    pub end: u32,
}

impl Interval {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

// ======
// Slots
// ======

/// A free period on a concrete date; also the value stored on scheduled tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub start_minutes: u32,
    pub end_minutes: u32,
    pub duration: u32,
}

pub type FreePeriod = Slot;

impl Slot {
    pub fn new(date: NaiveDate, start_minutes: u32, end_minutes: u32) -> Self {
        Self {
            date,
            start_minutes,
            end_minutes,
            duration: end_minutes.saturating_sub(start_minutes),
        }
    }

    /// Builds a slot from an ISO date or date-time string.
    pub fn from_iso(date: &str, start_minutes: u32, end_minutes: u32) -> Result<Self> {
        Ok(Self::new(iso_calendar_day(date)?, start_minutes, end_minutes))
    }

    pub fn interval(&self) -> Interval {
        Interval::new(self.start_minutes, self.end_minutes)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{} ({} min)",
            self.date.format("%Y-%m-%d"),
            TimeOfDay(self.start_minutes),
            TimeOfDay(self.end_minutes),
            self.duration
        )
    }
}

// ======
// Tasks
// ======

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub scheduled_slot: Option<Slot>,
    /// Rank within the slot stack; meaningless while unscheduled.
    #[serde(default)]
    pub stack_order: Option<i64>,
}

impl Task {
    pub fn new(
        id: TaskId,
        text: impl Into<String>,
        priority: Priority,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            priority,
            completed: false,
            created_at,
            scheduled_slot: None,
            stack_order: None,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled_slot.is_some()
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = match &self.scheduled_slot {
            Some(slot) => slot.to_string(),
            None => "Not Scheduled".to_string(),
        };
        write!(
            f,
            "Task(id={}, text='{}', priority={}, completed={}, slot={})",
            self.id, self.text, self.priority, self.completed, slot
        )
    }
}
