use crate::core::models::{Slot, Task, TaskId};
use crate::core::types::iso_calendar_day;
use crate::errors::{Error, Result, require_format};
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Identity of a schedulable slot: calendar day plus start minute. Two slots
/// are the same slot iff both parts match, however the date was supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey {
    pub day: NaiveDate,
    pub start_minutes: u32,
}

impl SlotKey {
    pub fn new(day: NaiveDate, start_minutes: u32) -> Self {
        Self { day, start_minutes }
    }

    pub fn of(slot: &Slot) -> Self {
        Self::new(slot.date, slot.start_minutes)
    }

    /// `(year, month, day, start_minutes)`.
    pub fn parts(&self) -> (i32, u32, u32, u32) {
        (
            self.day.year(),
            self.day.month(),
            self.day.day(),
            self.start_minutes,
        )
    }

    /// Parses the `YYYY-MM-DD::<minutes>` form produced by `Display`. The date
    /// part may also be a full ISO date-time.
    pub fn parse(raw: &str) -> Result<Self> {
        let (day, minutes) = require_format(
            raw.rsplit_once("::"),
            format!("Invalid slot key: '{}'. Expected 'YYYY-MM-DD::<minutes>'.", raw),
        )?;
        let start_minutes = minutes.trim().parse::<u32>().map_err(|_| {
            Error::Format(format!(
                "Invalid slot key: '{}'. Start minute '{}' is not a number.",
                raw, minutes
            ))
        })?;
        Ok(Self::new(iso_calendar_day(day)?, start_minutes))
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.day.format("%Y-%m-%d"), self.start_minutes)
    }
}

pub fn slot_key(slot: &Slot) -> SlotKey {
    SlotKey::of(slot)
}

fn in_slot(task: &Task, key: SlotKey) -> bool {
    task.scheduled_slot
        .as_ref()
        .is_some_and(|slot| SlotKey::of(slot) == key)
}

/// First free stack position in `key`, ignoring the tasks being (re)placed.
fn next_stack_order(tasks: &[Task], key: SlotKey, moving: &[TaskId]) -> i64 {
    tasks
        .iter()
        .filter(|t| !moving.contains(&t.id) && in_slot(t, key))
        .filter_map(|t| t.stack_order)
        .max()
        .unwrap_or(-1)
        + 1
}

/// Places `task_id` on top of the stack in `slot`. Unknown ids are a no-op.
pub fn schedule_task(tasks: &[Task], task_id: TaskId, slot: &Slot) -> Vec<Task> {
    schedule_tasks(tasks, &[task_id], slot)
}

/// Places several tasks into `slot`, stacked in the order given. Unknown and
/// repeated ids are skipped.
pub fn schedule_tasks(tasks: &[Task], task_ids: &[TaskId], slot: &Slot) -> Vec<Task> {
    let mut seen = HashSet::new();
    let moving: Vec<TaskId> = task_ids
        .iter()
        .copied()
        .filter(|id| tasks.iter().any(|t| t.id == *id) && seen.insert(*id))
        .collect();

    let mut out = tasks.to_vec();
    if moving.is_empty() {
        return out;
    }

    let base = next_stack_order(tasks, SlotKey::of(slot), &moving);
    for (offset, id) in moving.iter().enumerate() {
        if let Some(task) = out.iter_mut().find(|t| t.id == *id) {
            task.scheduled_slot = Some(slot.clone());
            task.stack_order = Some(base + offset as i64);
        }
    }
    out
}

pub fn unschedule_task(tasks: &[Task], task_id: TaskId) -> Vec<Task> {
    let mut out = tasks.to_vec();
    if let Some(task) = out.iter_mut().find(|t| t.id == task_id) {
        task.scheduled_slot = None;
        task.stack_order = None;
    }
    out
}

/// Gives the listed tasks stack positions 0, 1, 2... in list order. Tasks not
/// listed, or not scheduled, keep their state.
pub fn reorder_stack(tasks: &[Task], ordered_task_ids: &[TaskId]) -> Vec<Task> {
    let mut out = tasks.to_vec();
    for (index, id) in ordered_task_ids.iter().enumerate() {
        if let Some(task) = out.iter_mut().find(|t| t.id == *id && t.is_scheduled()) {
            task.stack_order = Some(index as i64);
        }
    }
    out
}

/// Removes a task. The remaining stack is not renumbered.
pub fn delete_task(tasks: &[Task], task_id: TaskId) -> Vec<Task> {
    tasks.iter().filter(|t| t.id != task_id).cloned().collect()
}

pub fn tasks_in_slot<'a>(tasks: &'a [Task], slot: &Slot) -> Vec<&'a Task> {
    tasks_with_key(tasks, SlotKey::of(slot))
}

pub fn tasks_with_key(tasks: &[Task], key: SlotKey) -> Vec<&Task> {
    let mut stack: Vec<&Task> = tasks.iter().filter(|t| in_slot(t, key)).collect();
    stack.sort_by_key(|t| t.stack_order);
    stack
}

/// Every non-empty stack on `date`, keyed by slot and ordered by start minute.
pub fn stacks_for_date(tasks: &[Task], date: NaiveDate) -> BTreeMap<SlotKey, Vec<&Task>> {
    let mut stacks: BTreeMap<SlotKey, Vec<&Task>> = BTreeMap::new();
    for task in tasks {
        if let Some(slot) = &task.scheduled_slot {
            if slot.date == date {
                stacks.entry(SlotKey::of(slot)).or_default().push(task);
            }
        }
    }
    for stack in stacks.values_mut() {
        stack.sort_by_key(|t| t.stack_order);
    }
    stacks
}
