use crate::core::models::Task;
use crate::core::types::TaskListOrder;
use std::cmp::Ordering;

pub trait TaskOrderComparator {
    fn cmp(&self, a: &Task, b: &Task) -> Ordering;
}

// Open before completed; higher priority first; older first; tie-break by id
pub struct PriorityFirstComparator;
impl TaskOrderComparator for PriorityFirstComparator {
    fn cmp(&self, a: &Task, b: &Task) -> Ordering {
        a.completed
            .cmp(&b.completed)
            .then_with(|| b.priority.cmp(&a.priority))
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    }
}

// Open before completed; created ascending; tie-break by id
pub struct OldestFirstComparator;
impl TaskOrderComparator for OldestFirstComparator {
    fn cmp(&self, a: &Task, b: &Task) -> Ordering {
        a.completed
            .cmp(&b.completed)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    }
}

// Open before completed; created descending; tie-break by id
pub struct NewestFirstComparator;
impl TaskOrderComparator for NewestFirstComparator {
    fn cmp(&self, a: &Task, b: &Task) -> Ordering {
        a.completed
            .cmp(&b.completed)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| a.id.cmp(&b.id))
    }
}

pub fn make_task_order_comparator(kind: TaskListOrder) -> Box<dyn TaskOrderComparator> {
    match kind {
        TaskListOrder::PriorityFirst => Box::new(PriorityFirstComparator),
        TaskListOrder::OldestFirst => Box::new(OldestFirstComparator),
        TaskListOrder::NewestFirst => Box::new(NewestFirstComparator),
    }
}
