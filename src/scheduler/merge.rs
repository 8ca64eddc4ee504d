use crate::core::content::LessonContentMap;
use crate::core::models::{Occurrence, OccurrenceKind};
use crate::core::types::{DayOfWeek, TimeOfDay};
use chrono::NaiveDate;

/// Display block spanning one or more back-to-back occurrences of the same
/// class. `parts` keeps the original occurrences so per-occurrence content
/// still resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonBlock {
    pub kind: OccurrenceKind,
    pub date: NaiveDate,
    pub weekday: DayOfWeek,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub parts: Vec<Occurrence>,
}

impl LessonBlock {
    pub fn single(occurrence: Occurrence) -> Self {
        Self {
            kind: occurrence.kind.clone(),
            date: occurrence.date,
            weekday: occurrence.weekday,
            start_time: occurrence.start_time,
            end_time: occurrence.end_time,
            parts: vec![occurrence],
        }
    }

    pub fn class_id(&self) -> Option<&str> {
        match &self.kind {
            OccurrenceKind::Lesson { class_id } => Some(class_id),
            OccurrenceKind::Duty { .. } => None,
        }
    }

    pub fn is_merged(&self) -> bool {
        self.parts.len() > 1
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end_time.minutes().saturating_sub(self.start_time.minutes())
    }

    /// Has-content badge for each part, in part order.
    pub fn content_flags(&self, contents: &LessonContentMap) -> Vec<bool> {
        self.parts
            .iter()
            .map(|part| {
                part.class_id()
                    .is_some_and(|class_id| contents.has_content(class_id, part.date))
            })
            .collect()
    }

    pub fn has_any_content(&self, contents: &LessonContentMap) -> bool {
        self.content_flags(contents).into_iter().any(|flag| flag)
    }

    fn continues_with(&self, next: &LessonBlock) -> bool {
        match (self.class_id(), next.class_id()) {
            (Some(a), Some(b)) => {
                a == b && self.date == next.date && self.end_time == next.start_time
            }
            _ => false,
        }
    }

    fn absorb(&mut self, next: LessonBlock) {
        self.end_time = next.end_time;
        self.parts.extend(next.parts);
    }
}

/// Collapses back-to-back occurrences of the same class. Input must be one
/// day's occurrences sorted by start time; overlaps are left as they are.
pub fn merge_consecutive(occurrences: &[Occurrence]) -> Vec<LessonBlock> {
    merge_blocks(occurrences.iter().cloned().map(LessonBlock::single).collect())
}

/// Same pass over blocks; merging already merged output changes nothing.
pub fn merge_blocks(blocks: Vec<LessonBlock>) -> Vec<LessonBlock> {
    let mut out: Vec<LessonBlock> = Vec::with_capacity(blocks.len());
    for block in blocks {
        match out.last_mut() {
            Some(prev) if prev.continues_with(&block) => prev.absorb(block),
            _ => out.push(block),
        }
    }
    out
}
