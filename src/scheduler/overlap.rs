use crate::core::models::Occurrence;
use crate::core::types::OverlapPolicy;

/// Index pairs `(earlier, later)` of occurrences whose times overlap.
pub fn find_overlaps(occurrences: &[Occurrence]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, a) in occurrences.iter().enumerate() {
        for (j, b) in occurrences.iter().enumerate().skip(i + 1) {
            if a.date == b.date && a.interval().overlaps(&b.interval()) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// Decides which lessons reach the merge pass when some overlap. Occupancy for
/// free periods never goes through this.
pub trait OverlapPolicyHandler {
    fn handle(&self, lessons: Vec<Occurrence>) -> Vec<Occurrence>;
}

pub struct RenderBoth;
pub struct FirstWins;

impl OverlapPolicyHandler for RenderBoth {
    fn handle(&self, lessons: Vec<Occurrence>) -> Vec<Occurrence> {
        lessons
    }
}

impl OverlapPolicyHandler for FirstWins {
    fn handle(&self, lessons: Vec<Occurrence>) -> Vec<Occurrence> {
        let mut kept: Vec<Occurrence> = Vec::with_capacity(lessons.len());
        for lesson in lessons {
            let clashes = kept
                .iter()
                .any(|k| k.date == lesson.date && k.interval().overlaps(&lesson.interval()));
            if !clashes {
                kept.push(lesson);
            }
        }
        kept
    }
}

pub fn make_overlap_handler(policy: OverlapPolicy) -> Box<dyn OverlapPolicyHandler> {
    match policy {
        OverlapPolicy::RenderBoth => Box::new(RenderBoth),
        OverlapPolicy::FirstWins => Box::new(FirstWins),
    }
}
