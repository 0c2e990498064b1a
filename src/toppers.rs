use std::cmp::Ordering;

use crate::models::{GradedRecord, UniversityToppers};

/// Highest final score wins; on a tie the earlier record is kept.
pub fn overall_topper(graded: &[GradedRecord]) -> Option<&GradedRecord> {
    let mut topper: Option<&GradedRecord> = None;

    for record in graded {
        match topper {
            Some(current) if record.final_score <= current.final_score => {}
            _ => topper = Some(record),
        }
    }

    topper
}

pub fn toppers_by_university(graded: &[GradedRecord]) -> UniversityToppers {
    let mut toppers = UniversityToppers::new();

    for record in graded {
        match toppers.get(&record.student.university) {
            Some(current) if record.final_score <= current.final_score => {}
            _ => {
                toppers.insert(record.student.university.clone(), record.clone());
            }
        }
    }

    toppers
}

/// Descending by final score, stable for ties. `limit` of `None` keeps everyone.
pub fn rank(graded: &[GradedRecord], limit: Option<usize>) -> Vec<&GradedRecord> {
    let mut ranked: Vec<&GradedRecord> = graded.iter().collect();
    ranked.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(Ordering::Equal)
    });
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    ranked
}
