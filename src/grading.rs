use crate::models::{Grade, GradeSummary, GradedRecord, StudentRecord, GRADE_THRESHOLDS};

pub fn final_score(student: &StudentRecord) -> f64 {
    let total: f64 = student.scores.iter().map(|&score| score as f64).sum();
    total / 4.0
}

pub fn classify(score: f64) -> Grade {
    GRADE_THRESHOLDS
        .iter()
        .find(|threshold| score >= threshold.min_score)
        .map_or(Grade::F, |threshold| threshold.grade)
}

pub fn grade_student(student: StudentRecord) -> GradedRecord {
    let final_score = final_score(&student);
    GradedRecord {
        grade: classify(final_score),
        final_score,
        student,
    }
}

pub fn grade_all(students: Vec<StudentRecord>) -> Vec<GradedRecord> {
    students.into_iter().map(grade_student).collect()
}

/// One entry per grade, A first, including grades nobody received.
pub fn summarize_by_grade(graded: &[GradedRecord]) -> Vec<GradeSummary> {
    Grade::ALL
        .iter()
        .map(|&grade| GradeSummary {
            grade,
            count: graded.iter().filter(|record| record.grade == grade).count(),
        })
        .collect()
}
