use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::RecordError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRecord {
    pub first_name: String,
    pub last_name: String,
    pub university: String,
    pub scores: [i64; 4],
}

impl StudentRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    F,
}

impl Grade {
    pub const ALL: [Grade; 4] = [Grade::A, Grade::B, Grade::C, Grade::F];

    pub fn letter(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeThreshold {
    pub min_score: f64,
    pub grade: Grade,
}

/// Checked top to bottom; a final score below every entry is an F.
pub const GRADE_THRESHOLDS: [GradeThreshold; 3] = [
    GradeThreshold {
        min_score: 70.0,
        grade: Grade::A,
    },
    GradeThreshold {
        min_score: 50.0,
        grade: Grade::B,
    },
    GradeThreshold {
        min_score: 35.0,
        grade: Grade::C,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradedRecord {
    pub student: StudentRecord,
    pub final_score: f64,
    pub grade: Grade,
}

#[derive(Debug)]
pub struct SkippedRow {
    pub line: u64,
    pub error: RecordError,
}

#[derive(Debug, Default)]
pub struct LoadedDataset {
    pub students: Vec<StudentRecord>,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeSummary {
    pub grade: Grade,
    pub count: usize,
}

pub type UniversityToppers = BTreeMap<String, GradedRecord>;
