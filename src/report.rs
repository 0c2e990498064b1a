use std::fmt::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::grading;
use crate::models::{GradedRecord, LoadedDataset};
use crate::toppers;

fn describe(record: &GradedRecord) -> String {
    format!(
        "{} ({}) final score {:.2}, grade {}",
        record.student.full_name(),
        record.student.university,
        record.final_score,
        record.grade
    )
}

pub fn build_report(
    source: &Path,
    generated_on: NaiveDate,
    dataset: &LoadedDataset,
    graded: &[GradedRecord],
) -> String {
    let summaries = grading::summarize_by_grade(graded);
    let university_toppers = toppers::toppers_by_university(graded);

    let mut output = String::new();

    let _ = writeln!(output, "# Student Grade Report");
    let _ = writeln!(
        output,
        "Generated from {} on {}",
        source.display(),
        generated_on
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Dataset");
    let _ = writeln!(output, "- {} students graded", graded.len());
    let _ = writeln!(output, "- {} rows skipped", dataset.skipped.len());

    let _ = writeln!(output);
    let _ = writeln!(output, "## Grade Distribution");
    for summary in summaries.iter() {
        let _ = writeln!(output, "- {}: {} students", summary.grade, summary.count);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Overall Topper");
    match toppers::overall_topper(graded) {
        Some(topper) => {
            let _ = writeln!(output, "- {}", describe(topper));
        }
        None => {
            let _ = writeln!(output, "No graded students.");
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Toppers by University");
    if university_toppers.is_empty() {
        let _ = writeln!(output, "No graded students.");
    } else {
        for (university, topper) in university_toppers.iter() {
            let _ = writeln!(
                output,
                "- {}: {} final score {:.2}, grade {}",
                university,
                topper.student.full_name(),
                topper.final_score,
                topper.grade
            );
        }
    }

    if !dataset.skipped.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Skipped Rows");
        for skipped in dataset.skipped.iter() {
            let _ = writeln!(output, "- line {}: {}", skipped.line, skipped.error);
        }
    }

    output
}

pub fn build_json_report(
    source: &Path,
    generated_on: NaiveDate,
    dataset: &LoadedDataset,
    graded: &[GradedRecord],
) -> Value {
    let skipped: Vec<Value> = dataset
        .skipped
        .iter()
        .map(|row| json!({ "line": row.line, "reason": row.error.to_string() }))
        .collect();

    json!({
        "source": source.display().to_string(),
        "generated_on": generated_on,
        "graded": graded.len(),
        "skipped": skipped,
        "grade_distribution": grading::summarize_by_grade(graded),
        "overall_topper": toppers::overall_topper(graded),
        "toppers_by_university": toppers::toppers_by_university(graded),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordError;
    use crate::grading::grade_all;
    use crate::models::{SkippedRow, StudentRecord};

    fn dataset() -> LoadedDataset {
        let student = |first: &str, last: &str, university: &str, score: i64| StudentRecord {
            first_name: first.to_string(),
            last_name: last.to_string(),
            university: university.to_string(),
            scores: [score; 4],
        };

        LoadedDataset {
            students: vec![
                student("Jane", "Doe", "X", 80),
                student("Bob", "Lee", "Y", 20),
                student("Ann", "Ray", "X", 55),
            ],
            skipped: vec![SkippedRow {
                line: 4,
                error: RecordError::IncompleteRecord { found: 3 },
            }],
        }
    }

    fn generated_on() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 2).unwrap()
    }

    #[test]
    fn markdown_report_lists_every_section() {
        let dataset = dataset();
        let graded = grade_all(dataset.students.clone());
        let report = build_report(Path::new("scores.csv"), generated_on(), &dataset, &graded);

        assert!(report.starts_with("# Student Grade Report\n"));
        assert!(report.contains("Generated from scores.csv on 2026-02-02"));
        assert!(report.contains("- 3 students graded"));
        assert!(report.contains("- 1 rows skipped"));
        assert!(report.contains("- A: 1 students"));
        assert!(report.contains("- B: 1 students"));
        assert!(report.contains("- F: 1 students"));
        assert!(report.contains("- Jane Doe (X) final score 80.00, grade A"));
        assert!(report.contains("- X: Jane Doe final score 80.00, grade A"));
        assert!(report.contains("- Y: Bob Lee final score 20.00, grade F"));
        assert!(report.contains("- line 4: incomplete record"));
    }

    #[test]
    fn markdown_report_handles_no_students() {
        let dataset = LoadedDataset::default();
        let report = build_report(Path::new("scores.csv"), generated_on(), &dataset, &[]);

        assert!(report.contains("## Overall Topper\nNo graded students."));
        assert!(report.contains("## Toppers by University\nNo graded students."));
        assert!(!report.contains("## Skipped Rows"));
    }

    #[test]
    fn json_report_carries_toppers() {
        let dataset = dataset();
        let graded = grade_all(dataset.students.clone());
        let report = build_json_report(Path::new("scores.csv"), generated_on(), &dataset, &graded);

        assert_eq!(report["graded"], 3);
        assert_eq!(report["generated_on"], "2026-02-02");
        assert_eq!(report["skipped"][0]["line"], 4);
        assert_eq!(report["grade_distribution"][0]["grade"], "A");
        assert_eq!(report["grade_distribution"][0]["count"], 1);
        assert_eq!(report["overall_topper"]["student"]["first_name"], "Jane");
        assert_eq!(report["overall_topper"]["grade"], "A");
        assert_eq!(report["toppers_by_university"]["X"]["final_score"], 80.0);
        assert_eq!(report["toppers_by_university"]["Y"]["student"]["last_name"], "Lee");
    }

    #[test]
    fn json_report_has_null_topper_when_empty() {
        let dataset = LoadedDataset::default();
        let report = build_json_report(Path::new("scores.csv"), generated_on(), &dataset, &[]);

        assert!(report["overall_topper"].is_null());
        assert_eq!(report["toppers_by_university"], json!({}));
    }
}
