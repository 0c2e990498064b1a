use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod error;
mod grading;
mod loader;
mod models;
mod report;
mod toppers;

#[derive(Parser)]
#[command(name = "grade-toppers")]
#[command(about = "Grades student test scores and finds the top performers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the final score and grade of every student
    Grade {
        #[arg(long, env = "GRADEBOOK_CSV")]
        csv: PathBuf,
        /// Order by final score instead of file order
        #[arg(long)]
        ranked: bool,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show the overall topper and the topper of each university
    Toppers {
        #[arg(long, env = "GRADEBOOK_CSV")]
        csv: PathBuf,
    },
    /// Generate a grade report
    Report {
        #[arg(long, env = "GRADEBOOK_CSV")]
        csv: PathBuf,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = ReportFormat::Markdown)]
        format: ReportFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    Markdown,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Grade { csv, ranked, limit } => {
            let graded = load_and_grade(&csv)?.1;

            if graded.is_empty() {
                println!("No valid student records in {}.", csv.display());
                return Ok(());
            }

            let listed: Vec<&models::GradedRecord> = if ranked {
                toppers::rank(&graded, limit)
            } else {
                graded.iter().take(limit.unwrap_or(usize::MAX)).collect()
            };

            for record in listed {
                println!(
                    "- {} ({}) scores {:?} final {:.2} grade {}",
                    record.student.full_name(),
                    record.student.university,
                    record.student.scores,
                    record.final_score,
                    record.grade
                );
            }
        }
        Commands::Toppers { csv } => {
            let graded = load_and_grade(&csv)?.1;

            match toppers::overall_topper(&graded) {
                Some(topper) => println!(
                    "Overall topper: {} ({}) final score {:.2}, grade {}",
                    topper.student.full_name(),
                    topper.student.university,
                    topper.final_score,
                    topper.grade
                ),
                None => {
                    println!("No valid student records in {}.", csv.display());
                    return Ok(());
                }
            }

            println!("Toppers by university:");
            for (university, topper) in toppers::toppers_by_university(&graded) {
                println!(
                    "- {}: {} final score {:.2}, grade {}",
                    university,
                    topper.student.full_name(),
                    topper.final_score,
                    topper.grade
                );
            }
        }
        Commands::Report { csv, out, format } => {
            let (dataset, graded) = load_and_grade(&csv)?;
            let generated_on = Utc::now().date_naive();

            let contents = match format {
                ReportFormat::Markdown => report::build_report(&csv, generated_on, &dataset, &graded),
                ReportFormat::Json => serde_json::to_string_pretty(&report::build_json_report(
                    &csv,
                    generated_on,
                    &dataset,
                    &graded,
                ))?,
            };

            std::fs::write(&out, contents)
                .with_context(|| format!("failed to write report to {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

fn load_and_grade(
    csv: &std::path::Path,
) -> anyhow::Result<(models::LoadedDataset, Vec<models::GradedRecord>)> {
    let mut dataset = loader::load_students(csv)
        .with_context(|| format!("failed to load students from {}", csv.display()))?;
    let graded = grading::grade_all(std::mem::take(&mut dataset.students));
    info!(graded = graded.len(), "graded students");
    Ok((dataset, graded))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::models::Grade;
    use crate::{grading, loader, toppers};

    #[test]
    fn grades_csv_and_picks_the_topper() {
        let content = "first_name,last_name,university,test1,test2,test3,test4\n\
                       Jane,Doe,X,80,80,80,80\n\
                       Bob,Lee,Y,20,20,20,20\n";

        let dataset = loader::load_from_reader(content.as_bytes(), Path::new("scores.csv")).unwrap();
        assert!(dataset.skipped.is_empty());

        let graded = grading::grade_all(dataset.students);
        assert_eq!(graded.len(), 2);
        assert_eq!(graded[0].final_score, 80.0);
        assert_eq!(graded[0].grade, Grade::A);
        assert_eq!(graded[1].final_score, 20.0);
        assert_eq!(graded[1].grade, Grade::F);

        let topper = toppers::overall_topper(&graded).unwrap();
        assert_eq!(topper.student.full_name(), "Jane Doe");

        let by_university = toppers::toppers_by_university(&graded);
        assert_eq!(by_university["X"].student.first_name, "Jane");
        assert_eq!(by_university["Y"].student.first_name, "Bob");
    }
}
