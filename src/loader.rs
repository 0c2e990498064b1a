use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, warn};

use crate::error::{LoadError, RecordError};
use crate::models::{LoadedDataset, SkippedRow, StudentRecord};

const MIN_FIELDS: usize = 7;
const FIRST_SCORE_FIELD: usize = 3;

pub fn parse_record(record: &StringRecord) -> Result<StudentRecord, RecordError> {
    if record.len() < MIN_FIELDS {
        return Err(RecordError::IncompleteRecord {
            found: record.len(),
        });
    }

    let mut scores = [0i64; 4];
    for (offset, score) in scores.iter_mut().enumerate() {
        let raw = &record[FIRST_SCORE_FIELD + offset];
        *score = raw
            .parse::<i64>()
            .map_err(|source| RecordError::InvalidScore {
                test: offset + 1,
                value: raw.to_string(),
                source,
            })?;
    }

    Ok(StudentRecord {
        first_name: record[0].to_string(),
        last_name: record[1].to_string(),
        university: record[2].to_string(),
        scores,
    })
}

pub fn load_students(path: &Path) -> Result<LoadedDataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_reader(file, path)
}

/// A quoted field that is never closed swallows the rest of the input into a
/// single record without the csv reader reporting it; the record's raw bytes
/// then hold an odd number of quote characters.
fn has_unbalanced_quotes(raw: &[u8]) -> bool {
    raw.iter().filter(|&&byte| byte == b'"').count() % 2 == 1
}

fn raw_span<'a>(contents: &'a [u8], record: &StringRecord, end: u64) -> &'a [u8] {
    let start = record.position().map_or(0, |position| position.byte()) as usize;
    let end = (end as usize).min(contents.len());
    contents.get(start..end).unwrap_or_default()
}

/// Reads one discarded header row followed by student rows. `path` only
/// labels errors and log lines.
pub fn load_from_reader<R: Read>(mut input: R, path: &Path) -> Result<LoadedDataset, LoadError> {
    let mut contents = Vec::new();
    input
        .read_to_end(&mut contents)
        .map_err(|err| LoadError::RecordRead {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(contents.as_slice());

    let mut header = StringRecord::new();
    match reader.read_record(&mut header) {
        Ok(true) => {
            if has_unbalanced_quotes(raw_span(&contents, &header, reader.position().byte())) {
                return Err(LoadError::HeaderRead {
                    path: path.to_path_buf(),
                    reason: "unterminated quoted field".to_string(),
                });
            }
            debug!(columns = header.len(), "skipped csv header");
        }
        Ok(false) => {
            return Err(LoadError::HeaderRead {
                path: path.to_path_buf(),
                reason: "no header row".to_string(),
            })
        }
        Err(err) => {
            return Err(LoadError::HeaderRead {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })
        }
    }

    let mut dataset = LoadedDataset::default();
    let mut record = StringRecord::new();

    while reader
        .read_record(&mut record)
        .map_err(|err| LoadError::RecordRead {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?
    {
        let line = record.position().map_or(0, |position| position.line());
        if has_unbalanced_quotes(raw_span(&contents, &record, reader.position().byte())) {
            return Err(LoadError::RecordRead {
                path: path.to_path_buf(),
                reason: format!("line {line}: unterminated quoted field"),
            });
        }
        match parse_record(&record) {
            Ok(student) => dataset.students.push(student),
            Err(error) => {
                warn!(line, %error, "skipping invalid record");
                dataset.skipped.push(SkippedRow { line, error });
            }
        }
    }

    info!(
        path = %path.display(),
        loaded = dataset.students.len(),
        skipped = dataset.skipped.len(),
        "loaded student records"
    );

    Ok(dataset)
}
