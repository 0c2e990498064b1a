use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Row-local failures. The loader records these and moves on to the next row.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("incomplete record: expected at least 7 fields, found {found}")]
    IncompleteRecord { found: usize },

    #[error("invalid Test{test} score '{value}': {source}")]
    InvalidScore {
        test: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Failures that abort a whole load.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("error opening file {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("reading header of {path}: {reason}")]
    HeaderRead { path: PathBuf, reason: String },

    #[error("reading record in {path}: {reason}")]
    RecordRead { path: PathBuf, reason: String },
}
