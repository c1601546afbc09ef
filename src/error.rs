// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("not a git repository: {}", path.display())]
    InvalidRepository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("no commits match the given window and filters")]
    EmptyTimeline,

    #[error("malformed hunk header: {header:?}")]
    HunkParse { header: String },

    #[error("line {index} is outside {path} while replaying")]
    LineOutOfRange { path: String, index: usize },

    #[error(transparent)]
    Git(#[from] git2::Error),
}

impl ReplayError {
    /// True for conditions the caller should report as a notice rather than a failure.
    pub fn is_notice(&self) -> bool {
        matches!(self, ReplayError::EmptyTimeline)
    }
}

pub type Result<T, E = ReplayError> = std::result::Result<T, E>;
