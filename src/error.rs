//! Error types shared across the quiz library.

use std::path::PathBuf;

use thiserror::Error;

/// A quiz configuration that cannot produce a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no words in the selected range")]
    EmptyPool,
    #[error("question count must be between 1 and {max} (got {requested})")]
    QuestionCount { requested: usize, max: usize },
    #[error("range start No.{start} must not exceed range end No.{end}")]
    InvertedRange { start: u32, end: u32 },
    #[error("range block {index} does not exist ({available} available)")]
    UnknownChunk { index: usize, available: usize },
}

/// Errors emitted by the quiz session and results aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("no quiz is in progress")]
    NotInProgress,
    #[error("quiz has not finished yet")]
    NotFinished,
}

impl QuizError {
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, QuizError::InvalidConfiguration(_))
    }
}

/// Errors emitted while loading a word list.
#[derive(Debug, Error)]
pub enum VocabError {
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed word list: {0}")]
    Csv(#[from] csv::Error),
    #[error("word list needs at least two columns (term, meaning)")]
    MissingColumns,
    #[error("word list contains no usable rows")]
    Empty,
}

/// Errors emitted while appending to the results history.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
