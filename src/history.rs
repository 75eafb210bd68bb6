use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::app_dirs::AppDirs;
use crate::error::HistoryError;
use crate::results::QuizSummary;
use crate::session::Direction;

/// One finished quiz as written to `history.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub date: DateTime<Local>,
    pub direction: Direction,
    pub range: String,
    pub score: usize,
    pub questions: usize,
    pub accuracy: f64,
}

impl HistoryRecord {
    pub fn new(summary: &QuizSummary, range: impl Into<String>) -> Self {
        Self {
            date: Local::now(),
            direction: summary.direction,
            range: range.into(),
            score: summary.score,
            questions: summary.question_count,
            accuracy: (summary.accuracy() * 1000.0).round() / 10.0,
        }
    }
}

/// Append-only CSV log of finished quizzes
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    /// Log under the platform data directory, if one can be determined
    pub fn default_location() -> Option<Self> {
        AppDirs::history_path().map(Self::with_path)
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &HistoryRecord) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // If the log doesn't exist yet, we need to emit a header
        let needs_header = !self.path.exists();

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;

        log::debug!("appended quiz result to {}", self.path.display());
        Ok(())
    }

    /// All records, oldest first; a missing log reads as empty
    pub fn read_all(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for record in reader.deserialize() {
            records.push(record?);
        }
        Ok(records)
    }
}
