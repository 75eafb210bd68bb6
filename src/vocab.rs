use std::fs::File;
use std::io::Read;
use std::path::Path;

use include_dir::{include_dir, Dir};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, VocabError};

static VOCAB_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/vocab");

const BUILTIN_FILE: &str = "kobun_core.csv";

/// Separators that split one meaning cell into several senses
const SENSE_SEPARATORS: [char; 3] = ['／', ';', '；'];

/// A single sense of a vocabulary word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub id: u32,
    pub term: String,
    pub meaning: String,
}

impl WordEntry {
    pub fn new(id: u32, term: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            id,
            term: term.into(),
            meaning: meaning.into(),
        }
    }
}

/// How a word list file is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// The first row names the columns and is never a word
    pub has_header: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { has_header: true }
    }
}

/// Immutable, ordered word list the quiz draws from
#[derive(Debug, Clone, Default)]
pub struct VocabStore {
    entries: Vec<WordEntry>,
}

impl VocabStore {
    /// Build a store from already validated entries, dropping blank ones.
    pub fn new(entries: Vec<WordEntry>) -> Self {
        let entries = entries
            .into_iter()
            .filter(|e| !e.term.trim().is_empty() && !e.meaning.trim().is_empty())
            .collect();
        Self { entries }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, VocabError> {
        Self::load_with(path, LoadOptions::default())
    }

    pub fn load_with<P: AsRef<Path>>(path: P, options: LoadOptions) -> Result<Self, VocabError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| VocabError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_csv_reader_with(file, options)?;
        log::info!(
            "loaded {} words ({} senses) from {}",
            store.word_count(),
            store.len(),
            path.display()
        );
        Ok(store)
    }

    /// The word list bundled into the binary.
    pub fn builtin() -> Result<Self, VocabError> {
        let file = VOCAB_DIR
            .get_file(BUILTIN_FILE)
            .ok_or(VocabError::Empty)?;
        Self::from_csv_reader(file.contents())
    }

    /// Parse a CSV whose first row is a header, see [`VocabStore::from_csv_reader_with`].
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, VocabError> {
        Self::from_csv_reader_with(reader, LoadOptions::default())
    }

    /// Parse a two column (term, meaning) or three column (No., term, meaning) CSV.
    ///
    /// Column names are never inspected. A file is numbered when it has three
    /// or more columns and at least half of its data rows start with an id;
    /// numbered rows whose id does not parse are skipped.
    pub fn from_csv_reader_with<R: Read>(reader: R, options: LoadOptions) -> Result<Self, VocabError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(options.has_header)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows: Vec<csv::StringRecord> = Vec::new();
        for record in rdr.records() {
            let record = record?;
            if !record.iter().all(str::is_empty) {
                rows.push(record);
            }
        }

        let header_width = if options.has_header {
            rdr.headers()?.len()
        } else {
            0
        };
        let width = rows.iter().map(|r| r.len()).chain([header_width]).max().unwrap_or(0);
        if width == 0 {
            return Err(VocabError::Empty);
        }
        if width < 2 {
            return Err(VocabError::MissingColumns);
        }

        let with_id = rows.iter().filter(|r| parse_id(r).is_some()).count();
        let numbered = width >= 3 && !rows.is_empty() && with_id * 2 >= rows.len();

        let mut entries = Vec::new();
        let mut next_id = 1u32;
        for row in &rows {
            let (id, term, meaning) = if numbered {
                let Some(id) = parse_id(row) else {
                    log::warn!("skipping row without a word number {:?}", row);
                    continue;
                };
                (id, row.get(1), row.get(2))
            } else {
                (next_id, row.get(0), row.get(1))
            };

            let term = term.unwrap_or_default().trim();
            let meaning = meaning.unwrap_or_default().trim();
            if term.is_empty() || meaning.is_empty() {
                log::debug!("skipping incomplete row {:?}", row);
                continue;
            }

            if !numbered {
                next_id = next_id.saturating_add(1);
            }

            for sense in split_senses(meaning) {
                entries.push(WordEntry::new(id, term, sense));
            }
        }

        if entries.is_empty() {
            return Err(VocabError::Empty);
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    /// Number of senses (rows) in the store
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct word ids
    pub fn word_count(&self) -> usize {
        self.entries.iter().map(|e| e.id).unique().count()
    }

    pub fn min_id(&self) -> Option<u32> {
        self.entries.iter().map(|e| e.id).min()
    }

    pub fn max_id(&self) -> Option<u32> {
        self.entries.iter().map(|e| e.id).max()
    }

    /// Entries whose id lies within `start..=end`, in store order.
    ///
    /// An empty result is not an error; only an inverted range is.
    pub fn filter_by_range(&self, start: u32, end: u32) -> Result<Vec<WordEntry>, ConfigError> {
        if start > end {
            return Err(ConfigError::InvertedRange { start, end });
        }
        Ok(self
            .entries
            .iter()
            .filter(|e| (start..=end).contains(&e.id))
            .cloned()
            .collect())
    }
}

fn parse_id(row: &csv::StringRecord) -> Option<u32> {
    row.get(0).and_then(|c| c.parse::<u32>().ok())
}

fn split_senses(meaning: &str) -> Vec<&str> {
    meaning
        .split(&SENSE_SEPARATORS[..])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
