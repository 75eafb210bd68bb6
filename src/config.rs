use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::range::RangeSelection;
use crate::session::Direction;

pub const DEFAULT_QUESTION_COUNT: usize = 10;

/// Quiz preferences remembered between runs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub direction: Direction,
    pub range: RangeSelection,
    pub question_count: usize,
    pub vocab_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            direction: Direction::TermToMeaning,
            range: RangeSelection::default(),
            question_count: DEFAULT_QUESTION_COUNT,
            vocab_path: None,
        }
    }
}

impl From<&crate::app::QuizSettings> for Config {
    fn from(settings: &crate::app::QuizSettings) -> Self {
        Self {
            direction: settings.direction,
            range: settings.range,
            question_count: settings.question_count,
            vocab_path: settings.vocab_path.clone(),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("kobun_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => cfg,
                Err(e) => {
                    log::warn!("ignoring unreadable config {}: {e}", self.path.display());
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}

/// Store that never touches the disk
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore;

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Config {
        Config::default()
    }

    fn save(&self, _cfg: &Config) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            direction: Direction::MeaningToTerm,
            range: RangeSelection::Custom { start: 20, end: 70 },
            question_count: 25,
            vocab_path: Some(PathBuf::from("/tmp/words.csv")),
        };
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn corrupt_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, b"{ not json").unwrap();
        let store = FileConfigStore::with_path(&path);
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{ "direction": "meaning-to-term" }"#).unwrap();
        let loaded = FileConfigStore::with_path(&path).load();
        assert_eq!(loaded.direction, Direction::MeaningToTerm);
        assert_eq!(loaded.question_count, DEFAULT_QUESTION_COUNT);
    }
}
