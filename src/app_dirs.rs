use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "kobun")
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::project().map(|pd| pd.config_dir().join("config.json"))
    }

    pub fn history_path() -> Option<PathBuf> {
        Self::project().map(|pd| pd.data_dir().join("history.csv"))
    }

    /// Log file under $HOME/.local/state/kobun, falling back to the platform data dir
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("kobun");
            Some(state_dir.join("kobun.log"))
        } else {
            Self::project().map(|pd| pd.data_local_dir().join("kobun.log"))
        }
    }
}
