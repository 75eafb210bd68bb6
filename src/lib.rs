// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod options;
pub mod range;
pub mod results;
pub mod runtime;
pub mod session;
pub mod ui;
pub mod vocab;

pub use error::{ConfigError, QuizError, VocabError};
pub use session::{Direction, QuizConfig, QuizSession};
pub use vocab::{LoadOptions, VocabStore, WordEntry};
