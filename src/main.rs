use std::{
    error::Error,
    io::{self, stdin},
    path::{Path, PathBuf},
};

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};

use kobun::{
    app::{App, AppAction, QuizSettings},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    history::HistoryLog,
    logging::init_file_logging,
    range::RangeSelection,
    runtime::{CrosstermEventSource, QuizEvent, QuizEventSource, Runner},
    session::MAX_QUESTIONS,
    vocab::LoadOptions,
    Direction, VocabError, VocabStore,
};

/// multiple-choice quiz for classical Japanese vocabulary
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal multiple-choice quiz for classical Japanese (古文) vocabulary. Pick a direction and a range of the word list, answer up to 50 questions, and review your mistakes."
)]
pub struct Cli {
    /// CSV word list: (term, meaning) or (No., term, meaning); defaults to the bundled list
    #[clap(short = 'f', long)]
    file: Option<PathBuf>,

    /// the word list's first row is a word, not column names
    #[clap(long, requires = "file")]
    no_header: bool,

    /// which side of each word is asked
    #[clap(short = 'd', long, value_enum)]
    direction: Option<Direction>,

    /// block of 100 words to quiz on (1 = No.1〜No.100)
    #[clap(short = 'c', long, conflicts_with_all = ["range_start", "range_end"])]
    chunk: Option<usize>,

    /// first word number of a custom range
    #[clap(long, requires = "range_end")]
    range_start: Option<u32>,

    /// last word number (inclusive) of a custom range
    #[clap(long, requires = "range_start")]
    range_end: Option<u32>,

    /// number of questions (1-50)
    #[clap(short = 'q', long)]
    questions: Option<usize>,

    /// print the words in the selected range and exit
    #[clap(long)]
    list: bool,

    /// skip the setup screen and start the quiz right away
    #[clap(long)]
    start: bool,

    /// do not append results to the history log
    #[clap(long)]
    no_history: bool,
}

impl Cli {
    /// Stored preferences with command line flags layered on top
    fn to_settings(&self, cfg: &Config) -> QuizSettings {
        let mut settings = QuizSettings::from(cfg);
        if let Some(direction) = self.direction {
            settings.direction = direction;
        }
        if let Some(chunk) = self.chunk {
            settings.range = RangeSelection::Chunk(chunk.saturating_sub(1));
        }
        if let (Some(start), Some(end)) = (self.range_start, self.range_end) {
            settings.range = RangeSelection::Custom { start, end };
        }
        if let Some(questions) = self.questions {
            settings.question_count = questions;
        }
        if let Some(file) = &self.file {
            settings.vocab_path = Some(file.clone());
        }
        settings
    }

    fn load_options(&self) -> LoadOptions {
        LoadOptions {
            has_header: !self.no_header,
        }
    }

    /// Reject flag values that can never describe a valid quiz
    fn validate(&self) -> Result<(), String> {
        if self.chunk == Some(0) {
            return Err("--chunk starts at 1".to_string());
        }
        if let Some(q) = self.questions {
            if q == 0 || q > MAX_QUESTIONS {
                return Err(format!("--questions must be between 1 and {MAX_QUESTIONS}"));
            }
        }
        if let (Some(start), Some(end)) = (self.range_start, self.range_end) {
            RangeSelection::Custom { start, end }
                .resolve(end)
                .map_err(|e| e.to_string())?;
        }
        Ok(())
    }
}

fn load_store(
    path: Option<&Path>,
    explicit: bool,
    options: LoadOptions,
) -> Result<VocabStore, VocabError> {
    match path {
        Some(path) => match VocabStore::load_with(path, options) {
            Ok(store) => Ok(store),
            Err(e) if !explicit => {
                log::warn!("falling back to the bundled word list: {e}");
                VocabStore::builtin()
            }
            Err(e) => Err(e),
        },
        None => VocabStore::builtin(),
    }
}

fn print_range(store: &VocabStore, settings: &QuizSettings) -> Result<(), Box<dyn Error>> {
    let max_id = store.max_id().unwrap_or(0);
    let (start, end) = settings.range.resolve(max_id)?;
    let entries = store.filter_by_range(start, end)?;
    if entries.is_empty() {
        eprintln!("no words in {}", settings.range.label(max_id));
    }
    for entry in entries {
        println!("{}\t{}\t{}", entry.id, entry.term, entry.meaning);
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Err(msg) = cli.validate() {
        Cli::command().error(ErrorKind::ValueValidation, msg).exit();
    }

    if let Some(path) = AppDirs::log_path() {
        init_file_logging(&path);
    }

    let config_store = FileConfigStore::new();
    let settings = cli.to_settings(&config_store.load());

    let explicit = cli.file.is_some();
    let store = match load_store(settings.vocab_path.as_deref(), explicit, cli.load_options()) {
        Ok(store) => store,
        Err(e) => Cli::command().error(ErrorKind::Io, e).exit(),
    };

    if cli.list {
        return print_range(&store, &settings);
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let history = if cli.no_history {
        None
    } else {
        HistoryLog::default_location()
    };
    let mut app = App::new(store, settings)
        .with_history(history)
        .with_config_store(Box::new(config_store));
    if cli.start {
        // a bad configuration leaves the setup screen up with its message
        let _ = app.start_quiz();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(CrosstermEventSource::new());
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: QuizEventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    while let Some(event) = runner.step() {
        match event {
            QuizEvent::Resize => {}
            QuizEvent::Key(key) => {
                if app.handle_key(key) == AppAction::Quit {
                    break;
                }
            }
        }
        terminal.draw(|f| ui(app, f))?;
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
