use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::{Config, ConfigStore, MemoryConfigStore};
use crate::error::QuizError;
use crate::history::{HistoryLog, HistoryRecord};
use crate::range::{RangeBound, RangeSelection};
use crate::results::QuizSummary;
use crate::session::{max_question_count, AnswerOutcome, Direction, QuizConfig, QuizSession, MAX_QUESTIONS};
use crate::vocab::VocabStore;

/// Everything the user can choose on the setup screen
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSettings {
    pub direction: Direction,
    pub range: RangeSelection,
    pub question_count: usize,
    pub vocab_path: Option<PathBuf>,
}

impl From<&Config> for QuizSettings {
    fn from(cfg: &Config) -> Self {
        Self {
            direction: cfg.direction,
            range: cfg.range,
            question_count: cfg.question_count,
            vocab_path: cfg.vocab_path.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Setup,
    Question,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
}

pub struct App {
    pub store: VocabStore,
    pub settings: QuizSettings,
    pub session: QuizSession,
    pub state: AppState,
    /// Highlighted option on the question screen
    pub selected: usize,
    /// Result of the previous answer, shown above the next question
    pub last_feedback: Option<AnswerOutcome>,
    /// Setup screen message for a configuration that could not start
    pub message: Option<String>,
    pub summary: Option<QuizSummary>,
    pub results_scroll: usize,
    /// End of a custom range that ←/→ edits
    pub range_bound: RangeBound,
    history: Option<HistoryLog>,
    config_store: Box<dyn ConfigStore>,
}

impl App {
    pub fn new(store: VocabStore, settings: QuizSettings) -> Self {
        Self {
            session: QuizSession::new(settings.direction),
            store,
            settings,
            state: AppState::Setup,
            selected: 0,
            last_feedback: None,
            message: None,
            summary: None,
            results_scroll: 0,
            range_bound: RangeBound::default(),
            history: None,
            config_store: Box::new(MemoryConfigStore),
        }
    }

    pub fn with_history(mut self, history: Option<HistoryLog>) -> Self {
        self.history = history;
        self
    }

    pub fn with_config_store(mut self, store: Box<dyn ConfigStore>) -> Self {
        self.config_store = store;
        self
    }

    pub fn max_id(&self) -> u32 {
        self.store.max_id().unwrap_or(0)
    }

    pub fn range_label(&self) -> String {
        self.settings.range.label(self.max_id())
    }

    pub fn quiz_config(&self) -> Result<QuizConfig, QuizError> {
        let (range_start, range_end) = self.settings.range.resolve(self.max_id())?;
        Ok(QuizConfig {
            direction: self.settings.direction,
            range_start,
            range_end,
            question_count: self.settings.question_count,
        })
    }

    /// Number of entries in the currently selected range, if it resolves
    pub fn range_size(&self) -> Option<usize> {
        let (start, end) = self.settings.range.resolve(self.max_id()).ok()?;
        self.store.filter_by_range(start, end).ok().map(|p| p.len())
    }

    /// Largest question count the current range allows
    pub fn question_limit(&self) -> usize {
        self.range_size()
            .map(max_question_count)
            .unwrap_or(MAX_QUESTIONS)
    }

    /// Validate the settings and begin a new quiz.
    ///
    /// On failure the app stays on the setup screen with the error as its message.
    pub fn start_quiz(&mut self) -> Result<(), QuizError> {
        match self.try_start() {
            Ok(()) => {
                self.message = None;
                self.selected = 0;
                self.last_feedback = None;
                self.summary = None;
                self.results_scroll = 0;
                self.state = AppState::Question;
                if let Err(e) = self.config_store.save(&Config::from(&self.settings)) {
                    log::warn!("could not save preferences: {e}");
                }
                Ok(())
            }
            Err(e) => {
                log::info!("quiz not started: {e}");
                self.message = Some(e.to_string());
                self.state = AppState::Setup;
                Err(e)
            }
        }
    }

    fn try_start(&mut self) -> Result<(), QuizError> {
        let config = self.quiz_config()?;
        let pool = config.select_pool(&self.store)?;
        let mut session = QuizSession::new(config.direction);
        session.start(pool, config.question_count)?;
        self.session = session;
        Ok(())
    }

    /// Answer the current question with option `index`.
    pub fn answer_option(&mut self, index: usize) -> Result<(), QuizError> {
        let Some(given) = self.session.current_options().get(index).cloned() else {
            return Ok(());
        };
        let outcome = self.session.answer(&given)?;
        self.last_feedback = Some(outcome);
        self.selected = 0;

        if self.session.is_finished() {
            self.finish()?;
        }
        Ok(())
    }

    pub fn answer_selected(&mut self) -> Result<(), QuizError> {
        self.answer_option(self.selected)
    }

    fn finish(&mut self) -> Result<(), QuizError> {
        let summary = QuizSummary::from_session(&self.session)?;
        if let Some(history) = &self.history {
            let record = HistoryRecord::new(&summary, self.range_label());
            if let Err(e) = history.append(&record) {
                log::warn!("could not write history {}: {e}", history.path().display());
            }
        }
        self.summary = Some(summary);
        self.results_scroll = 0;
        self.state = AppState::Results;
        Ok(())
    }

    pub fn back_to_setup(&mut self) {
        self.session.reset();
        self.last_feedback = None;
        self.state = AppState::Setup;
    }

    pub fn toggle_direction(&mut self) {
        self.settings.direction = self.settings.direction.toggled();
        self.message = None;
    }

    pub fn next_range(&mut self) {
        self.settings.range = self.settings.range.next_chunk(self.max_id());
        self.clamp_question_count();
        self.message = None;
    }

    pub fn prev_range(&mut self) {
        self.settings.range = self.settings.range.prev_chunk(self.max_id());
        self.clamp_question_count();
        self.message = None;
    }

    /// Switch between 100-word blocks and a freely chosen range
    pub fn toggle_range_mode(&mut self) {
        self.settings.range = self.settings.range.toggled_mode(self.max_id());
        self.range_bound = RangeBound::Start;
        self.range_changed();
    }

    pub fn switch_range_bound(&mut self) {
        if self.settings.range.is_custom() {
            self.range_bound = self.range_bound.toggled();
        }
    }

    /// Move the focused end of a custom range
    pub fn shift_range_bound(&mut self, delta: i64) {
        if !self.settings.range.is_custom() {
            return;
        }
        self.settings.range = self
            .settings
            .range
            .shifted(self.range_bound, delta, self.max_id());
        self.range_changed();
    }

    fn range_changed(&mut self) {
        match self.settings.range.resolve(self.max_id()) {
            Ok(_) => {
                self.clamp_question_count();
                self.message = None;
            }
            Err(e) => self.message = Some(QuizError::from(e).to_string()),
        }
    }

    pub fn adjust_question_count(&mut self, delta: isize) {
        let limit = self.question_limit().max(1);
        let next = self.settings.question_count.saturating_add_signed(delta);
        self.settings.question_count = next.clamp(1, limit);
        self.message = None;
    }

    fn clamp_question_count(&mut self) {
        let limit = self.question_limit().max(1);
        self.settings.question_count = self.settings.question_count.clamp(1, limit);
    }

    fn move_selection(&mut self, down: bool) {
        let len = self.session.current_options().len();
        if len == 0 {
            return;
        }
        self.selected = if down {
            (self.selected + 1) % len
        } else {
            (self.selected + len - 1) % len
        };
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppAction::Quit;
        }

        match self.state {
            AppState::Setup => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => return AppAction::Quit,
                KeyCode::Enter | KeyCode::Char('s') => {
                    let _ = self.start_quiz();
                }
                KeyCode::Char('d') => self.toggle_direction(),
                KeyCode::Char('m') => self.toggle_range_mode(),
                KeyCode::Tab => self.switch_range_bound(),
                KeyCode::Right | KeyCode::Char('l') if self.settings.range.is_custom() => {
                    self.shift_range_bound(1)
                }
                KeyCode::Left | KeyCode::Char('h') if self.settings.range.is_custom() => {
                    self.shift_range_bound(-1)
                }
                KeyCode::Char(']') => self.shift_range_bound(10),
                KeyCode::Char('[') => self.shift_range_bound(-10),
                KeyCode::Right | KeyCode::Char('l') => self.next_range(),
                KeyCode::Left | KeyCode::Char('h') => self.prev_range(),
                KeyCode::Up | KeyCode::Char('+') => self.adjust_question_count(1),
                KeyCode::Down | KeyCode::Char('-') => self.adjust_question_count(-1),
                KeyCode::PageUp => self.adjust_question_count(10),
                KeyCode::PageDown => self.adjust_question_count(-10),
                _ => {}
            },
            AppState::Question => match key.code {
                KeyCode::Esc => self.back_to_setup(),
                KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
                KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
                KeyCode::Enter => {
                    if let Err(e) = self.answer_selected() {
                        log::warn!("answer rejected: {e}");
                    }
                }
                KeyCode::Char(c @ '1'..='9') => {
                    let index = c as usize - '1' as usize;
                    if let Err(e) = self.answer_option(index) {
                        log::warn!("answer rejected: {e}");
                    }
                }
                _ => {}
            },
            AppState::Results => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => return AppAction::Quit,
                KeyCode::Char('r') => {
                    let _ = self.start_quiz();
                }
                KeyCode::Char('n') | KeyCode::Char('b') | KeyCode::Backspace => {
                    self.back_to_setup()
                }
                KeyCode::Up => self.results_scroll = self.results_scroll.saturating_sub(1),
                KeyCode::Down => {
                    let last = self
                        .summary
                        .as_ref()
                        .map_or(0, |s| s.wrong_log.len().saturating_sub(1));
                    self.results_scroll = (self.results_scroll + 1).min(last);
                }
                KeyCode::Home => self.results_scroll = 0,
                _ => {}
            },
        }
        AppAction::Continue
    }
}
