use ratatui::{buffer::Buffer, layout::Rect};

use crate::app::{App, AppState};
use crate::ui::{question, results, setup};

/// A UI Screen boundary: responsible for rendering one app state
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Direction, range and question count selection
pub struct SetupScreen;

impl Screen for SetupScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        setup::render_setup(app, area, buf);
    }
}

/// The active multiple-choice question
pub struct QuestionScreen;

impl Screen for QuestionScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        question::render_question(app, area, buf);
    }
}

pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        results::render_results(app, area, buf);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: AppState) -> Box<dyn Screen> {
    match state {
        AppState::Setup => Box::new(SetupScreen),
        AppState::Question => Box::new(QuestionScreen),
        AppState::Results => Box::new(ResultsScreen),
    }
}
