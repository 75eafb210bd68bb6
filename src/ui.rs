pub mod question;
pub mod results;
pub mod screen;
pub mod setup;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

/// Accent used for titles, the progress gauge and the highlighted option
const ACCENT: Color = Color::Rgb(255, 174, 75);

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        screen::current_screen(self.state).render(self, area, buf);
    }
}

fn bold_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn accent_bold_style() -> Style {
    bold_style().fg(ACCENT)
}

fn italic_style() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

fn dim_style() -> Style {
    Style::default().fg(Color::Gray).add_modifier(Modifier::DIM)
}

/// Rows needed to show `text` wrapped at `width` display columns
fn wrapped_lines(text: &str, width: u16) -> u16 {
    let width = width.max(1) as usize;
    let cols = text.width().max(1);
    cols.div_ceil(width) as u16
}

/// Split `text` into pieces no wider than `width` columns
fn wrap_columns(text: &str, width: u16) -> Vec<String> {
    let width = width.max(1) as usize;
    let mut lines = vec![String::new()];
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used > 0 && used + w > width {
            lines.push(String::new());
            used = 0;
        }
        if let Some(line) = lines.last_mut() {
            line.push(ch);
        }
        used += w;
    }
    lines
}

/// Usable width once the horizontal margins are taken off
fn inner_width(area: Rect) -> u16 {
    area.width.saturating_sub(HORIZONTAL_MARGIN * 2)
}
