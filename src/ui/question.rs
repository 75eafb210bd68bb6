use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};

use crate::app::App;
use crate::ui::{
    accent_bold_style, bold_style, dim_style, inner_width, italic_style, wrap_columns,
    wrapped_lines, ACCENT, HORIZONTAL_MARGIN, VERTICAL_MARGIN,
};

pub fn render_question(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let Some(prompt) = session.prompt() else {
        return;
    };
    let options = session.current_options();
    let total = session.question_count();
    let number = session.position() + 1;

    let prompt_lines = wrapped_lines(prompt, inner_width(area));
    let option_width = inner_width(area).saturating_sub(OPTION_INDENT);
    let option_lines: Vec<Line> = options
        .iter()
        .enumerate()
        .flat_map(|(idx, option)| wrapped_option(idx, option, idx == app.selected, option_width))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1),                          // header
            Constraint::Length(1),                          // progress
            Constraint::Length(1),                          // feedback on the previous answer
            Constraint::Min(1),                             // padding
            Constraint::Length(prompt_lines),               // prompt
            Constraint::Length(1),                          // padding
            Constraint::Length(option_lines.len() as u16),  // options
            Constraint::Min(1),                             // padding
            Constraint::Length(1),                          // legend
        ])
        .split(area);

    Paragraph::new(Line::from(vec![
        Span::styled(format!("第 {number} 問 / {total}"), accent_bold_style()),
        Span::styled(format!("   score {}", session.score()), dim_style()),
    ]))
    .render(chunks[0], buf);

    Gauge::default()
        .gauge_style(Style::default().fg(ACCENT).bg(Color::Black))
        .ratio(number as f64 / total.max(1) as f64)
        .label(format!("{number}/{total}"))
        .render(chunks[1], buf);

    if let Some(feedback) = &app.last_feedback {
        let line = if feedback.correct {
            Span::styled("✓ 正解", Style::default().fg(Color::Green).patch(bold_style()))
        } else {
            Span::styled(
                format!("✗ 正解は「{}」", feedback.correct_answer),
                Style::default().fg(Color::Red).patch(bold_style()),
            )
        };
        Paragraph::new(line).render(chunks[2], buf);
    }

    Paragraph::new(Span::styled(
        prompt,
        bold_style().add_modifier(Modifier::UNDERLINED),
    ))
    .alignment(if prompt_lines == 1 {
        Alignment::Center
    } else {
        Alignment::Left
    })
    .wrap(Wrap { trim: true })
    .render(chunks[4], buf);

    Paragraph::new(option_lines).render(chunks[6], buf);

    Paragraph::new(Span::styled(
        "(1-4) answer / ↑↓ select / (enter) confirm / (esc) back to setup",
        italic_style(),
    ))
    .render(chunks[8], buf);
}

/// Columns taken by the "▶ 1. " marker in front of each option
const OPTION_INDENT: u16 = 5;

/// One option, wrapped under its number so long glosses stay readable
fn wrapped_option(idx: usize, option: &str, selected: bool, width: u16) -> Vec<Line<'static>> {
    let style = if selected {
        accent_bold_style().add_modifier(Modifier::REVERSED)
    } else {
        bold_style()
    };
    let marker = if selected { "▶" } else { " " };
    wrap_columns(option, width)
        .into_iter()
        .enumerate()
        .map(|(row, piece)| {
            let prefix = if row == 0 {
                format!("{marker} {}. ", idx + 1)
            } else {
                " ".repeat(OPTION_INDENT as usize)
            };
            Line::from(Span::styled(format!("{prefix}{piece}"), style))
        })
        .collect()
}
