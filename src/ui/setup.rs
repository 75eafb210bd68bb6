use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::app::App;
use crate::range::{RangeBound, RangeSelection};
use crate::ui::{
    accent_bold_style, bold_style, dim_style, italic_style, HORIZONTAL_MARGIN, VERTICAL_MARGIN,
};

pub fn render_setup(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Length(5), // settings
            Constraint::Length(2), // message
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(Span::styled("古文単語テスト", accent_bold_style()))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let settings = vec![
        setting_line("direction", app.settings.direction.to_string(), "(d)"),
        range_line(app),
        setting_line(
            "questions",
            format!("{} / max {}", app.settings.question_count, app.question_limit()),
            "↑/↓",
        ),
    ];

    Paragraph::new(settings)
        .block(Block::default().borders(Borders::ALL).title("Settings"))
        .render(chunks[1], buf);

    if let Some(message) = &app.message {
        Paragraph::new(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Red).patch(bold_style()),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);
    }

    Paragraph::new(Span::styled(
        "(enter) start / (d)irection / (m)ode ←→ range / ↑↓ count / (esc)ape",
        italic_style(),
    ))
    .render(chunks[4], buf);
}

fn range_line(app: &App) -> Line<'static> {
    let size = app
        .range_size()
        .map(|n| format!("  ({n} entries)"))
        .unwrap_or_default();

    let RangeSelection::Custom { start, end } = app.settings.range else {
        return setting_line("range", format!("{}{size}", app.range_label()), "blocks  ←/→ (m)");
    };

    let bound_style = |bound: RangeBound| {
        if app.range_bound == bound {
            accent_bold_style().add_modifier(Modifier::UNDERLINED)
        } else {
            bold_style()
        }
    };
    Line::from(vec![
        Span::styled(format!("{:>10}: ", "range"), dim_style()),
        Span::styled("No.", bold_style()),
        Span::styled(start.to_string(), bound_style(RangeBound::Start)),
        Span::styled("〜No.", bold_style()),
        Span::styled(end.to_string(), bound_style(RangeBound::End)),
        Span::styled(size, bold_style()),
        Span::styled("  custom  ←/→ [/] (tab) (m)", dim_style()),
    ])
}

fn setting_line(name: &str, value: String, keys: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{name:>10}: "), dim_style()),
        Span::styled(value, bold_style()),
        Span::styled(format!("  {keys}"), dim_style()),
    ])
}
