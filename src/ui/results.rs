use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, Widget},
};

use crate::app::App;
use crate::ui::{
    accent_bold_style, bold_style, italic_style, ACCENT, HORIZONTAL_MARGIN, VERTICAL_MARGIN,
};

pub fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(summary) = &app.summary else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // score
            Constraint::Length(1), // accuracy gauge
            Constraint::Length(1), // padding
            Constraint::Min(3),    // wrong answers
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(Span::styled("テスト結果", accent_bold_style()))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    Paragraph::new(Span::styled(
        format!(
            "{}/{} correct   {} acc   {}",
            summary.score,
            summary.question_count,
            summary.accuracy_percent(),
            app.range_label()
        ),
        bold_style(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Gauge::default()
        .gauge_style(Style::default().fg(ACCENT).bg(Color::Black))
        .ratio(summary.accuracy().clamp(0.0, 1.0))
        .label(summary.accuracy_percent())
        .render(chunks[2], buf);

    if summary.is_perfect() {
        Paragraph::new(Span::styled(
            "全問正解です！ perfect score",
            Style::default().fg(Color::Green).patch(bold_style()),
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .render(chunks[4], buf);
    } else {
        // borders and header
        let visible = chunks[4].height.saturating_sub(3) as usize;
        let total = summary.wrong_log.len();
        let offset = app.results_scroll.min(total.saturating_sub(visible));

        let rows: Vec<Row> = summary
            .wrong_log
            .iter()
            .skip(offset)
            .take(visible)
            .map(|w| {
                Row::new(vec![
                    Cell::from(w.prompt.clone()),
                    Cell::from(w.correct_answer.clone()).style(Style::default().fg(Color::Green)),
                    Cell::from(w.given_answer.clone()).style(Style::default().fg(Color::Red)),
                ])
            })
            .collect();

        let scroll_info = if total > visible {
            format!(" ({}/{} rows)", offset + rows.len(), total)
        } else {
            String::new()
        };

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(34),
                Constraint::Percentage(33),
                Constraint::Percentage(33),
            ],
        )
        .header(
            Row::new(vec![
                Cell::from("問題"),
                Cell::from("正しい答え"),
                Cell::from("あなたの答え"),
            ])
            .style(accent_bold_style()),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Wrong answers{scroll_info}")),
        );

        table.render(chunks[4], buf);
    }

    Paragraph::new(Span::styled(
        "(r)etry / (n)ew / ↑↓ scroll / (esc)ape",
        italic_style(),
    ))
    .render(chunks[5], buf);
}

#[cfg(test)]
mod tests {
    use crate::app::{App, AppState, QuizSettings};
    use crate::range::RangeSelection;
    use crate::results::QuizSummary;
    use crate::session::{Direction, WrongAnswer};
    use crate::ui::test_support::rendered;
    use crate::vocab::{VocabStore, WordEntry};
    use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

    fn app_with_summary(score: usize, total: usize) -> App {
        let store = VocabStore::new(vec![WordEntry::new(1, "a", "b")]);
        let mut app = App::new(
            store,
            QuizSettings {
                direction: Direction::TermToMeaning,
                range: RangeSelection::Chunk(0),
                question_count: total,
                vocab_path: None,
            },
        );
        app.summary = Some(QuizSummary {
            direction: Direction::TermToMeaning,
            score,
            question_count: total,
            wrong_log: (score..total)
                .map(|i| WrongAnswer {
                    prompt: format!("prompt{i}"),
                    correct_answer: format!("right{i}"),
                    given_answer: format!("given{i}"),
                })
                .collect(),
        });
        app.state = AppState::Results;
        app
    }

    #[test]
    fn test_results_perfect() {
        let app = app_with_summary(5, 5);
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);

        let text = rendered(&buffer);
        assert!(text.contains("5/5 correct"));
        assert!(text.contains("100.0%"));
        assert!(text.contains("perfect score"));
    }

    #[test]
    fn test_results_lists_wrong_answers() {
        let app = app_with_summary(1, 3);
        let area = Rect::new(0, 0, 100, 24);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);

        let text = rendered(&buffer);
        assert!(text.contains("1/3 correct"));
        assert!(text.contains("33.3%"));
        assert!(text.contains("prompt1"));
        assert!(text.contains("right2"));
        assert!(text.contains("given2"));
        assert!(text.contains("(r)etry"));
    }

    #[test]
    fn test_results_scrolls_long_wrong_log() {
        let mut app = app_with_summary(0, 50);
        app.results_scroll = 1000;
        let area = Rect::new(0, 0, 100, 20);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);

        let text = rendered(&buffer);
        assert!(text.contains("prompt49"));
        assert!(!text.contains("prompt0 "));
        assert!(text.contains("/50 rows)"));
    }
}
