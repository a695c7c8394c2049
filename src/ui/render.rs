use crate::ui::app::{App, NoticeKind};
use crate::ui::footer::Footer;
use crate::ui::header::{Header, PoolCounts};
use crate::ui::layout::{centered_rect_by_size, layout_regions};
use crate::ui::theme::{
    GLOBAL_BORDER, HANZI_RED, HEADER_SEPARATOR, HEADER_TEXT, POPUP_BORDER, STATUS_ERROR,
    STATUS_OK, STATUS_WARN,
};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let regions = layout_regions(frame.area());

    let counts = PoolCounts {
        to_learn: app.dataset().pool().len(),
        learned: app.dataset().learned_count(),
        total: app.dataset().len(),
    };
    frame.render_widget(Header::new().widget(app.worksheet(), counts), regions.header);

    frame.render_widget(Clear, regions.body);
    let body = body_lines(app);
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(GLOBAL_BORDER)),
            ),
        regions.body,
    );

    frame.render_widget(stats_bar(app), regions.stats);
    frame.render_widget(Footer::new().widget(app, regions.footer), regions.footer);

    if app.is_pending() {
        draw_popup(frame, regions.body, "Saving", vec![Line::from("Writing to sheet...")]);
    }
}

fn body_lines(app: &App) -> Vec<Line<'static>> {
    let text = Style::default().fg(HEADER_TEXT);
    let hint = Style::default().fg(HEADER_SEPARATOR);
    let mut lines = vec![Line::from("")];

    if let Some(message) = app.fatal() {
        lines.push(Line::from(Span::styled(
            "The sheet can no longer be used.",
            Style::default().fg(STATUS_ERROR).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(message.to_string(), text)));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Press q to quit.", hint)));
        return lines;
    }

    let state = app.state();
    if state.is_ended() {
        let summary = app.summary();
        lines.push(Line::from(Span::styled(
            "Session ended",
            Style::default().fg(HANZI_RED).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Correct answers: {}", summary.correct),
            text,
        )));
        lines.push(Line::from(Span::styled(
            format!("Attempts: {}", summary.attempts),
            text,
        )));
        lines.push(Line::from(Span::styled(
            format!("Accuracy: {}%", summary.accuracy_percent()),
            text,
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Restart the program to start a new session. Press q to quit.",
            hint,
        )));
        return lines;
    }

    match state.current() {
        Some(id) => match app.current_row() {
            Some(row) => {
                lines.push(Line::from(Span::styled(
                    row.pinyin.clone(),
                    Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(Span::styled(row.translation.clone(), text)));
                lines.push(Line::from(""));
                if state.is_revealed() {
                    lines.push(Line::from(Span::styled(
                        row.characters.clone(),
                        Style::default().fg(HANZI_RED).add_modifier(Modifier::BOLD),
                    )));
                } else {
                    lines.push(Line::from(Span::styled("s: show characters", hint)));
                }
            }
            None => lines.push(Line::from(Span::styled(
                format!("{id} is no longer in the sheet"),
                Style::default().fg(STATUS_WARN),
            ))),
        },
        None if app.dataset().pool().is_empty() => {
            lines.push(Line::from(Span::styled(
                "Congratulations! Every word is learned.",
                Style::default().fg(STATUS_OK).add_modifier(Modifier::BOLD),
            )));
        }
        None => lines.push(Line::from(Span::styled("Press n to draw a word.", hint))),
    }

    if let Some(error) = state.error() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(STATUS_ERROR),
        )));
    }

    lines
}

fn stats_bar(app: &App) -> Paragraph<'static> {
    let summary = app.summary();
    let text = Style::default().fg(HEADER_TEXT);
    let separator = Style::default().fg(HEADER_SEPARATOR);
    let mut spans = vec![
        Span::styled(format!(" Correct: {}", summary.correct), text),
        Span::styled("  │  ", separator),
        Span::styled(format!("Attempts: {}", summary.attempts), text),
        Span::styled("  │  ", separator),
        Span::styled(format!("Accuracy: {}%", summary.accuracy_percent()), text),
    ];

    if let Some(notice) = app.notice() {
        let color = match notice.kind {
            NoticeKind::Info => STATUS_OK,
            NoticeKind::Error => STATUS_ERROR,
        };
        spans.push(Span::styled("  │  ", separator));
        spans.push(Span::styled(notice.text.clone(), Style::default().fg(color)));
    }

    Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GLOBAL_BORDER)),
    )
}

fn draw_popup(frame: &mut Frame<'_>, body: Rect, title: &str, lines: Vec<Line<'static>>) {
    let content_width = lines.iter().map(Line::width).max().unwrap_or(0) as u16;
    let width = content_width.saturating_add(4).max(title.len() as u16 + 4);
    let height = lines.len().saturating_add(2) as u16;
    let area = centered_rect_by_size(body, width, height);

    frame.render_widget(Clear, area);
    let popup = Block::default()
        .title(Span::styled(title.to_string(), Style::default().fg(HANZI_RED)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    frame.render_widget(Paragraph::new(lines).block(popup), area);
}
