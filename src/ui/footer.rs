use crate::ui::app::App;
use crate::ui::input::BINDINGS;
use crate::ui::theme::{GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Footer;

impl Default for Footer {
    fn default() -> Self {
        Self::new()
    }
}

impl Footer {
    pub fn new() -> Self {
        Self
    }

    /// Key hints; actions unavailable in the current state are dimmed.
    pub fn widget(&self, app: &App, area: Rect) -> Paragraph<'static> {
        let enabled_style = Style::default().fg(HEADER_TEXT);
        let disabled_style = Style::default()
            .fg(HEADER_SEPARATOR)
            .add_modifier(Modifier::DIM);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);

        let mut spans = vec![Span::raw(" ")];
        let mut hints_width = 1;
        for (idx, (key, label, action)) in BINDINGS.iter().enumerate() {
            if idx > 0 {
                spans.push(Span::styled(" │ ", separator_style));
                hints_width += 3;
            }
            let style = if app.is_enabled(*action) {
                enabled_style
            } else {
                disabled_style
            };
            let hint = format!("{key}: {label}");
            hints_width += hint.chars().count();
            spans.push(Span::styled(hint, style));
        }

        let version = format!("v{} ", VERSION);
        // Char count, not byte count
        let content_width = area.width.saturating_sub(2) as usize;
        let padding = content_width
            .saturating_sub(hints_width)
            .saturating_sub(version.chars().count());
        let dim = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);
        spans.push(Span::styled(" ".repeat(padding), dim));
        spans.push(Span::styled(version, dim));

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(GLOBAL_BORDER)),
            )
    }
}
