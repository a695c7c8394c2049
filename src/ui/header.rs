use crate::ui::theme::{GLOBAL_BORDER, HANZI_RED, HEADER_SEPARATOR, HEADER_TEXT, STATUS_OK};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Snapshot counts shown in the header.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PoolCounts {
    pub to_learn: usize,
    pub learned: usize,
    pub total: usize,
}

pub struct Header;

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, worksheet: &str, counts: PoolCounts) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let title_style = Style::default().fg(HANZI_RED).add_modifier(Modifier::BOLD);
        let learned_style = Style::default().fg(STATUS_OK);
        let line = Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled("汉字 Quiz", title_style),
            Span::styled("  │  ", separator_style),
            Span::styled(worksheet.to_string(), text_style),
            Span::styled("  │  ", separator_style),
            Span::styled(
                format!("{} to learn / {} words", counts.to_learn, counts.total),
                text_style,
            ),
            Span::styled("  │  ", separator_style),
            Span::styled(format!("{} learned", counts.learned), learned_style),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
