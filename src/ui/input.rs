use crate::ui::app::QuizAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Key bindings, in the order the footer shows them.
pub const BINDINGS: &[(&str, &str, QuizAction)] = &[
    ("n", "New word", QuizAction::Draw),
    ("s", "Show characters", QuizAction::Reveal),
    ("k", "I know it", QuizAction::MarkKnown),
    ("u", "Not yet", QuizAction::MarkUnknown),
    ("e", "End session", QuizAction::EndSession),
    ("r", "Reload", QuizAction::Refresh),
    ("q", "Quit", QuizAction::Quit),
];

pub fn key_to_action(key: KeyEvent) -> Option<QuizAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(QuizAction::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(QuizAction::Quit),
        KeyCode::Char(' ') => Some(QuizAction::Draw),
        KeyCode::Char(ch) => {
            let ch = ch.to_ascii_lowercase();
            BINDINGS
                .iter()
                .find(|(binding, _, _)| binding.starts_with(ch))
                .map(|(_, _, action)| *action)
        }
        _ => None,
    }
}
