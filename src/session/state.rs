use crate::dataset::RowIdentity;
use crate::mvi::UiState;

use super::summary::SessionSummary;

/// Where the session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No item drawn.
    Idle,
    /// Item drawn, characters hidden.
    ItemDrawn,
    /// Item drawn, characters visible.
    ItemRevealed,
    /// Terminal.
    Ended,
}

/// Quiz progress for one session. Never persisted.
///
/// Invariant: `correct <= attempts`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub(super) current: Option<RowIdentity>,
    pub(super) revealed: bool,
    pub(super) correct: u32,
    pub(super) attempts: u32,
    pub(super) ended: bool,
    /// Last failed write, cleared by the next successful transition.
    pub(super) error: Option<String>,
}

impl UiState for SessionState {}

impl SessionState {
    pub fn phase(&self) -> Phase {
        match (self.ended, self.current, self.revealed) {
            (true, _, _) => Phase::Ended,
            (false, None, _) => Phase::Idle,
            (false, Some(_), false) => Phase::ItemDrawn,
            (false, Some(_), true) => Phase::ItemRevealed,
        }
    }

    pub fn current(&self) -> Option<RowIdentity> {
        self.current
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary::new(self.correct, self.attempts)
    }
}
