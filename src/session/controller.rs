//! Quiz session: performs the side effects around the reducer.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use uuid::Uuid;

use crate::dataset::{LearningPool, RowIdentity, LEARNED};
use crate::mvi::Reducer;
use crate::source::{DataSource, WriteError};

use super::intent::SessionIntent;
use super::reducer::SessionReducer;
use super::state::SessionState;
use super::summary::SessionSummary;

/// One quiz run, from the first draw until `end_session`.
///
/// Actions are expected one at a time; `mark_known` blocks on the write.
pub struct QuizSession {
    id: Uuid,
    source: Arc<dyn DataSource>,
    state: SessionState,
    rng: StdRng,
}

impl QuizSession {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self::with_rng(source, StdRng::from_os_rng())
    }

    /// Deterministic draws, for tests.
    pub fn with_rng(source: Arc<dyn DataSource>, rng: StdRng) -> Self {
        let id = Uuid::new_v4();
        tracing::info!(session_id = %id, "Session started");
        Self {
            id,
            source,
            state: SessionState::default(),
            rng,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn summary(&self) -> SessionSummary {
        self.state.summary()
    }

    /// Pick a row uniformly from `pool`. `None` when the pool is empty or the
    /// session has ended.
    pub fn draw_new(&mut self, pool: &LearningPool) -> Option<RowIdentity> {
        if self.state.is_ended() {
            return None;
        }
        let item = *pool.members().choose(&mut self.rng)?;
        tracing::debug!(session_id = %self.id, row = item.sheet_row(), "Item drawn");
        self.dispatch(SessionIntent::Draw { item });
        Some(item)
    }

    pub fn reveal(&mut self) {
        self.dispatch(SessionIntent::Reveal);
    }

    /// Write the learned flag for the current item, then count it as correct.
    ///
    /// On failure the item stays current, counters are untouched and the
    /// message is kept in `state().error()`. No-op without a current item.
    pub fn mark_known(&mut self) -> Result<(), WriteError> {
        if self.state.is_ended() {
            return Ok(());
        }
        let Some(item) = self.state.current() else {
            return Ok(());
        };

        match self.source.write_learned_flag(item, LEARNED) {
            Ok(()) => {
                tracing::info!(session_id = %self.id, row = item.sheet_row(), "Marked known");
                self.dispatch(SessionIntent::KnownRecorded);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    session_id = %self.id,
                    row = item.sheet_row(),
                    error = %err,
                    "Mark known failed"
                );
                self.dispatch(SessionIntent::KnownFailed {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    pub fn mark_unknown(&mut self) {
        if let Some(item) = self.state.current() {
            tracing::debug!(session_id = %self.id, row = item.sheet_row(), "Marked unknown");
        }
        self.dispatch(SessionIntent::MarkUnknown);
    }

    pub fn end_session(&mut self) {
        self.dispatch(SessionIntent::End);
        tracing::info!(
            session_id = %self.id,
            correct = self.state.correct(),
            attempts = self.state.attempts(),
            "Session ended"
        );
    }

    fn dispatch(&mut self, intent: SessionIntent) {
        self.state = SessionReducer::reduce(std::mem::take(&mut self.state), intent);
    }
}
