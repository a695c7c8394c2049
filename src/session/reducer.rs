//! Reducer for the quiz session.

use crate::mvi::Reducer;

use super::intent::SessionIntent;
use super::state::SessionState;

/// Pure transition function. Picking the row and writing the learned flag
/// happen in `QuizSession` before the matching intent is dispatched.
pub struct SessionReducer;

impl Reducer for SessionReducer {
    type State = SessionState;
    type Intent = SessionIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        if state.ended {
            return state;
        }

        match intent {
            SessionIntent::Draw { item } => SessionState {
                current: Some(item),
                revealed: false,
                error: None,
                ..state
            },

            SessionIntent::Reveal => match state.current {
                Some(_) => SessionState {
                    revealed: true,
                    error: None,
                    ..state
                },
                None => state,
            },

            SessionIntent::KnownRecorded => match state.current {
                Some(_) => SessionState {
                    current: None,
                    revealed: false,
                    correct: state.correct + 1,
                    attempts: state.attempts + 1,
                    error: None,
                    ..state
                },
                None => state,
            },

            SessionIntent::KnownFailed { message } => match state.current {
                Some(_) => SessionState {
                    error: Some(message),
                    ..state
                },
                None => state,
            },

            SessionIntent::MarkUnknown => match state.current {
                Some(_) => SessionState {
                    current: None,
                    revealed: false,
                    attempts: state.attempts + 1,
                    error: None,
                    ..state
                },
                None => state,
            },

            SessionIntent::End => SessionState {
                current: None,
                revealed: false,
                ended: true,
                error: None,
                ..state
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::RowIdentity;
    use crate::session::Phase;

    fn drawn(index: usize) -> SessionState {
        SessionReducer::reduce(
            SessionState::default(),
            SessionIntent::Draw {
                item: RowIdentity::from_index(index),
            },
        )
    }

    #[test]
    fn initial_state_is_idle() {
        let state = SessionState::default();
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.correct(), 0);
        assert_eq!(state.attempts(), 0);
    }

    #[test]
    fn draw_sets_current_and_hides_characters() {
        let state = drawn(3);
        assert_eq!(state.phase(), Phase::ItemDrawn);
        assert_eq!(state.current(), Some(RowIdentity::from_index(3)));
    }

    #[test]
    fn redraw_replaces_item_and_hides_again() {
        let state = SessionReducer::reduce(drawn(0), SessionIntent::Reveal);
        let state = SessionReducer::reduce(
            state,
            SessionIntent::Draw {
                item: RowIdentity::from_index(1),
            },
        );
        assert_eq!(state.phase(), Phase::ItemDrawn);
        assert_eq!(state.current(), Some(RowIdentity::from_index(1)));
        assert_eq!(state.attempts(), 0);
    }

    #[test]
    fn reveal_is_idempotent() {
        let once = SessionReducer::reduce(drawn(0), SessionIntent::Reveal);
        let twice = SessionReducer::reduce(once.clone(), SessionIntent::Reveal);
        assert_eq!(once, twice);
        assert_eq!(twice.phase(), Phase::ItemRevealed);
    }

    #[test]
    fn reveal_without_item_is_noop() {
        let state = SessionReducer::reduce(SessionState::default(), SessionIntent::Reveal);
        assert_eq!(state, SessionState::default());
    }

    #[test]
    fn known_recorded_counts_both() {
        let state = SessionReducer::reduce(drawn(0), SessionIntent::KnownRecorded);
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!((state.correct(), state.attempts()), (1, 1));
        assert!(!state.is_revealed());
    }

    #[test]
    fn known_failed_keeps_item_and_counters() {
        let before = SessionReducer::reduce(drawn(2), SessionIntent::Reveal);
        let after = SessionReducer::reduce(
            before.clone(),
            SessionIntent::KnownFailed {
                message: "quota exceeded".to_string(),
            },
        );
        assert_eq!(after.current(), before.current());
        assert_eq!(after.phase(), Phase::ItemRevealed);
        assert_eq!(after.attempts(), 0);
        assert_eq!(after.error(), Some("quota exceeded"));
    }

    #[test]
    fn success_clears_previous_error() {
        let state = SessionReducer::reduce(
            drawn(0),
            SessionIntent::KnownFailed {
                message: "offline".to_string(),
            },
        );
        let state = SessionReducer::reduce(state, SessionIntent::KnownRecorded);
        assert!(state.error().is_none());
        assert_eq!(state.correct(), 1);
    }

    #[test]
    fn mark_unknown_counts_attempt_only() {
        let state = SessionReducer::reduce(drawn(0), SessionIntent::MarkUnknown);
        assert_eq!((state.correct(), state.attempts()), (0, 1));
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn marks_without_item_are_noops() {
        for intent in [
            SessionIntent::KnownRecorded,
            SessionIntent::MarkUnknown,
            SessionIntent::KnownFailed {
                message: "x".to_string(),
            },
        ] {
            let state = SessionReducer::reduce(SessionState::default(), intent);
            assert_eq!(state, SessionState::default());
        }
    }

    #[test]
    fn end_discards_current_without_scoring() {
        let state = SessionReducer::reduce(drawn(0), SessionIntent::End);
        assert_eq!(state.phase(), Phase::Ended);
        assert!(state.current().is_none());
        assert_eq!((state.correct(), state.attempts()), (0, 0));
    }

    #[test]
    fn ended_is_terminal() {
        let ended = SessionReducer::reduce(SessionState::default(), SessionIntent::End);
        for intent in [
            SessionIntent::Draw {
                item: RowIdentity::from_index(0),
            },
            SessionIntent::Reveal,
            SessionIntent::KnownRecorded,
            SessionIntent::MarkUnknown,
            SessionIntent::End,
        ] {
            assert_eq!(SessionReducer::reduce(ended.clone(), intent), ended);
        }
    }

    #[test]
    fn correct_never_exceeds_attempts() {
        let script = [
            SessionIntent::KnownRecorded,
            SessionIntent::Draw {
                item: RowIdentity::from_index(0),
            },
            SessionIntent::MarkUnknown,
            SessionIntent::Draw {
                item: RowIdentity::from_index(1),
            },
            SessionIntent::Reveal,
            SessionIntent::KnownRecorded,
            SessionIntent::Draw {
                item: RowIdentity::from_index(2),
            },
            SessionIntent::KnownFailed {
                message: "x".to_string(),
            },
            SessionIntent::KnownRecorded,
        ];
        let mut state = SessionState::default();
        for intent in script {
            state = SessionReducer::reduce(state, intent);
            assert!(state.correct() <= state.attempts());
        }
        assert_eq!((state.correct(), state.attempts()), (2, 3));
    }
}
