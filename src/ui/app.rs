use crate::dataset::{Dataset, VocabularyRow};
use crate::session::{Phase, QuizSession, SessionState, SessionSummary};
use crate::source::DataSource;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long an informational notice stays on screen.
const NOTICE_TTL: Duration = Duration::from_secs(3);

/// User actions the presentation layer dispatches.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QuizAction {
    Draw,
    Reveal,
    MarkKnown,
    MarkUnknown,
    EndSession,
    Refresh,
    Quit,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Clone, Debug)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    shown_at: Instant,
}

pub struct App {
    should_quit: bool,
    source: Arc<dyn DataSource>,
    dataset: Dataset,
    session: QuizSession,
    /// Set when the sheet can no longer be used; only quitting is allowed.
    fatal: Option<String>,
    notice: Option<Notice>,
    /// A learned-flag write is in flight.
    pending: bool,
    worksheet: String,
}

impl App {
    pub fn new(source: Arc<dyn DataSource>, dataset: Dataset, worksheet: impl Into<String>) -> Self {
        let session = QuizSession::new(Arc::clone(&source));
        Self::with_session(source, dataset, session, worksheet)
    }

    pub fn with_session(
        source: Arc<dyn DataSource>,
        dataset: Dataset,
        session: QuizSession,
        worksheet: impl Into<String>,
    ) -> Self {
        Self {
            should_quit: false,
            source,
            dataset,
            session,
            fatal: None,
            notice: None,
            pending: false,
            worksheet: worksheet.into(),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn state(&self) -> &SessionState {
        self.session.state()
    }

    pub fn summary(&self) -> SessionSummary {
        self.session.summary()
    }

    pub fn worksheet(&self) -> &str {
        &self.worksheet
    }

    pub fn fatal(&self) -> Option<&str> {
        self.fatal.as_deref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    /// The row under the current item, if it is still in the snapshot.
    pub fn current_row(&self) -> Option<&VocabularyRow> {
        self.state().current().and_then(|id| self.dataset.row(id))
    }

    /// Whether `action` is offered in the current state.
    pub fn is_enabled(&self, action: QuizAction) -> bool {
        if action == QuizAction::Quit {
            return true;
        }
        if self.fatal.is_some() || self.pending {
            return false;
        }
        let phase = self.state().phase();
        match action {
            QuizAction::Draw => phase != Phase::Ended && !self.dataset.pool().is_empty(),
            QuizAction::Reveal => phase == Phase::ItemDrawn,
            QuizAction::MarkKnown | QuizAction::MarkUnknown => {
                matches!(phase, Phase::ItemDrawn | Phase::ItemRevealed)
            }
            QuizAction::EndSession | QuizAction::Refresh => phase != Phase::Ended,
            QuizAction::Quit => true,
        }
    }

    /// Actions that block on the sheet and should show a pending notice first.
    pub fn is_write(&self, action: QuizAction) -> bool {
        action == QuizAction::MarkKnown && self.is_enabled(action)
    }

    pub fn handle(&mut self, action: QuizAction) {
        if !self.is_enabled(action) {
            return;
        }

        match action {
            QuizAction::Quit => self.request_quit(),
            QuizAction::Draw => {
                // Draw from a fresh read so edits made elsewhere are honored.
                if !self.reload() {
                    return;
                }
                if self.session.draw_new(self.dataset.pool()).is_none() {
                    self.set_notice(NoticeKind::Info, "Every word is already learned.");
                }
            }
            QuizAction::Reveal => self.session.reveal(),
            QuizAction::MarkKnown => {
                if self.session.mark_known().is_ok() {
                    self.set_notice(NoticeKind::Info, "Sheet updated (learned = 1)");
                    self.reload();
                }
            }
            QuizAction::MarkUnknown => self.session.mark_unknown(),
            QuizAction::EndSession => self.session.end_session(),
            QuizAction::Refresh => {
                if self.reload() {
                    self.set_notice(
                        NoticeKind::Info,
                        format!("Reloaded: {} words to learn", self.dataset.pool().len()),
                    );
                }
            }
        }
    }

    pub fn on_tick(&mut self) {
        let expired = self.notice.as_ref().is_some_and(|notice| {
            notice.kind == NoticeKind::Info && notice.shown_at.elapsed() >= NOTICE_TTL
        });
        if expired {
            self.notice = None;
        }
    }

    /// Replace the snapshot. Returns false when the read failed.
    fn reload(&mut self) -> bool {
        match Dataset::load(self.source.as_ref()) {
            Ok(dataset) => {
                self.dataset = dataset;
                true
            }
            Err(err) if err.is_fatal() => {
                tracing::error!(error = %err, "Sheet no longer usable");
                self.fatal = Some(err.to_string());
                false
            }
            Err(err) => {
                tracing::warn!(error = %err, "Reload failed");
                self.set_notice(NoticeKind::Error, err.to_string());
                false
            }
        }
    }

    fn set_notice(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notice = Some(Notice {
            kind,
            text: text.into(),
            shown_at: Instant::now(),
        });
    }
}
