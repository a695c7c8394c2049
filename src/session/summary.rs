//! Session statistics shown in the stats bar and on the results screen.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    pub correct: u32,
    pub attempts: u32,
}

impl SessionSummary {
    pub fn new(correct: u32, attempts: u32) -> Self {
        Self { correct, attempts }
    }

    /// `correct / attempts * 100`, rounded half to even; 0 with no attempts.
    pub fn accuracy_percent(&self) -> u32 {
        if self.attempts == 0 {
            return 0;
        }
        let percent = self.correct as f64 / self.attempts as f64 * 100.0;
        percent.round_ties_even() as u32
    }
}

impl std::fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Correct: {} | Attempts: {} | Accuracy: {}%",
            self.correct,
            self.attempts,
            self.accuracy_percent()
        )
    }
}
