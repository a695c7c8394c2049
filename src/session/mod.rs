//! Session state machine.
//!
//! # Components
//! - `state.rs`: `SessionState` and its derived `Phase`
//! - `intent.rs`: `SessionIntent`, the actions and write outcomes
//! - `reducer.rs`: `SessionReducer`, the pure transition function
//! - `controller.rs`: `QuizSession`, random draw and learned-flag write
//! - `summary.rs`: counters and accuracy

mod controller;
mod intent;
mod reducer;
mod state;
mod summary;

pub use controller::QuizSession;
pub use intent::SessionIntent;
pub use reducer::SessionReducer;
pub use state::{Phase, SessionState};
pub use summary::SessionSummary;
