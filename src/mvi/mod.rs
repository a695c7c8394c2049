//! Model-View-Intent primitives.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! - **State**: a value holding everything the view needs
//! - **Intent**: a user action or the outcome of a side effect
//! - **Reducer**: pure `(State, Intent) -> State`; side effects stay with the caller

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
