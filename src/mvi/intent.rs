/// Marker trait for intents.
///
/// Intents carry user actions (draw, reveal, mark) as well as the result of
/// side effects performed before dispatch (a write that succeeded or failed).
pub trait Intent: Send + 'static {}
