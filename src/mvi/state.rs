/// Marker trait for state values.
///
/// `Default` is the initial state; `Clone + PartialEq` let callers
/// snapshot a state and detect changes.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
