/// Marker trait for widget state.
///
/// `Default` lets `dispatch_mvi!` take the state out of its field while the
/// reducer runs.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
