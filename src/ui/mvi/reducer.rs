use super::intent::Intent;
use super::state::UiState;

/// The only place a widget state changes: `(State, Intent) -> State`.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    /// Must be pure. Anything the transition depends on travels in the intent.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
