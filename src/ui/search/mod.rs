mod intent;
mod reducer;
mod state;

pub use intent::SearchIntent;
pub use reducer::SearchReducer;
pub use state::SearchBoxState;
