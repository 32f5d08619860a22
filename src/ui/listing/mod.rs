mod intent;
mod reducer;
mod state;

pub use intent::ListingIntent;
pub use reducer::ListingReducer;
pub use state::{ListingState, CARD_HEIGHT};
