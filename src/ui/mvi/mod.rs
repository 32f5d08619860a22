//! Model-View-Intent (MVI) primitives for the UI layer.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! Widget state that reacts to keys (the search box, the list viewport)
//! goes through a reducer. Directory state does not: it is owned by
//! [`crate::directory::Directory`] and changes through its own methods.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
