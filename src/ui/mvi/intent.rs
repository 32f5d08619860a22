/// Marker trait for intents: key presses and the system events derived
/// from them. Reducers turn intents into new states.
pub trait Intent: Send + 'static {}
