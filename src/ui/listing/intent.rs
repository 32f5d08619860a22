use crate::ui::mvi::Intent;

/// Viewport changes. `len` is the number of rendered cards at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingIntent {
    Resize { visible: usize, len: usize },
    Move { delta: isize, len: usize },
    PageDown { len: usize },
    PageUp { len: usize },
    First,
    Last { len: usize },
    /// The list was replaced; go back to the top.
    Reset,
}

impl Intent for ListingIntent {}
