use crate::ui::mvi::UiState;

/// Rows one card occupies in the list, including its separator.
pub const CARD_HEIGHT: u16 = 4;

/// Viewport over the rendered cards, measured in cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingState {
    pub selected: usize,
    /// Index of the first visible card.
    pub offset: usize,
    /// Cards that fit in the list area.
    pub visible: usize,
}

impl Default for ListingState {
    fn default() -> Self {
        Self {
            selected: 0,
            offset: 0,
            visible: 1,
        }
    }
}

impl UiState for ListingState {}

impl ListingState {
    /// Range of card indices currently on screen.
    pub fn visible_range(&self, len: usize) -> std::ops::Range<usize> {
        let start = self.offset.min(len);
        start..(start + self.visible).min(len)
    }

    /// Whether the row after the last card is within `margin` cards of the
    /// viewport.
    pub fn sentinel_visible(&self, len: usize, margin: usize) -> bool {
        self.offset + self.visible + margin > len
    }
}
