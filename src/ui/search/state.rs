use crate::ui::mvi::UiState;

/// Text of the search box and the cursor position in chars.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchBoxState {
    pub query: String,
    pub cursor: usize,
}

impl UiState for SearchBoxState {}

impl SearchBoxState {
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    /// Byte offset of the cursor in `query`.
    pub fn cursor_byte(&self) -> usize {
        byte_offset(&self.query, self.cursor)
    }
}

pub(super) fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}
