use crate::ui::mvi::Intent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchIntent {
    Insert(char),
    /// Delete the char before the cursor.
    Backspace,
    /// Delete the char under the cursor.
    Delete,
    MoveLeft,
    MoveRight,
    MoveHome,
    MoveEnd,
    Clear,
}

impl Intent for SearchIntent {}
