use crate::ui::mvi::Reducer;
use crate::ui::search::intent::SearchIntent;
use crate::ui::search::state::{byte_offset, SearchBoxState};

pub struct SearchReducer;

impl Reducer for SearchReducer {
    type State = SearchBoxState;
    type Intent = SearchIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        let SearchBoxState { mut query, cursor } = state;
        let len = query.chars().count();
        let cursor = cursor.min(len);

        match intent {
            SearchIntent::Insert(ch) if !ch.is_control() => {
                query.insert(byte_offset(&query, cursor), ch);
                SearchBoxState {
                    query,
                    cursor: cursor + 1,
                }
            }
            SearchIntent::Insert(_) => SearchBoxState { query, cursor },
            SearchIntent::Backspace if cursor > 0 => {
                query.remove(byte_offset(&query, cursor - 1));
                SearchBoxState {
                    query,
                    cursor: cursor - 1,
                }
            }
            SearchIntent::Delete if cursor < len => {
                query.remove(byte_offset(&query, cursor));
                SearchBoxState { query, cursor }
            }
            SearchIntent::Backspace | SearchIntent::Delete => SearchBoxState { query, cursor },
            SearchIntent::MoveLeft => SearchBoxState {
                query,
                cursor: cursor.saturating_sub(1),
            },
            SearchIntent::MoveRight => SearchBoxState {
                query,
                cursor: (cursor + 1).min(len),
            },
            SearchIntent::MoveHome => SearchBoxState { query, cursor: 0 },
            SearchIntent::MoveEnd => SearchBoxState { query, cursor: len },
            SearchIntent::Clear => SearchBoxState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(state: SearchBoxState, intents: &[SearchIntent]) -> SearchBoxState {
        intents
            .iter()
            .cloned()
            .fold(state, |state, intent| SearchReducer::reduce(state, intent))
    }

    fn typed(text: &str) -> SearchBoxState {
        apply(
            SearchBoxState::default(),
            &text.chars().map(SearchIntent::Insert).collect::<Vec<_>>(),
        )
    }

    #[test]
    fn insert_appends_at_cursor() {
        let state = typed("adyar");
        assert_eq!(state.query, "adyar");
        assert_eq!(state.cursor, 5);
    }

    #[test]
    fn edits_in_the_middle() {
        let state = apply(
            typed("chenai"),
            &[
                SearchIntent::MoveLeft,
                SearchIntent::MoveLeft,
                SearchIntent::Insert('n'),
            ],
        );
        assert_eq!(state.query, "chennai");
        assert_eq!(state.cursor, 5);

        let state = apply(state, &[SearchIntent::MoveHome, SearchIntent::Delete]);
        assert_eq!(state.query, "hennai");
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let state = apply(typed("ab"), &[SearchIntent::MoveHome, SearchIntent::Backspace]);
        assert_eq!(state.query, "ab");
    }

    #[test]
    fn handles_multibyte_chars() {
        let state = apply(typed("café"), &[SearchIntent::Backspace]);
        assert_eq!(state.query, "caf");
        let state = apply(typed("éa"), &[SearchIntent::MoveLeft, SearchIntent::Insert('x')]);
        assert_eq!(state.query, "éxa");
        assert_eq!(state.cursor_byte(), 3);
    }

    #[test]
    fn control_chars_are_ignored() {
        let state = apply(typed("a"), &[SearchIntent::Insert('\n')]);
        assert_eq!(state.query, "a");
    }

    #[test]
    fn clear_resets() {
        assert_eq!(
            apply(typed("abc"), &[SearchIntent::Clear]),
            SearchBoxState::default()
        );
    }
}
