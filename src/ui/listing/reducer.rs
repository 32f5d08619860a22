use crate::ui::listing::intent::ListingIntent;
use crate::ui::listing::state::ListingState;
use crate::ui::mvi::Reducer;

pub struct ListingReducer;

impl Reducer for ListingReducer {
    type State = ListingState;
    type Intent = ListingIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ListingIntent::Resize { visible, len } => scroll_to(
                ListingState {
                    visible: visible.max(1),
                    ..state
                },
                state.selected,
                len,
            ),
            ListingIntent::Move { delta, len } => {
                let target = state.selected.saturating_add_signed(delta);
                scroll_to(state, target, len)
            }
            ListingIntent::PageDown { len } => {
                scroll_to(state, state.selected + state.visible, len)
            }
            ListingIntent::PageUp { len } => {
                scroll_to(state, state.selected.saturating_sub(state.visible), len)
            }
            ListingIntent::First => ListingState {
                selected: 0,
                offset: 0,
                ..state
            },
            ListingIntent::Last { len } => scroll_to(state, len.saturating_sub(1), len),
            ListingIntent::Reset => ListingState {
                selected: 0,
                offset: 0,
                visible: state.visible,
            },
        }
    }
}

/// Selects `target` (clamped to the list) and scrolls just enough to show it.
fn scroll_to(state: ListingState, target: usize, len: usize) -> ListingState {
    if len == 0 {
        return ListingState {
            selected: 0,
            offset: 0,
            ..state
        };
    }
    let selected = target.min(len - 1);
    let offset = if selected < state.offset {
        selected
    } else if selected >= state.offset + state.visible {
        selected + 1 - state.visible
    } else {
        state.offset
    };
    ListingState {
        selected,
        offset,
        visible: state.visible,
    }
}
