use crate::ui::app::{App, Focus};
use crate::ui::search::SearchIntent;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Instant;

pub fn handle_key(app: &mut App, key: KeyEvent, now: Instant) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'q') || is_ctrl_char(key, 'c') {
        app.request_quit();
        return;
    }

    match app.focus() {
        Focus::Search => handle_search_key(app, key, now),
        Focus::List => handle_list_key(app, key),
        Focus::Detail => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                app.close_detail();
            }
        }
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent, now: Instant) {
    let intent = match key.code {
        KeyCode::Enter | KeyCode::Down | KeyCode::Tab => {
            app.focus_list();
            return;
        }
        KeyCode::Esc if app.search_box().is_empty() => {
            app.focus_list();
            return;
        }
        KeyCode::Esc => SearchIntent::Clear,
        KeyCode::Backspace => SearchIntent::Backspace,
        KeyCode::Delete => SearchIntent::Delete,
        KeyCode::Left => SearchIntent::MoveLeft,
        KeyCode::Right => SearchIntent::MoveRight,
        KeyCode::Home => SearchIntent::MoveHome,
        KeyCode::End => SearchIntent::MoveEnd,
        KeyCode::Char(ch) if !has_command_modifier(key) => SearchIntent::Insert(ch),
        _ => return,
    };
    app.edit_search(intent, now);
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.scroll(-1),
        KeyCode::Down | KeyCode::Char('j') => app.scroll(1),
        KeyCode::PageUp => app.page_up(),
        KeyCode::PageDown | KeyCode::Char(' ') => app.page_down(),
        KeyCode::Home | KeyCode::Char('g') => app.scroll_to_top(),
        KeyCode::End | KeyCode::Char('G') => app.scroll_to_bottom(),
        KeyCode::Enter => app.open_detail(),
        KeyCode::Char('/') | KeyCode::Tab => app.focus_search(),
        KeyCode::Esc | KeyCode::Char('q') => app.request_quit(),
        _ => {}
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::SHIFT)
}

fn has_command_modifier(key: KeyEvent) -> bool {
    key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}
