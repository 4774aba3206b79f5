use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;

use super::state::{AppState, Focus, NavEvent, View};

/// Lines moved by PageUp/PageDown.
const PAGE: u16 = 10;

/// Main event handler that dispatches on focus and the visible panel.
pub fn handle_event(event: Event, state: &mut AppState) {
    if let Event::Mouse(mouse_event) = event {
        return handle_mouse(mouse_event, state);
    }

    if let Event::Key(key_event) = event {
        if key_event.kind != KeyEventKind::Press {
            return;
        }

        if key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            state.should_quit = true;
            return;
        }

        // Function keys switch panels from anywhere.
        match key_event.code {
            KeyCode::F(1) => return state.activate(View::Home),
            KeyCode::F(2) => return state.activate(View::Search),
            KeyCode::F(3) => return state.activate(View::Movies),
            _ => {}
        }

        match (state.focus, state.view()) {
            (Focus::Sidebar, _) => handle_sidebar(key_event, state),
            (Focus::Content, View::Search) => handle_search(key_event, state),
            (Focus::Content, View::Home | View::Movies) => handle_reader(key_event, state),
        }
    }
}

/// A left click on a sidebar entry activates that panel.
fn handle_mouse(event: MouseEvent, state: &mut AppState) {
    if event.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    if let Some(view) = sidebar_entry_at(state, event.column, event.row) {
        state.activate(view);
    }
}

/// Entries start one line below the sidebar's top border and are separated
/// by a blank line.
fn sidebar_entry_at(state: &AppState, column: u16, row: u16) -> Option<View> {
    let area = state.nav_area;
    if !area.contains(Position::new(column, row)) {
        return None;
    }
    let line = row.checked_sub(area.y + 2)?;
    if line % 2 != 0 {
        return None;
    }
    View::ALL.get(usize::from(line / 2)).copied()
}

fn handle_sidebar(event: KeyEvent, state: &mut AppState) {
    match event.code {
        KeyCode::Up => state.navigate(NavEvent::Previous),
        KeyCode::Down => state.navigate(NavEvent::Next),
        KeyCode::Char('h') => state.activate(View::Home),
        KeyCode::Char('s') => state.activate(View::Search),
        KeyCode::Char('m') => state.activate(View::Movies),
        KeyCode::Enter | KeyCode::Tab | KeyCode::Right => state.focus_content(),
        KeyCode::Char('q') | KeyCode::Esc => state.should_quit = true,
        _ => {}
    }
}

/// Keys for the read-only panels (Home, Movies).
fn handle_reader(event: KeyEvent, state: &mut AppState) {
    if !handle_scroll(event, state) {
        match event.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc | KeyCode::Left => {
                state.focus_sidebar()
            }
            KeyCode::Char('q') => state.should_quit = true,
            _ => {}
        }
    }
}

fn handle_search(event: KeyEvent, state: &mut AppState) {
    if handle_scroll(event, state) {
        return;
    }

    match event.code {
        KeyCode::Enter => state.submit_search(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc => state.focus_sidebar(),
        code => {
            let Some(input) = state.search_input_mut() else {
                return;
            };
            match code {
                KeyCode::Char(c) if is_plain_text(event.modifiers) => input.insert(c),
                KeyCode::Backspace => input.backspace(),
                KeyCode::Delete => input.delete(),
                KeyCode::Left => input.left(),
                KeyCode::Right => input.right(),
                KeyCode::Home => input.home(),
                KeyCode::End => input.end(),
                _ => {}
            }
        }
    }
}

/// Alt and Ctrl chords are commands, not text.
fn is_plain_text(modifiers: KeyModifiers) -> bool {
    modifiers == KeyModifiers::NONE || modifiers == KeyModifiers::SHIFT
}

/// Scroll the content area. Returns whether the key was a scroll key.
fn handle_scroll(event: KeyEvent, state: &mut AppState) -> bool {
    match event.code {
        KeyCode::Up => state.scroll_up(1),
        KeyCode::Down => state.scroll_down(1),
        KeyCode::PageUp => state.scroll_up(PAGE),
        KeyCode::PageDown => state.scroll_down(PAGE),
        // Home/End edit the search input instead.
        KeyCode::Home if state.view() != View::Search => state.scroll_to_top(),
        KeyCode::End if state.view() != View::Search => state.scroll_to_bottom(),
        _ => return false,
    }
    true
}
