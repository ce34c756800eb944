//! Event handling.
//!
//! Polls the terminal with a short timeout so the main loop keeps
//! redrawing while fetches are in flight, then dispatches by input mode.
//! While the error view is up, every key except retry and quit is
//! swallowed.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    poll, read, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::app::{App, Mode};
use crate::resource::ResourceKind;

/// Handle pending terminal events. Returns true when the app should quit.
pub fn handle_events(app: &mut App) -> Result<bool> {
    if poll(Duration::from_millis(100))? {
        match read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                return handle_key_event(app, key.code, key.modifiers);
            }
            Event::Mouse(mouse) => handle_mouse_event(app, mouse),
            _ => {}
        }
    }
    Ok(false)
}

fn handle_key_event(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Result<bool> {
    // Ctrl+C always quits, whatever the mode.
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    // Any keypress dismisses a transient notice.
    app.notice = None;

    // The error view only offers retry and quit.
    if app.in_error_state() && app.mode == Mode::Normal {
        match code {
            KeyCode::Char('r') | KeyCode::Enter => app.retry(),
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            _ => {}
        }
        return Ok(false);
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, code),
        Mode::Search => handle_search_mode(app, code, modifiers),
        Mode::Command => handle_command_mode(app, code, modifiers),
        Mode::Help => handle_help_mode(app, code),
        Mode::Detail => handle_detail_mode(app, code, modifiers),
    }
}

fn handle_normal_mode(app: &mut App, code: KeyCode) -> Result<bool> {
    match code {
        KeyCode::Char('q') => return Ok(true),

        // Row selection
        KeyCode::Char('j') | KeyCode::Down => app.next_row(),
        KeyCode::Char('k') | KeyCode::Up => app.previous_row(),
        KeyCode::Char('g') | KeyCode::Home => app.go_to_top(),
        KeyCode::Char('G') | KeyCode::End => app.go_to_bottom(),

        // Paging
        KeyCode::Char(']') | KeyCode::Right | KeyCode::PageDown => app.next_page(),
        KeyCode::Char('[') | KeyCode::Left | KeyCode::PageUp => app.prev_page(),
        KeyCode::Char('{') => app.first_page(),
        KeyCode::Char('}') => app.last_page(),

        // Resource tabs
        KeyCode::Char('1') | KeyCode::Char('c') => app.switch_resource(ResourceKind::Character),
        KeyCode::Char('2') | KeyCode::Char('l') => app.switch_resource(ResourceKind::Location),
        KeyCode::Char('3') | KeyCode::Char('e') => app.switch_resource(ResourceKind::Episode),

        // Search (characters only)
        KeyCode::Char('/') => app.enter_search_mode(),
        KeyCode::Esc => app.clear_search(),

        KeyCode::Enter | KeyCode::Char('d') => app.enter_detail_mode(),
        KeyCode::Char('R') => app.refresh(),
        KeyCode::Char(':') => app.enter_command_mode(),
        KeyCode::Char('?') => app.enter_help_mode(),
        _ => {}
    }
    Ok(false)
}

fn handle_search_mode(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Result<bool> {
    match code {
        KeyCode::Esc => {
            app.exit_mode();
            app.clear_search();
        }
        KeyCode::Enter => {
            app.exit_mode();
            app.apply_search();
        }
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_input.push(c);
        }
        _ => {}
    }
    Ok(false)
}

fn handle_command_mode(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Result<bool> {
    match code {
        KeyCode::Esc => app.exit_mode(),
        KeyCode::Enter => {
            let should_quit = app.execute_command();
            // Commands like :help switch modes themselves; only fall back
            // to Normal when the command box is still the active mode.
            if app.mode == Mode::Command {
                app.exit_mode();
            }
            return Ok(should_quit);
        }
        KeyCode::Backspace => {
            app.command_text.pop();
            app.update_command_suggestions();
        }
        KeyCode::Tab | KeyCode::Right => app.apply_suggestion(),
        KeyCode::Down => app.next_suggestion(),
        KeyCode::Up => app.prev_suggestion(),
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_text.push(c);
            app.update_command_suggestions();
        }
        _ => {}
    }
    Ok(false)
}

fn handle_help_mode(app: &mut App, code: KeyCode) -> Result<bool> {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter => {
            app.exit_mode();
        }
        _ => {}
    }
    Ok(false)
}

fn handle_detail_mode(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Result<bool> {
    match code {
        KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.detail_scroll = app.detail_scroll.saturating_add(10);
        }
        KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.detail_scroll = app.detail_scroll.saturating_sub(10);
        }
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => app.exit_mode(),
        KeyCode::Char('j') | KeyCode::Down => {
            app.detail_scroll = app.detail_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.detail_scroll = app.detail_scroll.saturating_sub(1);
        }
        KeyCode::PageDown => app.detail_scroll = app.detail_scroll.saturating_add(10),
        KeyCode::PageUp => app.detail_scroll = app.detail_scroll.saturating_sub(10),
        KeyCode::Char('g') | KeyCode::Home => app.detail_scroll = 0,
        KeyCode::Char('G') | KeyCode::End => app.detail_scroll_to_bottom(20),
        _ => {}
    }
    Ok(false)
}

fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    // Click targets only exist in the normal table view.
    if app.mode != Mode::Normal || app.in_error_state() {
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.click_at(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.next_row(),
        MouseEventKind::ScrollUp => app.previous_row(),
        _ => {}
    }
}
