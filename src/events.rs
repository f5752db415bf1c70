use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};

/// Where the `e` key writes its export.
pub const EXPORT_PATH: &str = "healthwatch_export.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // With a site selected, keys drive the detail overlay
    if app.selection.is_selected() {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                app.close_detail();
            }
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Home => app.select_first(),
            KeyCode::End => app.select_last(),
            _ => {}
        }
        return;
    }

    if app.filter_active {
        handle_filter_input(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),

        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),

        KeyCode::Char('1') => app.set_view(View::Dashboard),
        KeyCode::Char('2') => app.set_view(View::Trends),
        KeyCode::Char('3') => app.set_view(View::Water),
        KeyCode::Char('4') => app.set_view(View::Villages),

        // Navigation (up/down for items, left/right for tabs)
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        KeyCode::Enter => app.enter_detail(),
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        KeyCode::Char('r') => {
            app.reload_data();
        }

        KeyCode::Char('?') => app.toggle_help(),

        KeyCode::Char('x') => app.dismiss_alert(),
        KeyCode::Char('X') => app.restore_alerts(),

        KeyCode::Char('s') => app.cycle_sort(),
        KeyCode::Char('S') => app.toggle_sort_direction(),

        KeyCode::Char('/') => {
            if matches!(app.current_view, View::Water | View::Villages) {
                app.start_filter();
            }
        }
        KeyCode::Char('c') => {
            if !app.filter_text.is_empty() {
                app.clear_filter();
            }
        }

        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_PATH);
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle key input while filter is active
fn handle_filter_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            app.filter_active = false;
        }

        // Keep text but exit input mode
        KeyCode::Esc => {
            app.cancel_filter();
        }

        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_filter();
        }

        KeyCode::Backspace => {
            app.filter_pop();
            if app.filter_text.is_empty() {
                app.filter_active = false;
            }
        }

        KeyCode::Char(c) => {
            app.filter_push(c);
        }

        _ => {}
    }
}

/// Handle mouse events
///
/// `content_start_row` is the screen row of the first table row's header.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, content_start_row: u16) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        MouseEventKind::Down(MouseButton::Left) => {
            let clicked_row = mouse.row;

            // Tab bar sits on row 1, after the header
            if clicked_row == 1 {
                if let Some(view) = tab_at_column(mouse.column) {
                    app.set_view(view);
                }
                return;
            }

            if matches!(app.current_view, View::Water | View::Villages)
                && clicked_row > content_start_row
            {
                let item_row = (clicked_row - content_start_row - 1) as usize;
                app.set_cursor(item_row);
            }
        }

        // Right-click goes back
        MouseEventKind::Down(MouseButton::Right) => app.go_back(),

        _ => {}
    }
}

/// Map a click on the tab bar to a view, using the rendered title widths.
fn tab_at_column(column: u16) -> Option<View> {
    let mut start = 0u16;
    for view in View::ALL {
        // " n:Label " plus the divider
        let width = view.label().len() as u16 + 5;
        if column < start + width {
            return Some(view);
        }
        start += width;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CaseHistory, RiskPolicy, SiteId};
    use crate::source::BuiltinSource;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        let mut app = App::new(
            Box::new(BuiltinSource::new()),
            RiskPolicy::default(),
            CaseHistory::default(),
        );
        app.reload_data();
        app
    }

    #[test]
    fn test_number_keys_switch_views() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('4')));
        assert_eq!(app.current_view, View::Villages);
        handle_key_event(&mut app, key(KeyCode::Char('1')));
        assert_eq!(app.current_view, View::Dashboard);
    }

    #[test]
    fn test_enter_and_escape_drive_selection() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('3')));
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.selection.current(), Some(SiteId(11)));

        handle_key_event(&mut app, key(KeyCode::Esc));
        assert!(!app.selection.is_selected());
        assert_eq!(app.current_view, View::Water);
    }

    #[test]
    fn test_filter_typing() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('4')));
        handle_key_event(&mut app, key(KeyCode::Char('/')));
        for c in "tez".chars() {
            handle_key_event(&mut app, key(KeyCode::Char(c)));
        }
        handle_key_event(&mut app, key(KeyCode::Enter));

        assert!(!app.filter_active);
        assert_eq!(app.visible_villages().len(), 1);
    }

    #[test]
    fn test_dismiss_key_on_dashboard() {
        let mut app = app();
        let before = app.visible_alerts().len();
        handle_key_event(&mut app, key(KeyCode::Char('x')));
        assert_eq!(app.visible_alerts().len(), before - 1);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(app.running);
    }

    #[test]
    fn test_click_row_moves_open_detail() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('3')));
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.selection.current(), Some(SiteId(11)));

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 5,
            row: 6,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(&mut app, click, 3);
        assert_eq!(app.cursor, 2);
        assert_eq!(app.selection.current(), Some(SiteId(13)));
    }

    #[test]
    fn test_tab_columns() {
        assert_eq!(tab_at_column(0), Some(View::Dashboard));
        assert_eq!(tab_at_column(15), Some(View::Trends));
        assert_eq!(tab_at_column(200), None);
    }
}
