// Keyboard event handling
//
// This module contains the keyboard event handler that processes
// user input and updates the application state accordingly.

use super::AppState;
use crossterm::event::KeyCode;

/// Handle keyboard events and update application state
///
/// Returns `true` if the application should continue running,
/// `false` if it should exit.
///
/// # Key Bindings
/// - `q`, `Q`, `Esc` - Unmount the background and quit
/// - `t`, `T` - Toggle light/dark theme (re-seeds the field)
/// - `r`, `R` - Re-seed the field
/// - `+`, `=` - Increase frame rate
/// - `-`, `_` - Decrease frame rate
pub fn handle_key_event(app: &mut AppState, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            app.unmount();
            false
        }
        KeyCode::Char('t') | KeyCode::Char('T') => {
            app.toggle_theme();
            true
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.reseed();
            true
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.increase_frame_rate();
            true
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            app.decrease_frame_rate();
            true
        }
        _ => true,
    }
}
