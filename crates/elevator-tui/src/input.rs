use crossterm::event::KeyEvent;

use crate::app::{App, Mode};
use crate::keymap::{Key, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    Pending(char), // First key of a sequence such as "gg"
    Elevate,       // Ride back up
    OpenLink,      // Open the project page in a browser
    ToggleHelp,
    ExitMode,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    if app.mode == Mode::Help {
        // Any key exits help
        return Action::ExitMode;
    }

    keymap.resolve(Key::from_event(key), app.pending_key)
}
