//! Key bindings from the `[keymap]` config section.
//!
//! Bindings use a small Vim-like notation:
//!
//! * a single character: `j`, `G`, `?`
//! * a Ctrl chord: `<C-d>`
//! * a named key: `<CR>`, `<Esc>`, `<Space>`, `<Tab>`, `<Up>`, `<Down>`,
//!   `<Home>`, `<End>`, `<PageUp>`, `<PageDown>`
//! * a two-key sequence of plain characters: `gg`

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use elevator_core::config::KeymapConfig;
use tracing::warn;

use crate::input::Action;

/// A pressed key as far as bindings care: the code and whether Ctrl is held.
///
/// Shift is not tracked; it already shows in the character (`G`, `?`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    pub code: KeyCode,
    pub ctrl: bool,
}

impl Key {
    pub fn plain(code: KeyCode) -> Self {
        Self { code, ctrl: false }
    }

    pub fn ctrl(c: char) -> Self {
        Self { code: KeyCode::Char(c.to_ascii_lowercase()), ctrl: true }
    }

    pub fn from_event(event: KeyEvent) -> Self {
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char(c) = event.code {
                return Self::ctrl(c);
            }
            return Self { code: event.code, ctrl: true };
        }
        Self::plain(event.code)
    }
}

/// What a binding string parses to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Key(Key),
    Sequence(char, char),
}

/// Keys that always work, whatever the config says.
/// Only Ctrl+C overrides a configured binding.
const FIXED: &[(&str, Action)] = &[
    ("<Up>", Action::MoveUp),
    ("<Down>", Action::MoveDown),
    ("<PageUp>", Action::ScrollPageUp),
    ("<PageDown>", Action::ScrollPageDown),
    ("<Home>", Action::JumpToTop),
    ("<End>", Action::JumpToBottom),
    ("e", Action::Elevate),
    ("<Esc>", Action::ExitMode),
];

/// Resolved bindings for the elevator's actions
#[derive(Debug, Clone)]
pub struct Keymap {
    keys: HashMap<Key, Action>,
    sequences: HashMap<(char, char), Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    pub fn from_config(config: &KeymapConfig) -> Self {
        let mut keymap = Self {
            keys: HashMap::new(),
            sequences: HashMap::new(),
        };

        for (notation, action) in configured(config) {
            keymap.bind(notation, action);
        }

        keymap.keys.insert(Key::ctrl('c'), Action::Quit);
        for (notation, action) in FIXED {
            if let Some(Trigger::Key(key)) = parse(notation) {
                keymap.keys.entry(key).or_insert(*action);
            }
        }

        keymap
    }

    fn bind(&mut self, notation: &str, action: Action) {
        let Some(trigger) = parse(notation) else {
            warn!(binding = notation, ?action, "Invalid key binding, action left unbound");
            return;
        };

        let existing = match trigger {
            Trigger::Key(key) => self.keys.get(&key),
            Trigger::Sequence(first, second) => self.sequences.get(&(first, second)),
        };
        if let Some(existing) = existing {
            warn!(binding = notation, ?existing, ?action, "Key already bound, keeping the first");
            return;
        }

        match trigger {
            Trigger::Key(key) => self.keys.insert(key, action),
            Trigger::Sequence(first, second) => self.sequences.insert((first, second), action),
        };
    }

    /// Action for `key`, given the first key of a sequence if one is pending
    pub fn resolve(&self, key: Key, pending: Option<char>) -> Action {
        if let (KeyCode::Char(c), false) = (key.code, key.ctrl) {
            if let Some(action) = pending.and_then(|first| self.sequences.get(&(first, c))) {
                return *action;
            }
            if self.sequences.keys().any(|(first, _)| *first == c) {
                return Action::Pending(c);
            }
        }
        self.keys.get(&key).copied().unwrap_or(Action::None)
    }
}

fn configured(config: &KeymapConfig) -> [(&str, Action); 12] {
    [
        (config.quit.as_str(), Action::Quit),
        (config.move_down.as_str(), Action::MoveDown),
        (config.move_up.as_str(), Action::MoveUp),
        (config.scroll_half_down.as_str(), Action::ScrollHalfPageDown),
        (config.scroll_half_up.as_str(), Action::ScrollHalfPageUp),
        (config.scroll_page_down.as_str(), Action::ScrollPageDown),
        (config.scroll_page_up.as_str(), Action::ScrollPageUp),
        (config.jump_to_top.as_str(), Action::JumpToTop),
        (config.jump_to_bottom.as_str(), Action::JumpToBottom),
        (config.elevate.as_str(), Action::Elevate),
        (config.open_link.as_str(), Action::OpenLink),
        (config.help.as_str(), Action::ToggleHelp),
    ]
}

/// Parse one binding string
pub fn parse(notation: &str) -> Option<Trigger> {
    let notation = notation.trim();

    if let Some(inner) = notation.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        if let Some(c) = inner.strip_prefix("C-").and_then(single_char) {
            return Some(Trigger::Key(Key::ctrl(c)));
        }
        return named_key(inner).map(|code| Trigger::Key(Key::plain(code)));
    }

    let mut chars = notation.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(c), None, _) => Some(Trigger::Key(Key::plain(KeyCode::Char(c)))),
        (Some(a), Some(b), None) if a.is_alphanumeric() && b.is_alphanumeric() => {
            Some(Trigger::Sequence(a, b))
        }
        _ => None,
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn named_key(name: &str) -> Option<KeyCode> {
    let code = match name.to_ascii_lowercase().as_str() {
        "cr" | "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        "tab" => KeyCode::Tab,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> Key {
        Key::plain(KeyCode::Char(c))
    }

    #[test]
    fn test_parse_notation() {
        assert_eq!(parse("j"), Some(Trigger::Key(key('j'))));
        assert_eq!(parse("G"), Some(Trigger::Key(key('G'))));
        assert_eq!(parse("?"), Some(Trigger::Key(key('?'))));
        assert_eq!(parse("<C-d>"), Some(Trigger::Key(Key::ctrl('d'))));
        assert_eq!(parse("<C-D>"), Some(Trigger::Key(Key::ctrl('d'))));
        assert_eq!(parse("<CR>"), Some(Trigger::Key(Key::plain(KeyCode::Enter))));
        assert_eq!(parse("<space>"), Some(Trigger::Key(key(' '))));
        assert_eq!(parse(" gg "), Some(Trigger::Sequence('g', 'g')));
    }

    #[test]
    fn test_parse_rejects_unknown_notation() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("<C-nope>"), None);
        assert_eq!(parse("<F5>"), None);
        assert_eq!(parse("abc"), None);
        assert_eq!(parse("g?"), None);
    }

    #[test]
    fn test_default_keymap() {
        let keymap = Keymap::default();
        assert_eq!(keymap.resolve(key('q'), None), Action::Quit);
        assert_eq!(keymap.resolve(Key::plain(KeyCode::Enter), None), Action::Elevate);
        assert_eq!(keymap.resolve(key('e'), None), Action::Elevate);
        assert_eq!(keymap.resolve(Key::ctrl('d'), None), Action::ScrollHalfPageDown);
        assert_eq!(keymap.resolve(Key::ctrl('c'), None), Action::Quit);
        assert_eq!(keymap.resolve(Key::plain(KeyCode::End), None), Action::JumpToBottom);
        assert_eq!(keymap.resolve(key('x'), None), Action::None);
    }

    #[test]
    fn test_sequences() {
        let keymap = Keymap::default();
        assert_eq!(keymap.resolve(key('g'), None), Action::Pending('g'));
        assert_eq!(keymap.resolve(key('g'), Some('g')), Action::JumpToTop);
        // A pending key that goes nowhere falls back to the plain binding
        assert_eq!(keymap.resolve(key('j'), Some('g')), Action::MoveDown);
    }

    #[test]
    fn test_conflicting_binding_keeps_first() {
        let config = KeymapConfig {
            open_link: "q".to_string(),
            ..Default::default()
        };
        let keymap = Keymap::from_config(&config);
        assert_eq!(keymap.resolve(key('q'), None), Action::Quit);
        assert_eq!(keymap.resolve(key('o'), None), Action::None);
    }

    #[test]
    fn test_configured_key_beats_fixed_fallback() {
        let config = KeymapConfig {
            help: "e".to_string(),
            quit: "<C-c>".to_string(),
            ..Default::default()
        };
        let keymap = Keymap::from_config(&config);
        assert_eq!(keymap.resolve(key('e'), None), Action::ToggleHelp);
        assert_eq!(keymap.resolve(Key::ctrl('c'), None), Action::Quit);
    }

    #[test]
    fn test_key_from_event() {
        let shifted = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(Key::from_event(shifted), key('?'));

        let ctrl = KeyEvent::new(KeyCode::Char('D'), KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        assert_eq!(Key::from_event(ctrl), Key::ctrl('d'));
    }
}
