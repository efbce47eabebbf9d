//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Usage
//!
//! In the main event loop, call [`to_app_event`] on every [`crossterm::event::Event`]
//! and match on the returned [`AppEvent`] instead of crossterm types.
//!
//! # Keybindings
//!
//! | Key(s)                  | Event                      |
//! |-------------------------|----------------------------|
//! | `q`, `Ctrl+c`           | `Quit`                     |
//! | `Tab`                   | `FocusNext`                |
//! | `/`                     | `QueryFocus`               |
//! | `PageUp`, `Ctrl+u`      | `ScrollUp`                 |
//! | `PageDown`, `Ctrl+d`    | `ScrollDown`               |
//! | `↑` / `k`               | `Nav(Up)`                  |
//! | `↓` / `j`               | `Nav(Down)`                |
//! | `←` / `h`               | `Nav(Left)`                |
//! | `→` / `l`               | `Nav(Right)`               |
//! | `n`, `Ctrl+n`           | `NewSearch`                |
//! | `e`, `Ctrl+e`           | `Export(Csv)`              |
//! | `x`, `Ctrl+x`           | `Export(Xlsx)`             |
//! | printable char          | `Char(c)`                  |
//! | bracketed paste         | `Paste(text)`              |
//! | `Backspace`             | `Backspace`                |
//! | `Enter`                 | `Enter`                    |
//! | terminal resize         | `Resize(w, h)`             |
//!
//! ## Insert mode
//!
//! When a text-input widget (query bar, command bar) is focused, the event
//! loop calls [`to_app_event_insert`] instead. In insert mode:
//! - hjkl, q, n, e, x produce `Char` events
//! - Arrow keys still produce `Nav` for cursor movement
//! - `Ctrl+c`, `Ctrl+n`, `Ctrl+e`, `Ctrl+x`, `Escape`, `Enter`, `Tab` and
//!   `Backspace` keep their special bindings

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use prodlook_core::export::ExportFormat;

/// Cardinal direction for cursor and results-table navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Exit the application.
    Quit,
    /// Move keyboard focus to the next pane (Tab-cycle).
    FocusNext,
    /// Transfer focus to the query bar.
    QueryFocus,
    /// Scroll the results table up one page.
    ScrollUp,
    /// Scroll the results table down one page.
    ScrollDown,
    /// Arrow / hjkl navigation.
    Nav(Direction),
    /// Clear the input, the results and the session.
    NewSearch,
    /// Write the current results to disk.
    Export(ExportFormat),
    /// A printable character forwarded to the active text input.
    Char(char),
    /// A block of pasted text (bracketed paste).
    Paste(String),
    /// Delete the character before the cursor in the active text input.
    Backspace,
    /// Run the search, or confirm the command bar.
    Enter,
    /// The terminal was resized to the given (width, height).
    Resize(u16, u16),
    /// Dismiss the active modal (query bar focus, help popup, command bar).
    Escape,
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] (normal / navigation mode).
///
/// Returns `None` for events that carry no meaning for the application
/// (mouse events, focus changes, unbound keys).
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Paste(text) => Some(AppEvent::Paste(text)),
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] for text-input ("insert") mode.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Paste(text) => Some(AppEvent::Paste(text)),
        Event::Key(key) => map_key_insert(key),
        _ => None,
    }
}

/// Control-key bindings shared by both modes.
fn map_ctrl(key: &KeyEvent) -> Option<AppEvent> {
    if key.modifiers != KeyModifiers::CONTROL {
        return None;
    }
    match key.code {
        KeyCode::Char('c') => Some(AppEvent::Quit),
        KeyCode::Char('n') => Some(AppEvent::NewSearch),
        KeyCode::Char('e') => Some(AppEvent::Export(ExportFormat::Csv)),
        KeyCode::Char('x') => Some(AppEvent::Export(ExportFormat::Xlsx)),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    if let Some(ev) = map_ctrl(&key) {
        return Some(ev);
    }

    match key.code {
        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),

        Char('/') if key.modifiers == Mod::NONE => Some(AppEvent::QueryFocus),

        PageUp => Some(AppEvent::ScrollUp),
        PageDown => Some(AppEvent::ScrollDown),
        Char('u') if key.modifiers == Mod::CONTROL => Some(AppEvent::ScrollUp),
        Char('d') if key.modifiers == Mod::CONTROL => Some(AppEvent::ScrollDown),

        Char('n') if key.modifiers == Mod::NONE => Some(AppEvent::NewSearch),
        Char('e') if key.modifiers == Mod::NONE => Some(AppEvent::Export(ExportFormat::Csv)),
        Char('x') if key.modifiers == Mod::NONE => Some(AppEvent::Export(ExportFormat::Xlsx)),

        Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Up)),
        Down | Char('j') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Down)),
        Left | Char('h') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Left)),
        Right | Char('l') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Right)),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

/// Key mapping for text-input / insert mode.
///
/// Every printable character is forwarded verbatim, including letters that
/// are shortcuts in normal mode.
fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    if let Some(ev) = map_ctrl(&key) {
        return Some(ev);
    }

    match key.code {
        Up => Some(AppEvent::Nav(Direction::Up)),
        Down => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn press(code: KeyCode) -> Event {
        key(code, KeyModifiers::NONE)
    }

    fn ctrl(code: KeyCode) -> Event {
        key(code, KeyModifiers::CONTROL)
    }

    #[test]
    fn quit_keys() {
        assert_eq!(to_app_event(press(KeyCode::Char('q'))), Some(AppEvent::Quit));
        assert_eq!(to_app_event(ctrl(KeyCode::Char('c'))), Some(AppEvent::Quit));
    }

    #[test]
    fn focus_keys() {
        assert_eq!(to_app_event(press(KeyCode::Tab)), Some(AppEvent::FocusNext));
        assert_eq!(to_app_event(press(KeyCode::Char('/'))), Some(AppEvent::QueryFocus));
    }

    #[test]
    fn action_shortcuts_in_normal_mode() {
        assert_eq!(to_app_event(press(KeyCode::Char('n'))), Some(AppEvent::NewSearch));
        assert_eq!(
            to_app_event(press(KeyCode::Char('e'))),
            Some(AppEvent::Export(ExportFormat::Csv))
        );
        assert_eq!(
            to_app_event(press(KeyCode::Char('x'))),
            Some(AppEvent::Export(ExportFormat::Xlsx))
        );
    }

    #[test]
    fn ctrl_actions_work_in_both_modes() {
        for map in [to_app_event, to_app_event_insert] {
            assert_eq!(map(ctrl(KeyCode::Char('n'))), Some(AppEvent::NewSearch));
            assert_eq!(
                map(ctrl(KeyCode::Char('e'))),
                Some(AppEvent::Export(ExportFormat::Csv))
            );
            assert_eq!(
                map(ctrl(KeyCode::Char('x'))),
                Some(AppEvent::Export(ExportFormat::Xlsx))
            );
            assert_eq!(map(ctrl(KeyCode::Char('c'))), Some(AppEvent::Quit));
        }
    }

    #[test]
    fn nav_arrows_and_hjkl() {
        assert_eq!(to_app_event(press(KeyCode::Up)), Some(AppEvent::Nav(Direction::Up)));
        assert_eq!(to_app_event(press(KeyCode::Char('j'))), Some(AppEvent::Nav(Direction::Down)));
        assert_eq!(to_app_event(press(KeyCode::Char('h'))), Some(AppEvent::Nav(Direction::Left)));
        assert_eq!(to_app_event(press(KeyCode::Right)), Some(AppEvent::Nav(Direction::Right)));
    }

    #[test]
    fn scroll_keys() {
        assert_eq!(to_app_event(press(KeyCode::PageUp)), Some(AppEvent::ScrollUp));
        assert_eq!(to_app_event(press(KeyCode::PageDown)), Some(AppEvent::ScrollDown));
        assert_eq!(to_app_event(ctrl(KeyCode::Char('u'))), Some(AppEvent::ScrollUp));
        assert_eq!(to_app_event(ctrl(KeyCode::Char('d'))), Some(AppEvent::ScrollDown));
    }

    #[test]
    fn paste_is_forwarded_in_both_modes() {
        let text = "100\n200\n".to_string();
        assert_eq!(
            to_app_event(Event::Paste(text.clone())),
            Some(AppEvent::Paste(text.clone()))
        );
        assert_eq!(to_app_event_insert(Event::Paste(text.clone())), Some(AppEvent::Paste(text)));
    }

    #[test]
    fn backspace_enter_escape() {
        assert_eq!(to_app_event(press(KeyCode::Backspace)), Some(AppEvent::Backspace));
        assert_eq!(to_app_event(press(KeyCode::Enter)), Some(AppEvent::Enter));
        assert_eq!(to_app_event(press(KeyCode::Esc)), Some(AppEvent::Escape));
    }

    #[test]
    fn unbound_key_returns_none() {
        assert_eq!(to_app_event(press(KeyCode::F(5))), None);
    }

    // ── Insert mode ────────────────────────────────────────────────────────

    #[test]
    fn insert_mode_shortcut_letters_are_chars() {
        for ch in ['h', 'j', 'k', 'l', 'q', 'n', 'e', 'x', '/', '?', ':'] {
            assert_eq!(
                to_app_event_insert(press(KeyCode::Char(ch))),
                Some(AppEvent::Char(ch)),
                "insert mode: '{ch}' should produce Char"
            );
        }
    }

    #[test]
    fn insert_mode_arrow_keys_are_nav() {
        assert_eq!(
            to_app_event_insert(press(KeyCode::Left)),
            Some(AppEvent::Nav(Direction::Left))
        );
        assert_eq!(
            to_app_event_insert(press(KeyCode::Right)),
            Some(AppEvent::Nav(Direction::Right))
        );
    }
}
