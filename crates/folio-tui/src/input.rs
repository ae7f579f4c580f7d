use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    JumpToTop,
    JumpToBottom,
    /// Follow the nth navigation link, zero based
    Navigate(usize),
    ToggleTheme,
    TogglePin,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Esc, _) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => Action::ScrollDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => Action::ScrollUp,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) => Action::PageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => Action::PageUp,
        (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => Action::JumpToTop,
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => Action::JumpToBottom,

        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            Action::Navigate(c as usize - '1' as usize)
        }

        (KeyCode::Char('t'), KeyModifiers::NONE) => Action::ToggleTheme,
        (KeyCode::Char('p'), KeyModifiers::NONE) => Action::TogglePin,

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_digits_map_to_links() {
        assert_eq!(handle_key_event(key(KeyCode::Char('1'))), Action::Navigate(0));
        assert_eq!(handle_key_event(key(KeyCode::Char('4'))), Action::Navigate(3));
        assert_eq!(handle_key_event(key(KeyCode::Char('0'))), Action::None);
    }

    #[test]
    fn test_basic_bindings() {
        assert_eq!(handle_key_event(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Char('j'))), Action::ScrollDown);
        assert_eq!(handle_key_event(key(KeyCode::Up)), Action::ScrollUp);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            Action::PageDown
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('p'))), Action::TogglePin);
    }
}
