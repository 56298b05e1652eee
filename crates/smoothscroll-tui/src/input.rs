use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    /// Smooth-scroll the document to the selected heading
    Select,
    JumpToTop,
    JumpToBottom,
    OutlinePageDown,
    OutlinePageUp,
    LongerDuration,
    ShorterDuration,
    CycleEasing,
    ToggleDelay,
    /// Scroll an element that does not exist
    ScrollMissing,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => Action::MoveDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Enter, _) => Action::Select,

        (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => Action::JumpToTop,
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => Action::JumpToBottom,

        (KeyCode::Char('J'), _) | (KeyCode::PageDown, _) => Action::OutlinePageDown,
        (KeyCode::Char('K'), _) | (KeyCode::PageUp, _) => Action::OutlinePageUp,

        (KeyCode::Char('+'), _) | (KeyCode::Char('='), _) => Action::LongerDuration,
        (KeyCode::Char('-'), _) => Action::ShorterDuration,
        (KeyCode::Char('e'), KeyModifiers::NONE) => Action::CycleEasing,
        (KeyCode::Char('d'), KeyModifiers::NONE) => Action::ToggleDelay,
        (KeyCode::Char('x'), KeyModifiers::NONE) => Action::ScrollMissing,

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
    fn test_navigation_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Char('j'))), Action::MoveDown);
        assert_eq!(handle_key_event(key(KeyCode::Up)), Action::MoveUp);
        assert_eq!(handle_key_event(key(KeyCode::Enter)), Action::Select);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Action::JumpToBottom
        );
    }

    #[test]
    fn test_configuration_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Char('+'))), Action::LongerDuration);
        assert_eq!(handle_key_event(key(KeyCode::Char('-'))), Action::ShorterDuration);
        assert_eq!(handle_key_event(key(KeyCode::Char('e'))), Action::CycleEasing);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('z'))), Action::None);
    }
}
