use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Logical key actions in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Up,
    Down,
    Another,
    Favorite,
    Save,
    Quit,
    Help,
    Cancel,
}

impl KeyAction {
    /// Human-readable help text for this key action.
    pub fn help_text(&self) -> &'static str {
        match self {
            KeyAction::Up => "Previous favorite",
            KeyAction::Down => "Next favorite",
            KeyAction::Another => "Another one!",
            KeyAction::Favorite => "Add to favorites",
            KeyAction::Save => "Save favorites now",
            KeyAction::Quit => "Save and quit",
            KeyAction::Help => "Toggle help",
            KeyAction::Cancel => "Dismiss message",
        }
    }

    /// Short key label for display in menus.
    pub fn key_label(&self) -> &'static str {
        match self {
            KeyAction::Up => "k/\u{2191}",
            KeyAction::Down => "j/\u{2193}",
            KeyAction::Another => "n",
            KeyAction::Favorite => "f",
            KeyAction::Save => "s",
            KeyAction::Quit => "q",
            KeyAction::Help => "?",
            KeyAction::Cancel => "Esc",
        }
    }
}

/// Map a key event to a logical action.
pub fn map_key(event: KeyEvent) -> Option<KeyAction> {
    match event.code {
        // Ctrl+C as quit
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(KeyAction::Quit)
        }

        // Favorites navigation
        KeyCode::Char('k') | KeyCode::Up => Some(KeyAction::Up),
        KeyCode::Char('j') | KeyCode::Down => Some(KeyAction::Down),

        // Actions
        KeyCode::Char('n') | KeyCode::Char(' ') => Some(KeyAction::Another),
        KeyCode::Char('f') => Some(KeyAction::Favorite),
        KeyCode::Char('s') => Some(KeyAction::Save),
        KeyCode::Char('q') => Some(KeyAction::Quit),
        KeyCode::Char('?') => Some(KeyAction::Help),
        KeyCode::Esc => Some(KeyAction::Cancel),

        _ => None,
    }
}
