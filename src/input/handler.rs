use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::Direction;

/// What a key press asks the game loop to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Move(Direction),
    Restart,
    Quit,
    None,
}

/// Maps terminal key events to game input
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Releases and auto-repeats arrive on some terminals; only presses count.
        if key.kind != KeyEventKind::Press {
            return KeyAction::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        if let Some(direction) = Self::direction_for(key.code) {
            return KeyAction::Move(direction);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            _ => KeyAction::None,
        }
    }

    /// Arrow keys and WASD, either case
    fn direction_for(code: KeyCode) -> Option<Direction> {
        match code {
            KeyCode::Up => Some(Direction::Up),
            KeyCode::Down => Some(Direction::Down),
            KeyCode::Left => Some(Direction::Left),
            KeyCode::Right => Some(Direction::Right),
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => Some(Direction::Up),
                's' => Some(Direction::Down),
                'a' => Some(Direction::Left),
                'd' => Some(Direction::Right),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
