//! Keyboard mapping
//!
//! Each movement action is bound to two keys: Left/A and Right/D.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::Action;

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Gameplay action, applied immediately
    Game(Action),
    /// Start over after a game over
    NewGame,
    /// Leave the program
    Quit,
}

/// Map a key event to a command. Releases and unbound keys map to `None`.
pub fn map_key(key: &KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Command::Game(Action::MoveLeft))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Command::Game(Action::MoveRight))
        }
        KeyCode::Char('n') | KeyCode::Char('N') => Some(Command::NewGame),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        _ => None,
    }
}
