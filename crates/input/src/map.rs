//! Key mapping from terminal events to game actions.

use crate::types::{Difficulty, GameAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to a game action. Letter keys ignore case.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    let action = match key.code {
        KeyCode::Left => GameAction::MoveLeft,
        KeyCode::Right => GameAction::MoveRight,
        KeyCode::Down => GameAction::SoftDrop,
        KeyCode::Up => GameAction::RotateCw,
        KeyCode::Enter => GameAction::Start,
        KeyCode::Char(c) => return char_action(c.to_ascii_lowercase()),
        _ => return None,
    };
    Some(action)
}

fn char_action(c: char) -> Option<GameAction> {
    let action = match c {
        'z' => GameAction::RotateCcw,
        ' ' => GameAction::HardDrop,
        'p' => GameAction::Pause,
        'r' => GameAction::Restart,
        // Menu selection; ignored by the session once a game is running.
        '1' | 'e' => GameAction::StartWith(Difficulty::Easy),
        '2' | 'm' => GameAction::StartWith(Difficulty::Medium),
        '3' | 'h' => GameAction::StartWith(Difficulty::Hard),
        _ => return None,
    };
    Some(action)
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char(c) => c.eq_ignore_ascii_case(&'q'),
        _ => false,
    }
}
