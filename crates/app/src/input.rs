//! Keyboard mapping for the turn loop. Movement on vi keys or arrows, `g`
//! to pick up, `.` or space to wait a turn, `q` or Escape to quit.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use game_core::PlayerAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Player(PlayerAction),
    Quit,
}

/// Returns `None` for keys that mean nothing and for release events, so a
/// turn is only consumed by a real command.
pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let action = match key.code {
        KeyCode::Char('h') | KeyCode::Left => PlayerAction::Move { dx: -1, dy: 0 },
        KeyCode::Char('l') | KeyCode::Right => PlayerAction::Move { dx: 1, dy: 0 },
        KeyCode::Char('k') | KeyCode::Up => PlayerAction::Move { dx: 0, dy: -1 },
        KeyCode::Char('j') | KeyCode::Down => PlayerAction::Move { dx: 0, dy: 1 },
        KeyCode::Char('g') => PlayerAction::PickUp,
        KeyCode::Char('.') | KeyCode::Char(' ') => PlayerAction::Wait,
        KeyCode::Char('q') | KeyCode::Esc => return Some(Command::Quit),
        _ => return None,
    };
    Some(Command::Player(action))
}
