//! Keyboard input for the game screen.
//!
//! Keys are first mapped to a [`Command`], then dispatched to the session.
//! Splitting the two keeps the key table testable without a session.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::Rng;
use slither::core::{Difficulty, Direction, GameEvent, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    /// Space: pause while running, resume while paused.
    TogglePause,
    /// Enter: start from idle, restart after game over.
    Start,
    Reset,
    CycleTheme,
    ToggleGrid,
    ToggleSound,
    SetDifficulty(Difficulty),
    Quit,
}

/// Result of handling a game input event.
pub enum InputResult {
    /// Continue the game loop with whatever the session emitted.
    Continue(Vec<GameEvent>),
    /// Player asked to leave.
    Quit,
}

/// Translate a key press into a command. Releases and repeats from
/// terminals that report them are ignored.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::Quit),
            _ => None,
        };
    }

    let command = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Command::Steer(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Command::Steer(Direction::Down)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Command::Steer(Direction::Left)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Command::Steer(Direction::Right)
        }
        KeyCode::Char(' ') => Command::TogglePause,
        KeyCode::Enter => Command::Start,
        KeyCode::Char('r') | KeyCode::Char('R') => Command::Reset,
        KeyCode::Char('t') | KeyCode::Char('T') => Command::CycleTheme,
        KeyCode::Char('g') | KeyCode::Char('G') => Command::ToggleGrid,
        KeyCode::Char('m') | KeyCode::Char('M') => Command::ToggleSound,
        KeyCode::Char(c @ '1'..='4') => {
            Command::SetDifficulty(Difficulty::from_index(c as usize - '1' as usize))
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// Apply a command to the session.
pub fn dispatch<R: Rng>(command: Command, session: &mut Session<R>) -> InputResult {
    let events = match command {
        Command::Steer(direction) => {
            session.request_direction(direction);
            Vec::new()
        }
        Command::TogglePause => session.request_pause(),
        Command::Start => session.request_start(),
        Command::Reset => session.request_reset(),
        Command::CycleTheme => {
            let next = session.preferences().theme.next();
            session.set_theme(next)
        }
        Command::ToggleGrid => session.toggle_grid(),
        Command::ToggleSound => session.toggle_sound(),
        Command::SetDifficulty(difficulty) => session.set_difficulty(difficulty),
        Command::Quit => return InputResult::Quit,
    };
    InputResult::Continue(events)
}

/// Main dispatcher for game screen input.
pub fn handle_game_input<R: Rng>(key: KeyEvent, session: &mut Session<R>) -> InputResult {
    match map_key(key) {
        Some(command) => dispatch(command, session),
        None => InputResult::Continue(Vec::new()),
    }
}
