//! Snake simulation: board, snake, food, collisions, speed curve and the
//! session state machine that ties them together.

pub mod collision;
pub mod constants;
pub mod difficulty;
pub mod events;
pub mod food;
pub mod grid;
pub mod preferences;
pub mod scheduler;
pub mod session;
pub mod snake;

pub use collision::{detect, CollisionKind};
pub use constants::*;
pub use difficulty::{target_speed, Difficulty, DifficultyProfile};
pub use events::{AudioCue, GameEvent, GameOutcome, GameSummary};
pub use food::place_food;
pub use grid::{Cell, Direction, Grid};
pub use preferences::{Preferences, Theme};
pub use scheduler::{TickHandle, TickSchedule, Ticker};
pub use session::{Phase, RunState, Session, Snapshot};
pub use snake::Snake;
