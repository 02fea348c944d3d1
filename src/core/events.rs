//! Events emitted by the session for the frontend adapters.
//!
//! The session never touches rendering, audio or UI types. Callers receive a
//! list of events from every operation and map them onto their own concerns.

use super::collision::CollisionKind;
use super::difficulty::Difficulty;
use super::grid::Cell;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Collision(CollisionKind),
    /// The snake filled every cell, leaving nowhere to place food. A win.
    BoardFull,
}

impl GameOutcome {
    pub fn is_win(&self) -> bool {
        matches!(self, Self::BoardFull)
    }
}

/// Final numbers shown on the game over screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub outcome: GameOutcome,
}

/// Sound kinds for the audio adapter. No parameters beyond the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Eat,
    Collision,
    LevelUp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    // ── Lifecycle ───────────────────────────────────────────────
    Started { difficulty: Difficulty, speed_ms: u64 },
    Paused,
    Resumed,
    Reset,
    GameOver(GameSummary),

    // ── Play ────────────────────────────────────────────────────
    FoodEaten { at: Cell },
    Collision { kind: CollisionKind },
    LevelUp { level: u32 },
    BoardFull,
    /// The tick interval changed and the scheduler was re-installed.
    SpeedChanged { speed_ms: u64 },

    // ── Counters ────────────────────────────────────────────────
    ScoreChanged { score: u32 },
    LevelChanged { level: u32 },
    HighScoreChanged { high_score: u32 },

    // ── Settings ────────────────────────────────────────────────
    DifficultyChanged { difficulty: Difficulty },
    /// A persisted preference was written under `key`.
    PreferenceChanged { key: &'static str, value: String },
}

impl GameEvent {
    pub fn audio_cue(&self) -> Option<AudioCue> {
        match self {
            Self::FoodEaten { .. } => Some(AudioCue::Eat),
            Self::Collision { .. } => Some(AudioCue::Collision),
            Self::LevelUp { .. } => Some(AudioCue::LevelUp),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_cues() {
        assert_eq!(
            GameEvent::FoodEaten { at: Cell::new(1, 1) }.audio_cue(),
            Some(AudioCue::Eat)
        );
        assert_eq!(
            GameEvent::Collision {
                kind: CollisionKind::Wall
            }
            .audio_cue(),
            Some(AudioCue::Collision)
        );
        assert_eq!(
            GameEvent::LevelUp { level: 2 }.audio_cue(),
            Some(AudioCue::LevelUp)
        );
        assert_eq!(GameEvent::ScoreChanged { score: 10 }.audio_cue(), None);
        assert_eq!(GameEvent::BoardFull.audio_cue(), None);
    }

    #[test]
    fn test_board_full_is_a_win() {
        assert!(GameOutcome::BoardFull.is_win());
        assert!(!GameOutcome::Collision(CollisionKind::SelfBite).is_win());
    }
}
