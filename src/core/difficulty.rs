//! Difficulty profiles and the level-to-speed curve.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Speed parameters for one difficulty. All values are tick intervals in
/// milliseconds, so lower means faster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyProfile {
    pub initial_speed_ms: u64,
    pub speed_increment_ms: u64,
    /// Fastest allowed interval (the floor of the curve).
    pub max_speed_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    /// Case-insensitive lookup by the stable name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Stable lowercase name, used for persistence and the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
            Self::Expert => "expert",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Normal => "Normal",
            Self::Hard => "Hard",
            Self::Expert => "Expert",
        }
    }

    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Self::Easy => DifficultyProfile {
                initial_speed_ms: 200,
                speed_increment_ms: 3,
                max_speed_ms: 80,
            },
            Self::Normal => DifficultyProfile {
                initial_speed_ms: 150,
                speed_increment_ms: 5,
                max_speed_ms: 50,
            },
            Self::Hard => DifficultyProfile {
                initial_speed_ms: 100,
                speed_increment_ms: 7,
                max_speed_ms: 30,
            },
            Self::Expert => DifficultyProfile {
                initial_speed_ms: 70,
                speed_increment_ms: 10,
                max_speed_ms: 20,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            format!("unknown difficulty '{s}' (expected easy, normal, hard or expert)")
        })
    }
}

/// Tick interval for `level` under `profile`:
/// `max(max_speed, initial - (level - 1) * increment)`.
///
/// Non-increasing in level and never below `profile.max_speed_ms`. Level 0 is
/// treated as level 1.
pub fn target_speed(level: u32, profile: &DifficultyProfile) -> u64 {
    let steps = u64::from(level.saturating_sub(1));
    let decrement = steps.saturating_mul(profile.speed_increment_ms);
    profile
        .initial_speed_ms
        .saturating_sub(decrement)
        .max(profile.max_speed_ms)
}
