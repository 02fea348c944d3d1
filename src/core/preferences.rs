//! Player preferences and the persisted high score.

use super::constants::{
    DIFFICULTY_KEY, GRID_VISIBLE_KEY, HIGH_SCORE_KEY, SOUND_ENABLED_KEY, THEME_KEY,
};
use super::difficulty::Difficulty;
use crate::utils::persistence::Storage;
use serde::{Deserialize, Serialize};

/// Renderer palette selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,
    Dark,
    Neon,
    Retro,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Default, Theme::Dark, Theme::Neon, Theme::Retro];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Dark => "dark",
            Self::Neon => "neon",
            Self::Retro => "retro",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(name.trim()))
    }

    /// The theme after this one, wrapping around.
    pub fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub difficulty: Difficulty,
    pub theme: Theme,
    pub sound_enabled: bool,
    pub grid_visible: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            theme: Theme::Default,
            sound_enabled: true,
            grid_visible: true,
        }
    }
}

impl Preferences {
    /// Read preferences from the store. Anything missing or unparsable falls
    /// back to the default, and booleans only turn off on an explicit "false".
    pub fn load(store: &dyn Storage) -> Self {
        let defaults = Self::default();
        Self {
            difficulty: store
                .get(DIFFICULTY_KEY)
                .and_then(|v| Difficulty::from_name(&v))
                .unwrap_or(defaults.difficulty),
            theme: store
                .get(THEME_KEY)
                .and_then(|v| Theme::from_name(&v))
                .unwrap_or(defaults.theme),
            sound_enabled: parse_flag(store.get(SOUND_ENABLED_KEY)),
            grid_visible: parse_flag(store.get(GRID_VISIBLE_KEY)),
        }
    }
}

fn parse_flag(value: Option<String>) -> bool {
    value.map_or(true, |v| v.trim() != "false")
}

pub fn flag_value(enabled: bool) -> &'static str {
    if enabled {
        "true"
    } else {
        "false"
    }
}

/// Stored high score, 0 when absent or unparsable.
pub fn load_high_score(store: &dyn Storage) -> u32 {
    store
        .get(HIGH_SCORE_KEY)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::persistence::MemoryStorage;

    #[test]
    fn test_empty_store_gives_defaults() {
        let store = MemoryStorage::new();
        let prefs = Preferences::load(&store);
        assert_eq!(prefs, Preferences::default());
        assert!(prefs.sound_enabled, "missing flag defaults to enabled");
        assert!(prefs.grid_visible, "missing flag defaults to visible");
        assert_eq!(load_high_score(&store), 0);
    }

    #[test]
    fn test_stored_values_are_used() {
        let store = MemoryStorage::with_values([
            (SOUND_ENABLED_KEY, "false"),
            (GRID_VISIBLE_KEY, "false"),
            (THEME_KEY, "retro"),
            (DIFFICULTY_KEY, "hard"),
            (HIGH_SCORE_KEY, "870"),
        ]);
        let prefs = Preferences::load(&store);
        assert!(!prefs.sound_enabled);
        assert!(!prefs.grid_visible);
        assert_eq!(prefs.theme, Theme::Retro);
        assert_eq!(prefs.difficulty, Difficulty::Hard);
        assert_eq!(load_high_score(&store), 870);
    }

    #[test]
    fn test_only_false_disables_flags() {
        let store = MemoryStorage::with_values([
            (SOUND_ENABLED_KEY, "0"),
            (GRID_VISIBLE_KEY, "no"),
        ]);
        let prefs = Preferences::load(&store);
        assert!(prefs.sound_enabled);
        assert!(prefs.grid_visible);
    }

    #[test]
    fn test_garbage_falls_back() {
        let store = MemoryStorage::with_values([
            (THEME_KEY, "sparkly"),
            (DIFFICULTY_KEY, "nightmare"),
            (HIGH_SCORE_KEY, "-5"),
        ]);
        let prefs = Preferences::load(&store);
        assert_eq!(prefs.theme, Theme::Default);
        assert_eq!(prefs.difficulty, Difficulty::Normal);
        assert_eq!(load_high_score(&store), 0);
    }

    #[test]
    fn test_theme_cycle_wraps() {
        assert_eq!(Theme::Default.next(), Theme::Dark);
        assert_eq!(Theme::Retro.next(), Theme::Default);
        let mut theme = Theme::Neon;
        for _ in 0..Theme::ALL.len() {
            theme = theme.next();
        }
        assert_eq!(theme, Theme::Neon);
    }
}
