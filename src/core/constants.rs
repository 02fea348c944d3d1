// Board
pub const GRID_SIZE: i16 = 20;
pub const INITIAL_SNAKE_LEN: usize = 3;

// Scoring and leveling
pub const POINTS_PER_FOOD: u32 = 10; // multiplied by the current level
pub const POINTS_PER_LEVEL: u32 = 100;

// Persisted keys
pub const HIGH_SCORE_KEY: &str = "snakeHighScore";
pub const SOUND_ENABLED_KEY: &str = "snakeSoundEnabled";
pub const GRID_VISIBLE_KEY: &str = "snakeGridVisible";
pub const THEME_KEY: &str = "snakeTheme";
pub const DIFFICULTY_KEY: &str = "snakeDifficulty";

// Frontend
pub const STORE_FILE_NAME: &str = "store.json";
pub const LOG_FILE_NAME: &str = "slither.log";
pub const INPUT_POLL_MS: u64 = 16; // redraw cadence while no tick is due
