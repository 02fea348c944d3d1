//! The game state machine.
//!
//! A [`Session`] exclusively owns the snake, the food and the [`RunState`]
//! from start to game over. Frontends drive it through the request methods
//! and [`Session::tick`], and read it back through [`Session::snapshot`].
//! Requests that make no sense in the current phase are silently ignored.
//!
//! ```text
//! Idle ──start──▶ Running ◀──pause/resume──▶ Paused
//!                    │
//!                  tick (collision / board full)
//!                    ▼
//!                 GameOver ──start──▶ Running
//! Running / Paused / GameOver ──reset──▶ Idle
//! ```

use super::collision::{self, CollisionKind};
use super::constants::{
    DIFFICULTY_KEY, GRID_VISIBLE_KEY, HIGH_SCORE_KEY, POINTS_PER_FOOD, POINTS_PER_LEVEL,
    SOUND_ENABLED_KEY, THEME_KEY,
};
use super::difficulty::{target_speed, Difficulty};
use super::events::{GameEvent, GameOutcome, GameSummary};
use super::food::place_food;
use super::grid::{Cell, Direction, Grid};
use super::preferences::{flag_value, load_high_score, Preferences, Theme};
use super::scheduler::{TickHandle, TickSchedule};
use super::snake::Snake;
use crate::utils::persistence::Storage;
use log::{debug, info, warn};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    GameOver,
}

/// Per-run counters and steering. Score and level survive a reset so the
/// last run's numbers stay visible until the next start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    pub score: u32,
    /// Starts at 1.
    pub level: u32,
    pub current_speed_ms: u64,
    pub difficulty: Difficulty,
    /// Direction committed by the last tick.
    pub direction: Direction,
    /// Latest accepted request, applied at the start of the next tick.
    pub pending_direction: Option<Direction>,
    pub phase: Phase,
    /// Ticks processed this run. Renderers use it as an animation clock.
    pub tick_count: u64,
    pub outcome: Option<GameOutcome>,
}

impl RunState {
    fn new(difficulty: Difficulty) -> Self {
        Self {
            score: 0,
            level: 1,
            current_speed_ms: difficulty.profile().initial_speed_ms,
            difficulty,
            direction: Direction::Right,
            pending_direction: None,
            phase: Phase::Idle,
            tick_count: 0,
            outcome: None,
        }
    }
}

/// Read-only view of the board for renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub grid_size: i16,
    /// Head first. Empty while idle.
    pub snake: Vec<Cell>,
    pub food: Option<Cell>,
    pub direction: Direction,
    pub phase: Phase,
    pub paused: bool,
    pub score: u32,
    pub level: u32,
    pub high_score: u32,
    pub speed_ms: u64,
    pub difficulty: Difficulty,
    pub tick_count: u64,
    pub outcome: Option<GameOutcome>,
    pub preferences: Preferences,
}

pub struct Session<R: Rng> {
    grid: Grid,
    snake: Option<Snake>,
    food: Option<Cell>,
    run: RunState,
    high_score: u32,
    preferences: Preferences,
    schedule: TickSchedule,
    store: Box<dyn Storage>,
    rng: R,
}

impl<R: Rng> Session<R> {
    /// Create an idle session on the standard 20x20 grid.
    pub fn new(store: Box<dyn Storage>, rng: R) -> Self {
        Self::with_grid(Grid::default(), store, rng)
    }

    /// Create an idle session on `grid`, loading the high score and
    /// preferences from `store`.
    pub fn with_grid(grid: Grid, store: Box<dyn Storage>, rng: R) -> Self {
        let preferences = Preferences::load(store.as_ref());
        let high_score = load_high_score(store.as_ref());
        Self {
            grid,
            snake: None,
            food: None,
            run: RunState::new(preferences.difficulty),
            high_score,
            preferences,
            schedule: TickSchedule::default(),
            store,
            rng,
        }
    }

    // ── Accessors ───────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.run.phase
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> Option<&Snake> {
        self.snake.as_ref()
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn storage(&self) -> &dyn Storage {
        self.store.as_ref()
    }

    /// The installed tick source, `None` unless running.
    pub fn tick_handle(&self) -> Option<TickHandle> {
        self.schedule.active()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid_size: self.grid.size(),
            snake: self
                .snake
                .as_ref()
                .map(|s| s.segments().copied().collect())
                .unwrap_or_default(),
            food: self.food,
            direction: self.run.direction,
            phase: self.run.phase,
            paused: self.run.phase == Phase::Paused,
            score: self.run.score,
            level: self.run.level,
            high_score: self.high_score,
            speed_ms: self.run.current_speed_ms,
            difficulty: self.run.difficulty,
            tick_count: self.run.tick_count,
            outcome: self.run.outcome,
            preferences: self.preferences,
        }
    }

    // ── Lifecycle requests ──────────────────────────────────────

    /// Begin a run from Idle or GameOver. Ignored while a run is live.
    pub fn request_start(&mut self) -> Vec<GameEvent> {
        if matches!(self.run.phase, Phase::Running | Phase::Paused) {
            return Vec::new();
        }

        let difficulty = self.run.difficulty;
        self.run = RunState::new(difficulty);
        let snake = Snake::centered(&self.grid);
        self.food = place_food(&snake, &self.grid, &mut self.rng);
        self.snake = Some(snake);
        self.run.phase = Phase::Running;
        self.schedule.install(self.run.current_speed_ms);
        info!(
            "run started: difficulty={} speed={}ms",
            difficulty, self.run.current_speed_ms
        );

        let mut events = vec![
            GameEvent::Started {
                difficulty,
                speed_ms: self.run.current_speed_ms,
            },
            GameEvent::ScoreChanged { score: 0 },
            GameEvent::LevelChanged { level: 1 },
        ];
        if self.food.is_none() {
            events.push(GameEvent::BoardFull);
            self.finish(GameOutcome::BoardFull, &mut events);
        }
        events
    }

    /// Toggle between Running and Paused. Pausing removes the tick source
    /// entirely; resuming installs a fresh one at the current speed.
    pub fn request_pause(&mut self) -> Vec<GameEvent> {
        match self.run.phase {
            Phase::Running => {
                self.run.phase = Phase::Paused;
                self.schedule.cancel();
                debug!("paused at tick {}", self.run.tick_count);
                vec![GameEvent::Paused]
            }
            Phase::Paused => {
                self.run.phase = Phase::Running;
                let handle = self.schedule.install(self.run.current_speed_ms);
                debug!(
                    "resumed at {}ms (generation {})",
                    handle.interval_ms, handle.generation
                );
                vec![GameEvent::Resumed]
            }
            Phase::Idle | Phase::GameOver => Vec::new(),
        }
    }

    /// Stop ticking and clear the board. Score and level are kept for display.
    pub fn request_reset(&mut self) -> Vec<GameEvent> {
        if self.run.phase == Phase::Idle {
            return Vec::new();
        }
        self.schedule.cancel();
        self.snake = None;
        self.food = None;
        self.run.pending_direction = None;
        self.run.phase = Phase::Idle;
        info!("session reset");
        vec![GameEvent::Reset]
    }

    /// Queue a turn for the next tick. Reversals of the committed direction
    /// are dropped, not queued. Returns whether the request was accepted.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if !matches!(self.run.phase, Phase::Running | Phase::Paused) {
            return false;
        }
        if direction.is_opposite(self.run.direction) {
            return false;
        }
        self.run.pending_direction = Some(direction);
        true
    }

    // ── Settings ────────────────────────────────────────────────

    /// Select a difficulty. The speed resets to the new profile's initial
    /// interval without applying the current level's decrement; the curve
    /// catches up on the next food.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Vec<GameEvent> {
        if difficulty == self.run.difficulty {
            return Vec::new();
        }
        self.run.difficulty = difficulty;
        self.run.current_speed_ms = difficulty.profile().initial_speed_ms;
        self.preferences.difficulty = difficulty;
        info!(
            "difficulty set to {} ({}ms)",
            difficulty, self.run.current_speed_ms
        );

        let mut events = vec![GameEvent::DifficultyChanged { difficulty }];
        events.push(self.persist(DIFFICULTY_KEY, difficulty.name().to_string()));
        if self.run.phase == Phase::Running {
            self.schedule.install(self.run.current_speed_ms);
            events.push(GameEvent::SpeedChanged {
                speed_ms: self.run.current_speed_ms,
            });
        }
        events
    }

    pub fn set_theme(&mut self, theme: Theme) -> Vec<GameEvent> {
        if theme == self.preferences.theme {
            return Vec::new();
        }
        self.preferences.theme = theme;
        vec![self.persist(THEME_KEY, theme.name().to_string())]
    }

    pub fn toggle_sound(&mut self) -> Vec<GameEvent> {
        self.preferences.sound_enabled = !self.preferences.sound_enabled;
        let value = flag_value(self.preferences.sound_enabled).to_string();
        vec![self.persist(SOUND_ENABLED_KEY, value)]
    }

    pub fn toggle_grid(&mut self) -> Vec<GameEvent> {
        self.preferences.grid_visible = !self.preferences.grid_visible;
        let value = flag_value(self.preferences.grid_visible).to_string();
        vec![self.persist(GRID_VISIBLE_KEY, value)]
    }

    // ── Simulation ──────────────────────────────────────────────

    /// Advance one step. `handle` must be the currently installed tick
    /// source; ticks from a replaced or cancelled source are dropped.
    pub fn tick(&mut self, handle: TickHandle) -> Vec<GameEvent> {
        if !self.schedule.accepts(handle) {
            debug!(
                "dropping stale tick (generation {}, {}ms)",
                handle.generation, handle.interval_ms
            );
            return Vec::new();
        }
        if self.run.phase != Phase::Running {
            return Vec::new();
        }
        let Some(snake) = self.snake.as_mut() else {
            return Vec::new();
        };

        self.run.tick_count += 1;
        if let Some(direction) = self.run.pending_direction.take() {
            self.run.direction = direction;
        }

        let eating = self.food == Some(snake.next_head(self.run.direction));
        let head = snake.advance(self.run.direction, eating);
        let collision = collision::detect(snake, &self.grid);

        let mut events = Vec::new();
        if let Some(kind) = collision {
            self.collide(kind, &mut events);
        } else if eating {
            self.consume_food(head, &mut events);
        }
        events
    }

    fn collide(&mut self, kind: CollisionKind, events: &mut Vec<GameEvent>) {
        debug!("collision: {}", kind.describe());
        events.push(GameEvent::Collision { kind });
        self.finish(GameOutcome::Collision(kind), events);
    }

    fn consume_food(&mut self, at: Cell, events: &mut Vec<GameEvent>) {
        events.push(GameEvent::FoodEaten { at });

        self.run.score += POINTS_PER_FOOD * self.run.level;
        events.push(GameEvent::ScoreChanged {
            score: self.run.score,
        });

        let new_level = self.run.score / POINTS_PER_LEVEL + 1;
        if new_level > self.run.level {
            self.run.level = new_level;
            info!("level up: {}", new_level);
            events.push(GameEvent::LevelChanged { level: new_level });
            events.push(GameEvent::LevelUp { level: new_level });
        }

        if self.run.score > self.high_score {
            self.high_score = self.run.score;
            self.persist(HIGH_SCORE_KEY, self.high_score.to_string());
            events.push(GameEvent::HighScoreChanged {
                high_score: self.high_score,
            });
        }

        let food = self
            .snake
            .as_ref()
            .and_then(|snake| place_food(snake, &self.grid, &mut self.rng));
        self.food = food;
        if food.is_none() {
            events.push(GameEvent::BoardFull);
            self.finish(GameOutcome::BoardFull, events);
            return;
        }

        let target = target_speed(self.run.level, &self.run.difficulty.profile());
        if target < self.run.current_speed_ms {
            let previous = self.run.current_speed_ms;
            self.run.current_speed_ms = target;
            let handle = self.schedule.install(target);
            info!(
                "speed {}ms -> {}ms (generation {})",
                previous, target, handle.generation
            );
            events.push(GameEvent::SpeedChanged { speed_ms: target });
        }
    }

    fn finish(&mut self, outcome: GameOutcome, events: &mut Vec<GameEvent>) {
        self.schedule.cancel();
        self.run.phase = Phase::GameOver;
        self.run.outcome = Some(outcome);
        info!(
            "game over: {:?} score={} level={} high={}",
            outcome, self.run.score, self.run.level, self.high_score
        );
        events.push(GameEvent::GameOver(GameSummary {
            score: self.run.score,
            high_score: self.high_score,
            level: self.run.level,
            outcome,
        }));
    }

    /// Write a preference and report it. Storage failures are logged and
    /// never interrupt play.
    fn persist(&mut self, key: &'static str, value: String) -> GameEvent {
        if let Err(e) = self.store.set(key, &value) {
            warn!("failed to persist {}={}: {}", key, value, e);
        }
        GameEvent::PreferenceChanged { key, value }
    }

    // ── Board staging ───────────────────────────────────────────

    /// Replace the snake and committed direction of a live run, clearing any
    /// pending turn. Food now under the body is placed again, which may end
    /// the run as board full. Ignored outside Running/Paused.
    pub fn restage(&mut self, snake: Snake, direction: Direction) -> Vec<GameEvent> {
        if !matches!(self.run.phase, Phase::Running | Phase::Paused) {
            return Vec::new();
        }
        let buried = self.food.is_some_and(|food| snake.contains(food));
        self.snake = Some(snake);
        self.run.direction = direction;
        self.run.pending_direction = None;

        let mut events = Vec::new();
        if buried {
            self.food = self
                .snake
                .as_ref()
                .and_then(|snake| place_food(snake, &self.grid, &mut self.rng));
            if self.food.is_none() {
                events.push(GameEvent::BoardFull);
                self.finish(GameOutcome::BoardFull, &mut events);
            }
        }
        events
    }

    /// Move the food of a live run to `cell`. Refused if the cell is off the
    /// board or under the snake.
    pub fn place_food_at(&mut self, cell: Cell) -> bool {
        if !matches!(self.run.phase, Phase::Running | Phase::Paused) {
            return false;
        }
        let occupied = self.snake.as_ref().is_some_and(|s| s.contains(cell));
        if !self.grid.in_bounds(cell) || occupied {
            return false;
        }
        self.food = Some(cell);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::persistence::MemoryStorage;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn session() -> Session<ChaCha8Rng> {
        Session::new(
            Box::new(MemoryStorage::new()),
            ChaCha8Rng::seed_from_u64(42),
        )
    }

    fn started() -> Session<ChaCha8Rng> {
        let mut s = session();
        s.request_start();
        // Keep food out of the way unless a test places it
        s.place_food_at(Cell::new(0, 0));
        s
    }

    fn step(s: &mut Session<ChaCha8Rng>) -> Vec<GameEvent> {
        let handle = s.tick_handle().expect("session should be ticking");
        s.tick(handle)
    }

    #[test]
    fn test_new_session_is_idle() {
        let s = session();
        assert_eq!(s.phase(), Phase::Idle);
        assert!(s.snake().is_none());
        assert!(s.food().is_none());
        assert!(s.tick_handle().is_none());
        assert_eq!(s.run().level, 1);
        assert_eq!(s.run().current_speed_ms, 150);
    }

    #[test]
    fn test_start_initializes_run() {
        let mut s = session();
        let events = s.request_start();

        assert_eq!(s.phase(), Phase::Running);
        assert_eq!(s.snake().map(|sn| sn.len()), Some(3));
        let food = s.food().expect("food placed");
        assert!(!s.snake().unwrap().contains(food));
        assert_eq!(s.tick_handle().map(|h| h.interval_ms), Some(150));
        assert!(events.contains(&GameEvent::ScoreChanged { score: 0 }));
        assert!(events.contains(&GameEvent::LevelChanged { level: 1 }));
    }

    #[test]
    fn test_start_ignored_while_running() {
        let mut s = started();
        let handle = s.tick_handle();
        assert!(s.request_start().is_empty());
        assert_eq!(s.tick_handle(), handle);
    }

    #[test]
    fn test_tick_moves_right() {
        let mut s = started();
        step(&mut s);
        assert_eq!(s.snake().unwrap().head(), Cell::new(11, 10));
        assert_eq!(s.snake().unwrap().len(), 3);
        assert_eq!(s.run().tick_count, 1);
    }

    #[test]
    fn test_reversal_is_dropped() {
        let mut s = started();
        assert!(!s.request_direction(Direction::Left));
        step(&mut s);
        assert_eq!(s.run().direction, Direction::Right);
    }

    #[test]
    fn test_last_valid_request_wins() {
        let mut s = started();
        assert!(s.request_direction(Direction::Up));
        assert!(s.request_direction(Direction::Down));
        // Still moving right, so Left is a reversal and is dropped
        assert!(!s.request_direction(Direction::Left));
        step(&mut s);
        assert_eq!(s.run().direction, Direction::Down);
        assert_eq!(s.snake().unwrap().head(), Cell::new(10, 11));
    }

    #[test]
    fn test_one_turn_per_tick() {
        let mut s = started();
        s.request_direction(Direction::Up);
        step(&mut s);
        // Committed Up; Down is now a reversal even though it was legal before
        assert!(!s.request_direction(Direction::Down));
        assert!(s.request_direction(Direction::Left));
    }

    #[test]
    fn test_direction_ignored_when_idle() {
        let mut s = session();
        assert!(!s.request_direction(Direction::Up));
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut s = started();
        assert!(s.place_food_at(Cell::new(11, 10)));
        let events = step(&mut s);

        assert_eq!(s.snake().unwrap().len(), 4);
        assert_eq!(s.run().score, 10);
        assert_eq!(s.high_score(), 10);
        assert!(events.contains(&GameEvent::FoodEaten {
            at: Cell::new(11, 10)
        }));
        assert!(events.contains(&GameEvent::HighScoreChanged { high_score: 10 }));
        let food = s.food().unwrap();
        assert!(!s.snake().unwrap().contains(food));
    }

    #[test]
    fn test_high_score_persisted() {
        let mut s = started();
        s.place_food_at(Cell::new(11, 10));
        step(&mut s);
        assert_eq!(s.storage().get(HIGH_SCORE_KEY).as_deref(), Some("10"));
    }

    #[test]
    fn test_high_score_not_lowered() {
        let store = MemoryStorage::with_values([(HIGH_SCORE_KEY, "500")]);
        let mut s = Session::new(Box::new(store), ChaCha8Rng::seed_from_u64(1));
        s.request_start();
        s.place_food_at(Cell::new(11, 10));
        let events = step(&mut s);
        assert_eq!(s.high_score(), 500);
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::HighScoreChanged { .. })));
    }

    #[test]
    fn test_wall_collision_ends_run() {
        let mut s = started();
        s.request_direction(Direction::Up);
        let mut last = Vec::new();
        for _ in 0..11 {
            last = step(&mut s);
            if s.phase() == Phase::GameOver {
                break;
            }
        }
        assert_eq!(s.phase(), Phase::GameOver);
        assert!(last.contains(&GameEvent::Collision {
            kind: CollisionKind::Wall
        }));
        assert!(s.tick_handle().is_none());
        assert_eq!(
            s.run().outcome,
            Some(GameOutcome::Collision(CollisionKind::Wall))
        );
    }

    #[test]
    fn test_self_collision() {
        let mut s = started();
        let body = [(5, 5), (5, 4), (6, 4), (6, 5), (6, 6)]
            .into_iter()
            .map(|(x, y)| Cell::new(x, y));
        s.restage(Snake::from_segments(body).unwrap(), Direction::Down);
        s.request_direction(Direction::Right);
        let events = step(&mut s);
        assert!(events.contains(&GameEvent::Collision {
            kind: CollisionKind::SelfBite
        }));
        assert_eq!(s.phase(), Phase::GameOver);
    }

    #[test]
    fn test_tail_chasing_allowed() {
        let mut s = started();
        let body = [(5, 5), (6, 5), (6, 6), (5, 6)]
            .into_iter()
            .map(|(x, y)| Cell::new(x, y));
        s.restage(Snake::from_segments(body).unwrap(), Direction::Down);
        step(&mut s);
        assert_eq!(s.phase(), Phase::Running);
        assert_eq!(s.snake().unwrap().head(), Cell::new(5, 6));
    }

    #[test]
    fn test_pause_stops_ticks() {
        let mut s = started();
        let handle = s.tick_handle().unwrap();
        assert_eq!(s.request_pause(), vec![GameEvent::Paused]);
        assert_eq!(s.phase(), Phase::Paused);
        assert!(s.tick_handle().is_none());

        let head = s.snake().unwrap().head();
        assert!(s.tick(handle).is_empty());
        assert_eq!(s.snake().unwrap().head(), head);
    }

    #[test]
    fn test_resume_installs_new_generation() {
        let mut s = started();
        let before = s.tick_handle().unwrap();
        s.request_pause();
        assert_eq!(s.request_pause(), vec![GameEvent::Resumed]);
        let after = s.tick_handle().unwrap();
        assert_eq!(after.interval_ms, before.interval_ms);
        assert_ne!(after.generation, before.generation);
        assert!(s.tick(before).is_empty(), "pre-pause tick must be stale");
    }

    /// Drive a fresh run into the right wall.
    fn crashed() -> Session<ChaCha8Rng> {
        let mut s = started();
        s.restage(
            Snake::from_segments([Cell::new(19, 3), Cell::new(18, 3)]).unwrap(),
            Direction::Right,
        );
        step(&mut s);
        assert_eq!(s.phase(), Phase::GameOver);
        s
    }

    #[test]
    fn test_pause_ignored_when_idle_or_over() {
        let mut s = session();
        assert!(s.request_pause().is_empty());
        assert_eq!(s.phase(), Phase::Idle);

        let mut s = crashed();
        assert!(s.request_pause().is_empty());
        assert_eq!(s.phase(), Phase::GameOver);
        assert!(s.tick_handle().is_none());
    }

    #[test]
    fn test_game_over_ignores_ticks() {
        let mut s = started();
        let handle = s.tick_handle().unwrap();
        s.restage(
            Snake::from_segments([Cell::new(19, 3), Cell::new(18, 3)]).unwrap(),
            Direction::Right,
        );
        s.tick(handle);
        assert_eq!(s.phase(), Phase::GameOver);

        let head = s.snake().unwrap().head();
        let ticks = s.run().tick_count;
        assert!(s.tick(handle).is_empty());
        assert_eq!(s.snake().unwrap().head(), head);
        assert_eq!(s.run().tick_count, ticks);
        assert_eq!(s.phase(), Phase::GameOver);
    }

    #[test]
    fn test_reset_from_paused() {
        let mut s = started();
        s.request_pause();
        assert_eq!(s.request_reset(), vec![GameEvent::Reset]);
        assert_eq!(s.phase(), Phase::Idle);
        assert!(s.snake().is_none());
        assert!(s.tick_handle().is_none());
        assert!(s.request_pause().is_empty(), "no resume after reset");
    }

    #[test]
    fn test_reset_from_game_over() {
        let mut s = crashed();
        let outcome = s.run().outcome;
        assert_eq!(s.request_reset(), vec![GameEvent::Reset]);
        assert_eq!(s.phase(), Phase::Idle);
        assert!(s.snake().is_none());
        assert!(s.food().is_none());
        assert_eq!(s.run().outcome, outcome);

        s.request_start();
        assert_eq!(s.phase(), Phase::Running);
        assert_eq!(s.run().outcome, None);
    }

    #[test]
    fn test_restage_moves_buried_food() {
        let mut s = started();
        assert_eq!(s.food(), Some(Cell::new(0, 0)));
        let body = Snake::from_segments([Cell::new(1, 0), Cell::new(0, 0)]).unwrap();
        assert!(s.restage(body, Direction::Right).is_empty());
        let food = s.food().expect("food placed again");
        assert!(!s.snake().unwrap().contains(food));
    }

    #[test]
    fn test_restage_keeps_clear_food() {
        let mut s = started();
        let body = Snake::from_segments([Cell::new(5, 5), Cell::new(4, 5)]).unwrap();
        s.restage(body, Direction::Right);
        assert_eq!(s.food(), Some(Cell::new(0, 0)));
    }

    #[test]
    fn test_restage_ignored_when_idle() {
        let mut s = session();
        let body = Snake::from_segments([Cell::new(5, 5)]).unwrap();
        assert!(s.restage(body, Direction::Up).is_empty());
        assert!(s.snake().is_none());
    }

    #[test]
    fn test_reset_keeps_counters() {
        let mut s = started();
        s.place_food_at(Cell::new(11, 10));
        step(&mut s);
        assert_eq!(s.request_reset(), vec![GameEvent::Reset]);
        assert_eq!(s.phase(), Phase::Idle);
        assert!(s.snake().is_none());
        assert!(s.food().is_none());
        assert!(s.tick_handle().is_none());
        assert_eq!(s.run().score, 10);
    }

    #[test]
    fn test_reset_when_idle_is_noop() {
        let mut s = session();
        assert!(s.request_reset().is_empty());
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut s = started();
        s.place_food_at(Cell::new(11, 10));
        step(&mut s);
        s.restage(
            Snake::from_segments([Cell::new(19, 3), Cell::new(18, 3)]).unwrap(),
            Direction::Right,
        );
        step(&mut s);
        assert_eq!(s.phase(), Phase::GameOver);

        s.request_start();
        assert_eq!(s.phase(), Phase::Running);
        assert_eq!(s.run().score, 0);
        assert_eq!(s.run().level, 1);
        assert_eq!(s.run().outcome, None);
        assert_eq!(s.high_score(), 10);
    }

    #[test]
    fn test_difficulty_change_while_running() {
        let mut s = started();
        let before = s.tick_handle().unwrap();
        let events = s.set_difficulty(Difficulty::Hard);

        assert_eq!(s.run().current_speed_ms, 100);
        let after = s.tick_handle().unwrap();
        assert_eq!(after.interval_ms, 100);
        assert_ne!(after.generation, before.generation);
        assert!(events.contains(&GameEvent::SpeedChanged { speed_ms: 100 }));
        assert_eq!(s.storage().get(DIFFICULTY_KEY).as_deref(), Some("hard"));
    }

    #[test]
    fn test_difficulty_change_while_paused_applies_on_resume() {
        let mut s = started();
        s.request_pause();
        s.set_difficulty(Difficulty::Easy);
        assert!(s.tick_handle().is_none());
        s.request_pause();
        assert_eq!(s.tick_handle().map(|h| h.interval_ms), Some(200));
    }

    #[test]
    fn test_difficulty_change_idle_used_at_start() {
        let mut s = session();
        s.set_difficulty(Difficulty::Expert);
        assert!(s.tick_handle().is_none());
        s.request_start();
        assert_eq!(s.tick_handle().map(|h| h.interval_ms), Some(70));
    }

    #[test]
    fn test_same_difficulty_is_noop() {
        let mut s = session();
        assert!(s.set_difficulty(Difficulty::Normal).is_empty());
    }

    #[test]
    fn test_preference_toggles_persist() {
        let mut s = session();
        assert!(s.preferences().sound_enabled);

        let events = s.toggle_sound();
        assert!(!s.preferences().sound_enabled);
        assert_eq!(
            events,
            vec![GameEvent::PreferenceChanged {
                key: SOUND_ENABLED_KEY,
                value: "false".to_string()
            }]
        );

        s.toggle_grid();
        s.set_theme(Theme::Neon);
        assert_eq!(s.storage().get(GRID_VISIBLE_KEY).as_deref(), Some("false"));
        assert_eq!(s.storage().get(THEME_KEY).as_deref(), Some("neon"));
    }

    #[test]
    fn test_place_food_rules() {
        let mut s = session();
        assert!(!s.place_food_at(Cell::new(1, 1)), "idle has no food");
        s.request_start();
        assert!(!s.place_food_at(Cell::new(10, 10)), "under the head");
        assert!(!s.place_food_at(Cell::new(20, 0)), "off the board");
        assert!(s.place_food_at(Cell::new(2, 2)));
        assert_eq!(s.food(), Some(Cell::new(2, 2)));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut s = started();
        s.request_pause();
        let snap = s.snapshot();
        assert_eq!(snap.grid_size, 20);
        assert_eq!(snap.snake.len(), 3);
        assert_eq!(snap.snake[0], Cell::new(10, 10));
        assert_eq!(snap.food, Some(Cell::new(0, 0)));
        assert!(snap.paused);
        assert_eq!(snap.phase, Phase::Paused);
        assert_eq!(snap.direction, Direction::Right);
    }
}
