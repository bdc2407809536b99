//! Game state and level/life transitions
//!
//! One owned `GameState` holds everything the frame loop mutates: ball,
//! paddle, the live brick grid, score and the descending-floor timer. The
//! transitions here are drawing-free; `tick` decides what to repaint.

use thiserror::Error;

use super::ball::Ball;
use super::bricks::{BrickGrid, BrickHit};
use super::levels::LevelDescriptor;
use super::paddle::Paddle;
use super::pause::PauseMenu;
use crate::config::GameConfig;
use crate::display::Display;
use crate::highscores::HighScoreStore;
use crate::util::GameRng;

/// Current phase of the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Start screen after boot
    Title,
    /// Ball riding the paddle, waiting for launch
    Aiming,
    /// Ball in play
    InFlight,
    /// Pause menu overlay
    Paused,
    /// Leaderboard shown, new run pending
    GameOver,
}

/// Why a life was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LossCause {
    /// Ball reached the floor
    FloorMiss,
    /// Bricks crept down to the loss line
    Descend,
}

/// Notable things that happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    GameStarted,
    LevelLoaded { level: usize },
    Launched,
    PaddleHit,
    BrickHit { row: usize, col: usize, remaining: u8 },
    BrickDestroyed { row: usize, col: usize, points: u32 },
    LevelComplete { level: usize },
    BricksDescended { offset_y: i32 },
    LifeLost { cause: LossCause, lives_left: u8 },
    GameOver { score: u32, new_high_score: bool },
    HighScoreSaved { score: u32 },
    Paused,
    Resumed,
    GameReset,
    RestartRequested,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("display not responding while loading level {level}")]
    DisplayUnresponsive { level: usize },

    #[error("level table is empty")]
    NoLevels,
}

/// Result of a descending-floor check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descend {
    /// Interval not yet elapsed
    Idle,
    /// Grid moved down one step
    Moved,
    /// Grid reached the loss line and a life was lost
    Overrun,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub rng: GameRng,
    pub phase: GamePhase,
    /// A player is in control (false = attract mode)
    pub game_started: bool,
    /// Every brick of the current level is gone
    pub game_finished: bool,
    pub ball: Ball,
    pub paddle: Paddle,
    pub grid: BrickGrid,
    levels: &'static [LevelDescriptor],
    /// Levels advanced this run; the template is `level_index % levels.len()`
    pub level_index: usize,
    pub points: u32,
    pub lives: u8,
    pub high_score: u32,
    /// Current descending-floor interval
    pub interval_ms: u32,
    /// When the floor last moved (or the ball was launched)
    pub last_interval_ms: u64,
    pub redraw_header: bool,
    pub pause: PauseMenu,
    pub paused_at_ms: u64,
    pub title_until_ms: Option<u64>,
    pub game_over_until_ms: Option<u64>,
    pub auto_launch_at_ms: Option<u64>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Boot state: title screen, no level loaded yet
    pub fn new(config: GameConfig, levels: &'static [LevelDescriptor], seed: u64) -> Self {
        let ball = Ball::new(&config);
        let paddle = Paddle::new(&config, ball.speed);
        let mut state = Self {
            rng: GameRng::new(seed),
            phase: GamePhase::Title,
            game_started: false,
            game_finished: false,
            ball,
            paddle,
            grid: BrickGrid::empty(),
            levels,
            level_index: 0,
            points: 0,
            lives: config.starter_lives,
            high_score: 0,
            interval_ms: config.default_interval_ms,
            last_interval_ms: 0,
            redraw_header: true,
            pause: PauseMenu::default(),
            paused_at_ms: 0,
            title_until_ms: None,
            game_over_until_ms: None,
            auto_launch_at_ms: None,
            events: Vec::new(),
            config,
        };
        state.ball.rest_on(&state.paddle);
        state
    }

    pub fn is_attract(&self) -> bool {
        !self.game_started
    }

    /// Pick up the persisted best score; a broken store counts as zero
    pub fn load_high_score<H: HighScoreStore + ?Sized>(&mut self, scores: &H) {
        self.high_score = match scores.load() {
            Ok(score) => score,
            Err(e) => {
                log::warn!("Could not read high score: {}", e);
                0
            }
        };
    }

    /// Instantiate `levels[index % len]` and put ball and paddle back at
    /// the start. The descending-floor interval starts over.
    pub fn load_level<D: Display + ?Sized>(
        &mut self,
        index: usize,
        display: &mut D,
    ) -> Result<(), SimError> {
        if self.levels.is_empty() {
            return Err(SimError::NoLevels);
        }
        if !display.is_responsive() {
            log::error!("Display not responding, level {} not loaded", index);
            return Err(SimError::DisplayUnresponsive { level: index });
        }

        let template = &self.levels[index % self.levels.len()];
        self.level_index = index;
        self.grid = BrickGrid::from_descriptor(template, &self.config);
        self.interval_ms = self.config.default_interval_ms;
        self.game_finished = false;
        self.park_ball();
        self.redraw_header = true;
        self.phase = GamePhase::Aiming;
        self.events.push(GameEvent::LevelLoaded { level: index });
        log::info!(
            "Level {} loaded: {}x{}, {} bricks, speed {:.2}",
            index,
            template.rows,
            template.cols,
            self.grid.active_count(),
            self.ball.speed
        );
        Ok(())
    }

    /// Recenter the paddle and put the ball on it, ready to aim
    fn park_ball(&mut self) {
        self.paddle.reset(self.config.screen_width, self.ball.speed);
        self.ball.rest_on(&self.paddle);
        self.ball.launch_angle = 90f32
            .min(self.config.launch_angle_max)
            .max(self.config.launch_angle_min);
        self.ball.last_collided = None;
        self.ball.aim_end = None;
        self.auto_launch_at_ms = None;
    }

    /// Start over from level 0 at starter speed, keeping who is playing
    pub fn reset_run<D: Display + ?Sized>(&mut self, display: &mut D) -> Result<(), SimError> {
        self.points = 0;
        self.lives = self.config.starter_lives;
        self.ball.set_speed(self.config.starter_speed);
        self.game_over_until_ms = None;
        self.load_level(0, display)
    }

    /// Hand control to the player and begin a fresh run
    pub fn start_game<D: Display + ?Sized>(&mut self, display: &mut D) -> Result<(), SimError> {
        self.game_started = true;
        self.title_until_ms = None;
        self.events.push(GameEvent::GameStarted);
        log::info!("Game started");
        self.reset_run(display)
    }

    /// Advance to the next template (wrapping) one speed step faster
    pub fn next_level<D: Display + ?Sized>(&mut self, display: &mut D) -> Result<(), SimError> {
        let speed = (self.ball.speed + self.config.speed_increment).min(self.config.max_speed);
        self.ball.set_speed(speed);
        self.load_level(self.level_index + 1, display)
    }

    /// Reload the current template without changing speed
    pub fn restart_level<D: Display + ?Sized>(&mut self, display: &mut D) -> Result<(), SimError> {
        self.load_level(self.level_index, display)
    }

    /// Leave the paddle; starts the descending-floor clock
    pub fn launch(&mut self, now_ms: u64) {
        self.ball.launch();
        self.last_interval_ms = now_ms;
        self.auto_launch_at_ms = None;
        self.phase = GamePhase::InFlight;
        self.events.push(GameEvent::Launched);
        log::debug!("Launched at {:.0} deg", self.ball.launch_angle);
    }

    /// Random attract-mode angle that avoids a near-vertical shot
    pub fn random_launch_angle(&mut self) -> f32 {
        let min = self.config.launch_angle_min;
        let max = self.config.launch_angle_max;
        let near_vertical = |a: f32| a > 80.0 && a < 100.0;
        let mut angle = self.rng.float_range(min, max);
        // Bounded retries so a narrow configured range cannot spin forever
        for _ in 0..32 {
            if !near_vertical(angle) {
                break;
            }
            angle = self.rng.float_range(min, max);
        }
        angle
    }

    /// Score a brick hit. Returns true when the hit cleared the grid.
    pub fn register_hit(&mut self, hit: BrickHit) -> bool {
        self.events.push(GameEvent::BrickHit {
            row: hit.row,
            col: hit.col,
            remaining: hit.remaining,
        });
        if !hit.destroyed() {
            return false;
        }

        self.points = self.points.saturating_add(self.config.brick_points);
        self.redraw_header = true;
        self.events.push(GameEvent::BrickDestroyed {
            row: hit.row,
            col: hit.col,
            points: self.config.brick_points,
        });

        if self.grid.is_cleared() && !self.game_finished {
            self.game_finished = true;
            self.events.push(GameEvent::LevelComplete {
                level: self.level_index,
            });
            log::info!("Level {} complete, {} points", self.level_index, self.points);
        }
        self.game_finished
    }

    /// Take a life. With none left the run is over; otherwise a floor miss
    /// re-serves on the same grid and an overrun reloads the level.
    pub fn lose_life<D: Display + ?Sized>(
        &mut self,
        cause: LossCause,
        display: &mut D,
    ) -> Result<(), SimError> {
        if self.lives == 0 {
            self.game_over();
            return Ok(());
        }

        self.lives -= 1;
        self.redraw_header = true;
        self.events.push(GameEvent::LifeLost {
            cause,
            lives_left: self.lives,
        });
        log::info!("Life lost ({:?}), {} left", cause, self.lives);

        match cause {
            LossCause::FloorMiss => {
                self.park_ball();
                self.phase = GamePhase::Aiming;
                Ok(())
            }
            LossCause::Descend => self.restart_level(display),
        }
    }

    pub fn game_over(&mut self) {
        let new_high_score = self.game_started && self.points > self.high_score;
        self.phase = GamePhase::GameOver;
        self.game_over_until_ms = None;
        self.events.push(GameEvent::GameOver {
            score: self.points,
            new_high_score,
        });
        log::info!(
            "Game over: {} points (best {}){}",
            self.points,
            self.high_score,
            if self.game_started { "" } else { " [attract]" }
        );
    }

    /// Persist the score if it beats the best one. Returns true when the
    /// best score changed.
    pub fn record_high_score<H: HighScoreStore + ?Sized>(&mut self, scores: &mut H) -> bool {
        if self.points <= self.high_score {
            return false;
        }
        self.high_score = self.points;
        match scores.save(self.points) {
            Ok(()) => {
                self.events.push(GameEvent::HighScoreSaved { score: self.points });
                log::info!("New high score {} saved", self.points);
            }
            Err(e) => log::warn!("Could not save high score {}: {}", self.points, e),
        }
        true
    }

    /// Leave the game-over screen into a fresh run
    pub fn finish_game_over<D: Display + ?Sized>(&mut self, display: &mut D) -> Result<(), SimError> {
        self.reset_run(display)
    }

    /// Back to the boot state (title screen, attract mode, empty grid)
    pub fn reboot(&mut self) {
        self.phase = GamePhase::Title;
        self.game_started = false;
        self.game_finished = false;
        self.grid = BrickGrid::empty();
        self.level_index = 0;
        self.points = 0;
        self.lives = self.config.starter_lives;
        self.interval_ms = self.config.default_interval_ms;
        self.ball.set_speed(self.config.starter_speed);
        self.park_ball();
        self.title_until_ms = None;
        self.game_over_until_ms = None;
        self.redraw_header = true;
        self.pause = PauseMenu::default();
    }

    /// Enter the pause menu from the current phase
    pub fn pause(&mut self, now_ms: u64) {
        self.pause.open(self.phase);
        self.phase = GamePhase::Paused;
        self.paused_at_ms = now_ms;
        self.events.push(GameEvent::Paused);
    }

    /// Return to the phase the menu was opened from. Timers are shifted so
    /// the time spent paused does not count toward them.
    pub fn resume(&mut self, now_ms: u64) {
        let paused_for = now_ms.saturating_sub(self.paused_at_ms);
        self.last_interval_ms = self.last_interval_ms.saturating_add(paused_for);
        if let Some(at) = self.auto_launch_at_ms.as_mut() {
            *at = at.saturating_add(paused_for);
        }
        self.phase = self.pause.resume_to();
        self.redraw_header = true;
        self.events.push(GameEvent::Resumed);
    }

    /// Whether the floor is due to move at `now_ms`
    pub fn descend_due(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_interval_ms) >= u64::from(self.interval_ms)
    }

    /// Move the grid down once per interval, shrinking the interval each
    /// time. Reaching the loss line costs a life.
    pub fn check_descend<D: Display + ?Sized>(
        &mut self,
        now_ms: u64,
        display: &mut D,
    ) -> Result<Descend, SimError> {
        if !self.descend_due(now_ms) {
            return Ok(Descend::Idle);
        }

        self.last_interval_ms = now_ms;
        self.interval_ms = self
            .interval_ms
            .saturating_sub(self.config.delta_interval_ms)
            .max(self.config.min_interval_ms);
        self.grid.descend(self.config.brick_drop);
        self.events.push(GameEvent::BricksDescended {
            offset_y: self.grid.offset_y,
        });
        log::debug!(
            "Bricks descended to y={}, next in {} ms",
            self.grid.offset_y,
            self.interval_ms
        );

        let overrun = self
            .grid
            .lowest_active_bottom()
            .is_some_and(|bottom| bottom >= self.config.min_brick_height);
        if overrun {
            self.lose_life(LossCause::Descend, display)?;
            return Ok(Descend::Overrun);
        }
        Ok(Descend::Moved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{NullDisplay, RecordingDisplay};
    use crate::highscores::MemoryStore;
    use crate::sim::levels::LEVELS;
    use proptest::prelude::*;

    static ONE_BRICK: [LevelDescriptor; 2] = [
        LevelDescriptor {
            rows: 1,
            cols: 1,
            durability: &[1],
            brick_width: 20,
            brick_height: 8,
            spacing: 2,
        },
        LevelDescriptor {
            rows: 1,
            cols: 2,
            durability: &[2, 1],
            brick_width: 20,
            brick_height: 8,
            spacing: 2,
        },
    ];

    fn started() -> GameState {
        let mut state = GameState::new(GameConfig::default(), &ONE_BRICK, 7);
        state.start_game(&mut NullDisplay).unwrap();
        state
    }

    #[test]
    fn test_boot_state() {
        let state = GameState::new(GameConfig::default(), &LEVELS, 1);
        assert_eq!(state.phase, GamePhase::Title);
        assert!(state.is_attract());
        assert_eq!(state.lives, 3);
        assert_eq!(state.grid.active_count(), 0);
    }

    #[test]
    fn test_start_loads_level_zero() {
        let state = started();
        assert_eq!(state.phase, GamePhase::Aiming);
        assert_eq!(state.level_index, 0);
        assert_eq!(state.ball.speed, 3.5);
        assert!(state.ball.on_paddle);
        assert!(state.events.contains(&GameEvent::GameStarted));
    }

    #[test]
    fn test_unresponsive_display_aborts_load() {
        let mut state = GameState::new(GameConfig::default(), &LEVELS, 1);
        let mut display = RecordingDisplay::new();
        display.responsive = false;
        assert_eq!(
            state.start_game(&mut display),
            Err(SimError::DisplayUnresponsive { level: 0 })
        );
    }

    #[test]
    fn test_empty_level_table() {
        let mut state = GameState::new(GameConfig::default(), &[], 1);
        assert_eq!(state.reset_run(&mut NullDisplay), Err(SimError::NoLevels));
    }

    #[test]
    fn test_destroy_scores_and_completes_once() {
        let mut state = started();
        let hit = state.grid.hit(0, 0).unwrap();
        assert!(state.register_hit(hit));
        assert_eq!(state.points, 10);
        let completions = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelComplete { .. }))
            .count();
        assert_eq!(completions, 1);

        // A stray second registration must not complete the level again
        state.register_hit(hit);
        let completions = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelComplete { .. }))
            .count();
        assert_eq!(completions, 1);
    }

    #[test]
    fn test_next_level_speeds_up_and_wraps() {
        let mut state = started();
        state.next_level(&mut NullDisplay).unwrap();
        assert_eq!(state.level_index, 1);
        assert!((state.ball.speed - 3.65).abs() < 1e-5);
        assert_eq!(state.grid.active_count(), 2);
        state.next_level(&mut NullDisplay).unwrap();
        // Template index wraps
        assert_eq!(state.grid.active_count(), 1);
        for _ in 0..100 {
            state.next_level(&mut NullDisplay).unwrap();
        }
        assert_eq!(state.ball.speed, state.config.max_speed);
    }

    #[test]
    fn test_floor_miss_keeps_grid() {
        let mut state = started();
        state.launch(0);
        state.grid.hit(0, 0);
        state.lose_life(LossCause::FloorMiss, &mut NullDisplay).unwrap();
        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::Aiming);
        assert!(state.ball.on_paddle);
        assert!(state.grid.is_cleared());
    }

    #[test]
    fn test_last_ball_ends_game() {
        let mut state = started();
        state.lives = 0;
        state.points = 40;
        state.lose_life(LossCause::FloorMiss, &mut NullDisplay).unwrap();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver {
            score: 40,
            new_high_score: true
        }));
    }

    #[test]
    fn test_high_score_only_when_beaten() {
        let mut state = started();
        let mut store = MemoryStore::with_score(50);
        state.load_high_score(&store);
        state.points = 50;
        assert!(!state.record_high_score(&mut store));
        state.points = 60;
        assert!(state.record_high_score(&mut store));
        assert_eq!(store.load().unwrap(), 60);
        assert_eq!(state.high_score, 60);
    }

    #[test]
    fn test_game_over_resets_run() {
        let mut state = started();
        state.next_level(&mut NullDisplay).unwrap();
        state.points = 90;
        state.lives = 0;
        state.game_over();
        state.finish_game_over(&mut NullDisplay).unwrap();
        assert_eq!(state.points, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level_index, 0);
        assert_eq!(state.ball.speed, 3.5);
        assert!(state.game_started);
    }

    #[test]
    fn test_descend_interval_shrinks_and_floors() {
        let mut state = started();
        state.launch(0);
        let mut now = 0;
        let mut expected = 10_000u32;
        for _ in 0..20 {
            assert_eq!(state.check_descend(now + 1, &mut NullDisplay).unwrap(), Descend::Idle);
            now += u64::from(state.interval_ms);
            let outcome = state.check_descend(now, &mut NullDisplay).unwrap();
            if outcome == Descend::Overrun {
                break;
            }
            expected = (expected - 500).max(3_000);
            assert_eq!(state.interval_ms, expected);
        }
    }

    #[test]
    fn test_descend_overrun_reloads_level() {
        let mut state = started();
        state.launch(0);
        state.grid.offset_y = 265 - 8 - 5;
        let outcome = state.check_descend(10_000, &mut NullDisplay).unwrap();
        assert_eq!(outcome, Descend::Overrun);
        assert_eq!(state.lives, 2);
        assert_eq!(state.level_index, 0);
        assert_eq!(state.grid.offset_y, 30);
        assert_eq!(state.interval_ms, 10_000);
        assert_eq!(state.phase, GamePhase::Aiming);
    }

    #[test]
    fn test_interval_resets_on_advance() {
        let mut state = started();
        state.launch(0);
        state.check_descend(10_000, &mut NullDisplay).unwrap();
        assert_eq!(state.interval_ms, 9_500);
        state.next_level(&mut NullDisplay).unwrap();
        assert_eq!(state.interval_ms, 10_000);
    }

    #[test]
    fn test_pause_shifts_timers() {
        let mut state = started();
        state.launch(1_000);
        state.pause(5_000);
        assert_eq!(state.phase, GamePhase::Paused);
        state.resume(65_000);
        assert_eq!(state.phase, GamePhase::InFlight);
        assert!(!state.descend_due(70_000));
        assert!(state.descend_due(71_000));
    }

    #[test]
    fn test_reboot_returns_to_title() {
        let mut state = started();
        state.points = 30;
        state.reboot();
        assert_eq!(state.phase, GamePhase::Title);
        assert!(state.is_attract());
        assert_eq!(state.points, 0);
        assert_eq!(state.grid.active_count(), 0);
    }

    proptest! {
        #[test]
        fn prop_attract_angle_avoids_vertical(seed in any::<u64>()) {
            let mut state = GameState::new(GameConfig::default(), &LEVELS, seed);
            for _ in 0..20 {
                let angle = state.random_launch_angle();
                prop_assert!((30.0..=150.0).contains(&angle));
                prop_assert!(angle <= 80.0 || angle >= 100.0);
            }
        }
    }
}
