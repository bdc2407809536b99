//! Cooperative frame loop
//!
//! battery gate -> input sample -> tick -> pace. Everything the loop touches
//! is owned here and passed down by reference, so the same loop drives the
//! headless binary and the tests (with a `ManualClock`).

use crate::display::Display;
use crate::highscores::HighScoreStore;
use crate::input::{InputSource, InputTracker};
use crate::sim::{GameState, SimError, TickInput, tick};
use crate::system::{BatteryFlag, SystemControl};
use crate::util::{Clock, FramePacer};

/// What happened to one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Ran,
    /// Battery critical: simulation skipped, loop idled one frame
    Skipped,
}

pub struct FrameLoop<C, I, D, H, S> {
    pub state: GameState,
    pub display: D,
    pub scores: H,
    pub system: S,
    /// Tracker plays a started game
    pub autopilot: bool,
    clock: C,
    input: I,
    tracker: InputTracker,
    pacer: FramePacer,
    battery: BatteryFlag,
    frames: u64,
    skipped: u64,
}

impl<C, I, D, H, S> FrameLoop<C, I, D, H, S>
where
    C: Clock,
    I: InputSource,
    D: Display,
    H: HighScoreStore,
    S: SystemControl,
{
    pub fn new(
        mut state: GameState,
        clock: C,
        input: I,
        display: D,
        scores: H,
        system: S,
        battery: BatteryFlag,
    ) -> Self {
        state.load_high_score(&scores);
        let pacer = FramePacer::new(state.config.frame_ms);
        Self {
            state,
            display,
            scores,
            system,
            autopilot: false,
            clock,
            input,
            tracker: InputTracker::new(),
            pacer,
            battery,
            frames: 0,
            skipped: 0,
        }
    }

    /// Run one frame and sleep off the rest of its budget
    pub fn run_frame(&mut self) -> Result<FrameStatus, SimError> {
        let start = self.clock.now_ms();

        if self.battery.is_critical() {
            self.skipped += 1;
            if self.skipped == 1 || self.skipped % 600 == 0 {
                log::warn!("Battery critical, simulation on hold ({} frames)", self.skipped);
            }
            self.pacer.pace(&mut self.clock, start);
            return Ok(FrameStatus::Skipped);
        }

        let (held, pressed) = self.tracker.update(self.input.sample());
        let input = TickInput {
            held,
            pressed,
            now_ms: start,
            autopilot: self.autopilot,
        };
        tick(
            &mut self.state,
            &input,
            &mut self.display,
            &mut self.scores,
            &mut self.system,
        )?;
        self.frames += 1;

        let slept = self.pacer.pace(&mut self.clock, start);
        if slept == 0 {
            log::trace!("Frame {} overran its budget", self.frames);
        }
        Ok(FrameStatus::Ran)
    }

    /// Run `count` frames, stopping at the first error
    pub fn run(&mut self, count: u64) -> Result<(), SimError> {
        for _ in 0..count {
            self.run_frame()?;
        }
        Ok(())
    }

    /// Frames simulated
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames skipped on battery
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::display::RecordingDisplay;
    use crate::highscores::MemoryStore;
    use crate::input::{Buttons, ScriptedInput};
    use crate::sim::{GamePhase, LEVELS};
    use crate::system::RecordingSystem;
    use crate::util::ManualClock;

    type TestLoop = FrameLoop<ManualClock, ScriptedInput, RecordingDisplay, MemoryStore, RecordingSystem>;

    fn frame_loop(samples: Vec<Buttons>, battery: BatteryFlag) -> TestLoop {
        FrameLoop::new(
            GameState::new(GameConfig::default(), &LEVELS, 5),
            ManualClock::new(0),
            ScriptedInput::new(samples),
            RecordingDisplay::new(),
            MemoryStore::with_score(80),
            RecordingSystem::default(),
            battery,
        )
    }

    #[test]
    fn test_loads_high_score() {
        let lp = frame_loop(Vec::new(), BatteryFlag::new());
        assert_eq!(lp.state.high_score, 80);
    }

    #[test]
    fn test_frames_are_paced() {
        let mut lp = frame_loop(Vec::new(), BatteryFlag::new());
        lp.run(10).unwrap();
        assert_eq!(lp.frames(), 10);
        assert_eq!(lp.clock().now_ms(), 160);
    }

    #[test]
    fn test_press_is_an_edge() {
        let a = Buttons {
            a: true,
            ..Default::default()
        };
        // A held for three samples starts the game once and does not launch
        let mut lp = frame_loop(vec![a, a, a], BatteryFlag::new());
        lp.run(3).unwrap();
        assert!(lp.state.game_started);
        assert_eq!(lp.state.phase, GamePhase::Aiming);
    }

    #[test]
    fn test_battery_gate_skips_simulation() {
        let battery = BatteryFlag::new();
        battery.set_critical(true);
        let mut lp = frame_loop(Vec::new(), battery.clone());
        lp.run(5).unwrap();
        assert_eq!(lp.frames(), 0);
        assert_eq!(lp.skipped(), 5);
        assert!(lp.display.calls.is_empty());
        assert_eq!(lp.clock().now_ms(), 80);

        battery.set_critical(false);
        assert_eq!(lp.run_frame().unwrap(), FrameStatus::Ran);
        assert_eq!(lp.frames(), 1);
    }

    #[test]
    fn test_attract_plays_itself() {
        let mut lp = frame_loop(Vec::new(), BatteryFlag::new());
        // Title (5 s) plus the auto-launch countdown
        lp.run(60 * 9).unwrap();
        assert!(!lp.state.game_started);
        assert_eq!(lp.state.phase, GamePhase::InFlight);
    }
}
