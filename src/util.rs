//! Random numbers and frame timing
//!
//! The simulation only ever sees a seeded PCG stream and a millisecond
//! clock, so a run is reproducible from its seed and input log.

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Seeded uniform generator used by the simulation
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: Pcg32,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Uniform integer in `[min, max]`. Swapped bounds are tolerated.
    pub fn int_inclusive(&mut self, min: i32, max: i32) -> i32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.rng.random_range(lo..=hi)
    }

    /// Uniform float in `[min, max)`; returns `min` for an empty range
    pub fn float_range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..max)
    }
}

/// Monotonic millisecond clock
pub trait Clock {
    fn now_ms(&self) -> u64;
    fn sleep_ms(&mut self, ms: u64);
}

/// Wall clock backed by `Instant`
#[derive(Debug, Clone)]
pub struct StdClock {
    start: Instant,
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl StdClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for StdClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn sleep_ms(&mut self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

/// Clock that only moves when told to (sleeping advances it)
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: u64,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self { now: start_ms }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn sleep_ms(&mut self, ms: u64) {
        self.now += ms;
    }
}

/// Fixed-cadence frame pacing: sleep off whatever is left of the budget.
/// Overruns are not compensated; the next frame just starts late.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    budget_ms: u64,
}

impl FramePacer {
    pub fn new(budget_ms: u64) -> Self {
        Self { budget_ms }
    }

    pub fn budget_ms(&self) -> u64 {
        self.budget_ms
    }

    /// Milliseconds left in the frame that started at `frame_start`
    pub fn remaining_ms(&self, frame_start: u64, now: u64) -> u64 {
        self.budget_ms.saturating_sub(now.saturating_sub(frame_start))
    }

    /// Sleep for the rest of the frame; returns how long it slept
    pub fn pace<C: Clock>(&self, clock: &mut C, frame_start: u64) -> u64 {
        let remaining = self.remaining_ms(frame_start, clock.now_ms());
        if remaining > 0 {
            clock.sleep_ms(remaining);
        }
        remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_inclusive_bounds() {
        let mut rng = GameRng::new(7);
        for _ in 0..1000 {
            let v = rng.int_inclusive(30, 150);
            assert!((30..=150).contains(&v));
        }
        assert_eq!(rng.int_inclusive(5, 5), 5);
        let v = rng.int_inclusive(10, 2);
        assert!((2..=10).contains(&v));
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = GameRng::new(42);
        let mut b = GameRng::new(42);
        for _ in 0..32 {
            assert_eq!(a.int_inclusive(0, 1000), b.int_inclusive(0, 1000));
        }
    }

    #[test]
    fn test_float_range() {
        let mut rng = GameRng::new(3);
        for _ in 0..100 {
            let v = rng.float_range(-1.0, 1.0);
            assert!((-1.0..1.0).contains(&v));
        }
        assert_eq!(rng.float_range(2.0, 2.0), 2.0);
    }

    #[test]
    fn test_pacer_sleeps_remainder() {
        let pacer = FramePacer::new(16);
        let mut clock = ManualClock::new(100);
        clock.advance(5);
        let slept = pacer.pace(&mut clock, 100);
        assert_eq!(slept, 11);
        assert_eq!(clock.now_ms(), 116);
    }

    #[test]
    fn test_pacer_overrun_does_not_sleep() {
        let pacer = FramePacer::new(16);
        let mut clock = ManualClock::new(0);
        clock.advance(40);
        assert_eq!(pacer.pace(&mut clock, 0), 0);
        assert_eq!(clock.now_ms(), 40);
    }
}
