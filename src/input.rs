//! Button sampling
//!
//! The board reports raw button levels. Direction buttons are used as held
//! levels (paddle motion, aim sweep); A/B/Start and menu navigation use
//! press edges, true for exactly one frame per physical press.

/// One sample of every button (true = down)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons {
    pub a: bool,
    pub b: bool,
    pub start: bool,
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Debounced boot/debug button on the board
    pub boot: bool,
}

impl Buttons {
    /// Buttons down in `self` but not in `prev`
    pub fn rising_from(&self, prev: &Buttons) -> Buttons {
        Buttons {
            a: self.a && !prev.a,
            b: self.b && !prev.b,
            start: self.start && !prev.start,
            up: self.up && !prev.up,
            down: self.down && !prev.down,
            left: self.left && !prev.left,
            right: self.right && !prev.right,
            boot: self.boot && !prev.boot,
        }
    }
}

/// Source of raw button levels (GPIO on the board, scripted in tests)
pub trait InputSource {
    fn sample(&mut self) -> Buttons;
}

/// Turns raw level samples into held + pressed pairs
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    prev: Buttons,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw sample; returns `(held, pressed)`
    pub fn update(&mut self, raw: Buttons) -> (Buttons, Buttons) {
        let pressed = raw.rising_from(&self.prev);
        self.prev = raw;
        (raw, pressed)
    }
}

/// Replays a fixed list of samples, then reports nothing held
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    samples: Vec<Buttons>,
    next: usize,
}

impl ScriptedInput {
    pub fn new(samples: Vec<Buttons>) -> Self {
        Self { samples, next: 0 }
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self) -> Buttons {
        let sample = self.samples.get(self.next).copied().unwrap_or_default();
        self.next += 1;
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_edge_triggered() {
        let mut tracker = InputTracker::new();
        let down = Buttons {
            a: true,
            ..Default::default()
        };

        let (held, pressed) = tracker.update(down);
        assert!(held.a && pressed.a);

        // Still held: no new press
        let (held, pressed) = tracker.update(down);
        assert!(held.a && !pressed.a);

        // Release then press again
        tracker.update(Buttons::default());
        let (_, pressed) = tracker.update(down);
        assert!(pressed.a);
    }

    #[test]
    fn test_scripted_input_runs_out() {
        let mut input = ScriptedInput::new(vec![Buttons {
            start: true,
            ..Default::default()
        }]);
        assert!(input.sample().start);
        assert_eq!(input.sample(), Buttons::default());
    }
}
