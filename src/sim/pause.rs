//! Pause menu controller
//!
//! Driven once per frame from the main loop instead of spinning in its own
//! loop. Up/Down move the selection with wraparound, A activates, Start or
//! B leaves.

use super::state::GamePhase;
use crate::input::Buttons;

/// Backlight duty cycle per brightness level
pub const BRIGHTNESS_LEVELS: [u8; 4] = [25, 50, 150, 255];
/// Number of LED brightness levels (0 = off)
pub const LED_LEVELS: u8 = 4;

/// Menu entries, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseOption {
    Brightness,
    Led,
    ResetGame,
    RestartDevice,
}

impl PauseOption {
    pub const ALL: [PauseOption; 4] = [
        PauseOption::Brightness,
        PauseOption::Led,
        PauseOption::ResetGame,
        PauseOption::RestartDevice,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PauseOption::Brightness => "Brightness",
            PauseOption::Led => "LED",
            PauseOption::ResetGame => "Reset Game",
            PauseOption::RestartDevice => "Restart",
        }
    }

    /// Activating this entry leaves the menu
    pub fn exits(&self) -> bool {
        matches!(self, PauseOption::ResetGame | PauseOption::RestartDevice)
    }
}

/// Side effect requested by the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseAction {
    SetBrightness(u8),
    SetLedLevel(u8),
    ResetGame,
    RestartDevice,
}

/// What the menu did with this frame's input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseOutcome {
    /// Nothing to do
    Idle,
    /// Selection moved; redraw the menu
    Moved,
    /// An entry was activated
    Activated(PauseAction),
    /// Start/B pressed: go back to the game
    Resume,
}

#[derive(Debug, Clone)]
pub struct PauseMenu {
    selected: usize,
    brightness_level: usize,
    led_level: u8,
    /// Phase to return to
    resume_to: GamePhase,
}

impl Default for PauseMenu {
    fn default() -> Self {
        Self {
            selected: 0,
            brightness_level: BRIGHTNESS_LEVELS.len() - 1,
            led_level: LED_LEVELS - 1,
            resume_to: GamePhase::Aiming,
        }
    }
}

impl PauseMenu {
    /// Enter the menu from `phase`; selection starts at the top
    pub fn open(&mut self, phase: GamePhase) {
        self.selected = 0;
        self.resume_to = phase;
    }

    pub fn options(&self) -> &'static [PauseOption] {
        &PauseOption::ALL
    }

    pub fn selected(&self) -> PauseOption {
        PauseOption::ALL[self.selected]
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn resume_to(&self) -> GamePhase {
        self.resume_to
    }

    /// Handle one frame of press edges
    pub fn handle(&mut self, pressed: &Buttons) -> PauseOutcome {
        let count = PauseOption::ALL.len();
        if pressed.start || pressed.b {
            return PauseOutcome::Resume;
        }
        if pressed.up {
            self.selected = (self.selected + count - 1) % count;
            return PauseOutcome::Moved;
        }
        if pressed.down {
            self.selected = (self.selected + 1) % count;
            return PauseOutcome::Moved;
        }
        if pressed.a {
            return PauseOutcome::Activated(self.activate());
        }
        PauseOutcome::Idle
    }

    fn activate(&mut self) -> PauseAction {
        match self.selected() {
            PauseOption::Brightness => {
                self.brightness_level = (self.brightness_level + 1) % BRIGHTNESS_LEVELS.len();
                PauseAction::SetBrightness(BRIGHTNESS_LEVELS[self.brightness_level])
            }
            PauseOption::Led => {
                self.led_level = (self.led_level + 1) % LED_LEVELS;
                PauseAction::SetLedLevel(self.led_level)
            }
            PauseOption::ResetGame => PauseAction::ResetGame,
            PauseOption::RestartDevice => PauseAction::RestartDevice,
        }
    }
}
