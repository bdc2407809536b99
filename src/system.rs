//! Device-level collaborators: backlight, LEDs, reboot and the battery flag

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Hardware knobs reachable from the pause menu
pub trait SystemControl {
    /// Backlight PWM duty (0-255)
    fn set_brightness(&mut self, duty: u8);
    /// LED strip level (0 = off)
    fn set_led_level(&mut self, level: u8);
    /// Reboot the device. The simulation returns to its boot state
    /// afterwards in case the platform does not actually reset.
    fn restart(&mut self);
}

/// Logs requests and otherwise does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessSystem;

impl SystemControl for HeadlessSystem {
    fn set_brightness(&mut self, duty: u8) {
        log::info!("Brightness -> {}", duty);
    }

    fn set_led_level(&mut self, level: u8) {
        log::info!("LED level -> {}", level);
    }

    fn restart(&mut self) {
        log::info!("Restart requested");
    }
}

/// A request made through [`SystemControl`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemCall {
    Brightness(u8),
    LedLevel(u8),
    Restart,
}

/// Keeps every request for inspection
#[derive(Debug, Clone, Default)]
pub struct RecordingSystem {
    pub calls: Vec<SystemCall>,
}

impl SystemControl for RecordingSystem {
    fn set_brightness(&mut self, duty: u8) {
        self.calls.push(SystemCall::Brightness(duty));
    }

    fn set_led_level(&mut self, level: u8) {
        self.calls.push(SystemCall::LedLevel(level));
    }

    fn restart(&mut self) {
        self.calls.push(SystemCall::Restart);
    }
}

/// "Battery critical" flag shared with a background monitor. A lone bool
/// with no companion data, so loads and stores are relaxed.
#[derive(Debug, Clone, Default)]
pub struct BatteryFlag(Arc<AtomicBool>);

impl BatteryFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_critical(&self, critical: bool) {
        self.0.store(critical, Ordering::Relaxed);
    }

    pub fn is_critical(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battery_flag_shared_across_threads() {
        let flag = BatteryFlag::new();
        let monitor = flag.clone();
        std::thread::spawn(move || monitor.set_critical(true))
            .join()
            .unwrap();
        assert!(flag.is_critical());
        flag.set_critical(false);
        assert!(!flag.is_critical());
    }

    #[test]
    fn test_recording_system() {
        let mut system = RecordingSystem::default();
        system.set_brightness(50);
        system.restart();
        assert_eq!(system.calls, vec![SystemCall::Brightness(50), SystemCall::Restart]);
    }
}
