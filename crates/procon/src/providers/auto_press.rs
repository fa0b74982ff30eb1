use crate::InputProvider;
use procon_sys::{Button, Report};
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Copy, Clone)]
pub struct AutoPressConfig {
    pub button: Button,
    /// Time between the start of two presses.
    pub interval: Duration,
    /// How long the button stays down.
    pub hold: Duration,
}

impl Default for AutoPressConfig {
    fn default() -> Self {
        AutoPressConfig {
            button: Button::A,
            interval: Duration::from_secs(5),
            hold: Duration::from_millis(100),
        }
    }
}

/// Presses one button periodically, sticks centered.
///
/// Handy to check that the console sees the controller at all.
pub struct AutoPress {
    config: AutoPressConfig,
    last_press: Instant,
    pressed: bool,
}

impl AutoPress {
    /// The first press happens one interval from now.
    pub fn new(config: AutoPressConfig) -> Self {
        AutoPress::starting_at(config, Instant::now())
    }

    pub fn starting_at(config: AutoPressConfig, start: Instant) -> Self {
        AutoPress {
            config,
            last_press: start,
            pressed: false,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn produce_report_at(&mut self, report: &mut Report, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_press);
        if self.pressed {
            if elapsed >= self.config.hold {
                self.pressed = false;
                debug!(button = ?self.config.button, "released");
            }
        } else if elapsed >= self.config.interval {
            self.pressed = true;
            self.last_press = now;
            debug!(button = ?self.config.button, "pressed");
        }
        self.config.button.set(&mut report.buttons, self.pressed);
    }
}

impl InputProvider for AutoPress {
    fn produce_report(&mut self, report: &mut Report) {
        self.produce_report_at(report, Instant::now());
    }

    fn on_rumble_changed(&mut self, enabled: bool) {
        info!(enabled, "rumble");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_at(auto: &mut AutoPress, start: Instant, ms: u64) -> Report {
        let mut report = Report::neutral();
        auto.produce_report_at(&mut report, start + Duration::from_millis(ms));
        report
    }

    #[test]
    fn press_cycle() {
        let start = Instant::now();
        let mut auto = AutoPress::starting_at(AutoPressConfig::default(), start);

        assert_eq!(report_at(&mut auto, start, 0), Report::neutral());
        assert_eq!(report_at(&mut auto, start, 4999), Report::neutral());

        let report = report_at(&mut auto, start, 5000);
        assert!(Button::A.is_pressed(&report.buttons));
        assert_eq!(report.buttons, [0x08, 0, 0]);
        assert_eq!(report.left_stick, report.right_stick);
        assert_eq!(report.info, 0x91);

        assert!(auto.is_pressed());
        assert!(Button::A.is_pressed(&report_at(&mut auto, start, 5099).buttons));
        assert_eq!(report_at(&mut auto, start, 5100), Report::neutral());
        assert!(!auto.is_pressed());

        // Next press is measured from the start of the previous one.
        assert_eq!(report_at(&mut auto, start, 9999), Report::neutral());
        assert!(Button::A.is_pressed(&report_at(&mut auto, start, 10000).buttons));
    }

    #[test]
    fn other_button() {
        let start = Instant::now();
        let config = AutoPressConfig {
            button: Button::Home,
            interval: Duration::from_millis(10),
            hold: Duration::from_millis(10),
        };
        let mut auto = AutoPress::starting_at(config, start);
        let report = report_at(&mut auto, start, 10);
        assert_eq!(report.buttons, [0, 0x10, 0]);
    }
}
