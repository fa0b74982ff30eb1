use crate::InputProvider;
use enum_map::{enum_map, EnumMap};
use procon_sys::{
    input::{STICK_CENTER, STICK_MAX},
    Button, Report, Stick,
};
use tracing::debug;

/// Digital inputs, typically GPIO lines. Configuring them is up to the caller.
pub trait InputPins {
    fn is_active(&self, pin: u8) -> bool;
}

impl<F: Fn(u8) -> bool> InputPins for F {
    fn is_active(&self, pin: u8) -> bool {
        self(pin)
    }
}

/// Pins pushing the left stick to its limits.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct StickPins {
    pub up: Option<u8>,
    pub down: Option<u8>,
    pub left: Option<u8>,
    pub right: Option<u8>,
}

/// Which pin drives which button.
///
/// Several buttons may share a pin, so a single switch can press both R and
/// ZR.
#[derive(Debug, Clone)]
pub struct PinMap {
    pub buttons: EnumMap<Button, Option<u8>>,
    pub left_stick: StickPins,
}

impl Default for PinMap {
    fn default() -> Self {
        PinMap {
            buttons: enum_map! {
                Button::A => Some(2),
                Button::B => Some(3),
                Button::X => Some(4),
                Button::Y => Some(5),
                Button::L | Button::ZL => Some(6),
                Button::R | Button::ZR => Some(7),
                Button::Plus => Some(8),
                _ => None,
            },
            left_stick: StickPins {
                up: Some(9),
                down: Some(10),
                left: Some(11),
                right: Some(12),
            },
        }
    }
}

pub struct PinInputs<P> {
    pins: P,
    map: PinMap,
}

impl<P: InputPins> PinInputs<P> {
    pub fn new(pins: P, map: PinMap) -> Self {
        PinInputs { pins, map }
    }

    fn active(&self, pin: Option<u8>) -> bool {
        pin.map_or(false, |pin| self.pins.is_active(pin))
    }
}

impl<P: InputPins> InputProvider for PinInputs<P> {
    fn produce_report(&mut self, report: &mut Report) {
        for (button, &pin) in &self.map.buttons {
            if self.active(pin) {
                button.press(&mut report.buttons);
            }
        }

        let stick = self.map.left_stick;
        let mut x = STICK_CENTER;
        let mut y = STICK_CENTER;
        if self.active(stick.left) {
            x = 0;
        }
        if self.active(stick.right) {
            x = STICK_MAX;
        }
        if self.active(stick.up) {
            y = STICK_MAX;
        }
        if self.active(stick.down) {
            y = 0;
        }
        report.left_stick = Stick::new(x.into(), y.into());
    }

    fn on_rumble_changed(&mut self, enabled: bool) {
        debug!(enabled, "rumble ignored, no motor pin");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with(active: &'static [u8]) -> Report {
        let mut inputs = PinInputs::new(move |pin: u8| active.contains(&pin), PinMap::default());
        let mut report = Report::neutral();
        inputs.produce_report(&mut report);
        report
    }

    #[test]
    fn idle() {
        assert_eq!(report_with(&[]), Report::neutral());
    }

    #[test]
    fn shared_pins_press_two_buttons() {
        let report = report_with(&[7]);
        assert_eq!(report.buttons, [0xc0, 0, 0]);
        let report = report_with(&[6, 8]);
        assert_eq!(report.buttons, [0, 0x02, 0xc0]);
        let report = report_with(&[2, 3, 4, 5]);
        assert_eq!(report.buttons, [0x0f, 0, 0]);
    }

    #[test]
    fn stick_directions() {
        let stick = report_with(&[11, 9]).left_stick;
        assert_eq!((stick.x(), stick.y()), (0, 0xfff));
        let stick = report_with(&[12, 10]).left_stick;
        assert_eq!((stick.x(), stick.y()), (0xfff, 0));
        // Right and down win over their opposite.
        let stick = report_with(&[9, 10, 11, 12]).left_stick;
        assert_eq!((stick.x(), stick.y()), (0xfff, 0));
        assert_eq!(report_with(&[9]).right_stick, Stick::CENTERED);
    }

    #[test]
    fn custom_map() {
        let mut map = PinMap::default();
        map.buttons[Button::ZR] = None;
        map.buttons[Button::Capture] = Some(20);
        map.left_stick = StickPins::default();
        let mut inputs = PinInputs::new(|pin: u8| pin == 7 || pin == 20 || pin == 9, map);
        let mut report = Report::neutral();
        inputs.produce_report(&mut report);
        assert_eq!(report.buttons, [0x40, 0x20, 0]);
        assert_eq!(report.left_stick, Stick::CENTERED);
    }
}
