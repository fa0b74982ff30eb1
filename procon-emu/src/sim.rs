//! Stand-ins for the console and the hardware, so the whole pipeline runs on a
//! desktop.

use anyhow::bail;
use cgmath::vec2;
use procon::{
    procon_sys::{Button, DeviceDescriptor, Report, Stick, STANDARD_FULL_REPORT_ID},
    providers::InputPins,
    EventStack, HostCallbacks, HostRequest, LegacyDecoder, PolledStack,
};
use std::{
    cell::Cell,
    rc::Rc,
    thread::sleep,
    time::{Duration, Instant},
};
use tracing::{debug, info};

/// The console flips its rumble state every that many reports.
const RUMBLE_PERIOD: u32 = 32;

/// Shared view on whether the simulated console is still on.
#[derive(Clone)]
pub struct Power(Rc<Cell<bool>>);

impl Power {
    pub fn is_on(&self) -> bool {
        self.0.get()
    }
}

pub struct SimulatedHost {
    requests: u32,
    interval: Duration,
    refuse: bool,
    served: u32,
    next_request: Instant,
    rumble: bool,
    pending_rumble: Option<bool>,
    last_buttons: [u8; 3],
    power: Power,
}

impl SimulatedHost {
    pub fn new(requests: u32, interval: Duration, refuse: bool) -> (SimulatedHost, Power) {
        let power = Power(Rc::new(Cell::new(true)));
        let host = SimulatedHost {
            requests,
            interval,
            refuse,
            served: 0,
            next_request: Instant::now(),
            rumble: false,
            pending_rumble: None,
            last_buttons: [0; 3],
            power: power.clone(),
        };
        (host, power)
    }

    fn register(&mut self, descriptor: &DeviceDescriptor) -> anyhow::Result<()> {
        if self.refuse {
            bail!("console refused {}", descriptor.name);
        }
        if descriptor.report_id != STANDARD_FULL_REPORT_ID {
            bail!(
                "{} advertises report 0x{:02x}, expected 0x{:02x}",
                descriptor.name,
                descriptor.report_id,
                STANDARD_FULL_REPORT_ID
            );
        }
        info!(
            "console paired with {} ({:04x}:{:04x})",
            descriptor.name, descriptor.vendor_id, descriptor.product_id
        );
        self.next_request = Instant::now() + self.interval;
        if self.served >= self.requests {
            self.power_off();
        }
        Ok(())
    }

    fn power_off(&mut self) {
        info!(reports = self.served, "console powering off");
        self.power.0.set(false);
    }

    fn received(&mut self, report: &Report) {
        debug!(
            bytes = %hex::encode(report.as_bytes()),
            left = ?report.left_stick,
            right = ?report.right_stick,
            "report"
        );
        if report.buttons != self.last_buttons {
            info!(buttons = %report.buttons_status(), "buttons changed");
            self.last_buttons = report.buttons;
        }

        self.served += 1;
        if self.served % RUMBLE_PERIOD == 0 {
            self.rumble = !self.rumble;
            self.pending_rumble = Some(self.rumble);
        }
        if self.served >= self.requests {
            self.power_off();
        }
    }
}

impl PolledStack for SimulatedHost {
    fn register_device(&mut self, descriptor: &DeviceDescriptor) -> anyhow::Result<()> {
        self.register(descriptor)
    }

    fn poll_service(&mut self) -> anyhow::Result<Option<HostRequest>> {
        if !self.power.is_on() {
            return Ok(None);
        }
        if let Some(enabled) = self.pending_rumble.take() {
            return Ok(Some(HostRequest::Rumble(enabled)));
        }
        let now = Instant::now();
        if now >= self.next_request {
            self.next_request = now + self.interval;
            Ok(Some(HostRequest::Report))
        } else {
            Ok(None)
        }
    }

    fn send_report(&mut self, report: &Report) -> anyhow::Result<()> {
        self.received(report);
        Ok(())
    }
}

impl EventStack for SimulatedHost {
    fn register_device(&mut self, descriptor: &DeviceDescriptor) -> anyhow::Result<()> {
        self.register(descriptor)
    }

    fn run_loop_execute(&mut self, callbacks: &mut dyn HostCallbacks) -> anyhow::Result<()> {
        while self.power.is_on() {
            sleep(self.next_request.saturating_duration_since(Instant::now()));
            self.next_request += self.interval;
            let report = *callbacks.report_requested();
            self.received(&report);
            if let Some(enabled) = self.pending_rumble.take() {
                callbacks.rumble_changed(enabled);
            }
        }
        Ok(())
    }
}

/// Legacy controller whose stick turns one full circle per second. A is held
/// while rumble is on.
pub struct SpinningDecoder {
    start: Instant,
    rumble: bool,
}

impl Default for SpinningDecoder {
    fn default() -> Self {
        SpinningDecoder {
            start: Instant::now(),
            rumble: false,
        }
    }
}

impl LegacyDecoder for SpinningDecoder {
    fn init(&mut self) -> anyhow::Result<()> {
        self.start = Instant::now();
        Ok(())
    }

    fn report(&mut self) -> Report {
        let angle = self.start.elapsed().as_secs_f64() * std::f64::consts::TAU;
        let mut report = Report::neutral();
        report.left_stick = Stick::from_normalized(vec2(angle.cos(), angle.sin()));
        Button::A.set(&mut report.buttons, self.rumble);
        report
    }

    fn set_rumble(&mut self, enabled: bool) {
        self.rumble = enabled;
    }
}

/// Activates pins 2 to 12 in turn, 250ms each.
pub struct SweepingPins {
    start: Instant,
}

impl Default for SweepingPins {
    fn default() -> Self {
        SweepingPins {
            start: Instant::now(),
        }
    }
}

impl InputPins for SweepingPins {
    fn is_active(&self, pin: u8) -> bool {
        let step = (self.start.elapsed().as_millis() / 250 % 11) as u8;
        pin == step + 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procon::{
        providers::{AutoPress, AutoPressConfig},
        Dispatcher,
    };

    #[test]
    fn zero_requests_powers_off_at_pairing() {
        let mut provider = AutoPress::new(AutoPressConfig::default());
        let (mut host, power) = SimulatedHost::new(0, Duration::from_millis(0), false);
        let mut dispatcher = Dispatcher::polled(&mut provider, &mut host);
        dispatcher.init().unwrap();
        assert!(!power.is_on());
        dispatcher.update().unwrap();
        assert_eq!(dispatcher.reports(), 0);
        drop(dispatcher);

        let (mut host, power) = SimulatedHost::new(0, Duration::from_millis(0), false);
        let mut dispatcher = Dispatcher::event_driven(&mut provider, &mut host);
        dispatcher.init().unwrap();
        assert!(!power.is_on());
        assert_eq!(dispatcher.reports(), 0);
    }

    #[test]
    fn serves_the_requested_count() {
        let mut provider = AutoPress::new(AutoPressConfig::default());
        let (mut host, power) = SimulatedHost::new(3, Duration::from_millis(0), false);
        let mut dispatcher = Dispatcher::event_driven(&mut provider, &mut host);
        dispatcher.init().unwrap();
        assert!(!power.is_on());
        assert_eq!(dispatcher.reports(), 3);
    }

    #[test]
    fn refused_pairing_keeps_power() {
        let mut provider = AutoPress::new(AutoPressConfig::default());
        let (mut host, power) = SimulatedHost::new(3, Duration::from_millis(0), true);
        let mut dispatcher = Dispatcher::polled(&mut provider, &mut host);
        assert!(dispatcher.init().is_err());
        assert!(power.is_on());
        assert_eq!(dispatcher.reports(), 0);
    }

    #[test]
    fn simulated_inputs_start_idle() {
        let mut decoder = SpinningDecoder::default();
        decoder.init().unwrap();
        assert!(!Button::A.is_pressed(&decoder.report().buttons));
        decoder.set_rumble(true);
        assert!(Button::A.is_pressed(&decoder.report().buttons));

        let pins = SweepingPins::default();
        assert!(pins.is_active(2));
        assert!(!pins.is_active(12));
    }
}
