//! Pre-existing hardware controllers (N64, GameCube) plugged into the
//! [`InputProvider`] abstraction.
//!
//! Sampling the physical controller and normalizing it into a [`Report`] is the
//! decoder's job. Nothing here polls or waits.

use crate::{Error, InputProvider, Result};
use procon_sys::Report;
use std::fmt;
use tracing::instrument;

/// Hardware protocol driver for one legacy controller.
pub trait LegacyDecoder {
    fn init(&mut self) -> anyhow::Result<()>;

    /// Latest sampled state, already in the Pro Controller layout.
    fn report(&mut self) -> Report;

    /// Defaults to a no-op for controllers without haptics.
    fn set_rumble(&mut self, _enabled: bool) {}
}


#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ControllerKind {
    N64,
    Gamecube,
}

impl fmt::Display for ControllerKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ControllerKind::N64 => f.write_str("N64"),
            ControllerKind::Gamecube => f.write_str("GameCube"),
        }
    }
}

/// A legacy controller tagged with its hardware kind.
pub struct LegacyController<D> {
    kind: ControllerKind,
    decoder: D,
}

impl<D: LegacyDecoder> LegacyController<D> {
    pub fn n64(decoder: D) -> Self {
        LegacyController {
            kind: ControllerKind::N64,
            decoder,
        }
    }

    pub fn gamecube(decoder: D) -> Self {
        LegacyController {
            kind: ControllerKind::Gamecube,
            decoder,
        }
    }

    pub fn kind(&self) -> ControllerKind {
        self.kind
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    #[instrument(level = "info", skip(self), fields(kind = %self.kind), err)]
    pub fn init(&mut self) -> Result<()> {
        let kind = self.kind;
        self.decoder
            .init()
            .map_err(|source| Error::LegacyDecoderUnavailable { kind, source })
    }

    pub fn report(&mut self) -> Report {
        self.decoder.report()
    }

    pub fn set_rumble(&mut self, enabled: bool) {
        self.decoder.set_rumble(enabled)
    }
}

/// Exposes a [`LegacyController`] as an [`InputProvider`].
///
/// The controller is borrowed, not owned, and every call is forwarded as is.
pub struct ControllerAdapter<'c, D> {
    controller: &'c mut LegacyController<D>,
}

impl<'c, D: LegacyDecoder> ControllerAdapter<'c, D> {
    /// Wraps a controller that was already initialized.
    pub fn new(controller: &'c mut LegacyController<D>) -> Self {
        ControllerAdapter { controller }
    }

    /// Initializes the controller, then wraps it.
    pub fn attach(controller: &'c mut LegacyController<D>) -> Result<Self> {
        controller.init()?;
        Ok(ControllerAdapter::new(controller))
    }

    pub fn kind(&self) -> ControllerKind {
        self.controller.kind()
    }
}

impl<D: LegacyDecoder> InputProvider for ControllerAdapter<'_, D> {
    fn produce_report(&mut self, report: &mut Report) {
        *report = self.controller.report();
    }

    fn on_rumble_changed(&mut self, enabled: bool) {
        self.controller.set_rumble(enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use procon_sys::{input::connection_info, input::Battery, Button, Stick};

    #[derive(Default)]
    struct StubDecoder {
        report: Report,
        rumble_calls: Vec<bool>,
        fail_init: bool,
        initialized: bool,
    }

    impl LegacyDecoder for StubDecoder {
        fn init(&mut self) -> anyhow::Result<()> {
            if self.fail_init {
                return Err(anyhow!("no answer on the data line"));
            }
            self.initialized = true;
            Ok(())
        }

        fn report(&mut self) -> Report {
            self.report
        }

        fn set_rumble(&mut self, enabled: bool) {
            self.rumble_calls.push(enabled);
        }
    }

    struct NoHaptics;

    impl LegacyDecoder for NoHaptics {
        fn init(&mut self) -> anyhow::Result<()> {
            Ok(())
        }

        fn report(&mut self) -> Report {
            Report::neutral()
        }
    }

    fn sample_report() -> Report {
        let mut report = Report::neutral();
        report.info = connection_info(Battery::Medium, true);
        Button::B.press(&mut report.buttons);
        Button::Left.press(&mut report.buttons);
        report.left_stick = Stick::new(12, 4000);
        report.right_stick = Stick::new(3000, 7);
        report
    }

    #[test]
    fn report_is_forwarded_untouched() {
        let expected = sample_report();
        let mut controller = LegacyController::gamecube(StubDecoder {
            report: expected,
            ..StubDecoder::default()
        });
        let mut adapter = ControllerAdapter::new(&mut controller);

        let mut report = Report::neutral();
        Button::Home.press(&mut report.buttons);
        adapter.produce_report(&mut report);
        assert_eq!(report, expected);
        assert_eq!(report.as_bytes(), expected.as_bytes());
    }

    #[test]
    fn rumble_is_delegated_once() {
        for &value in &[true, false] {
            let mut controller = LegacyController::n64(StubDecoder::default());
            ControllerAdapter::new(&mut controller).on_rumble_changed(value);
            assert_eq!(controller.decoder().rumble_calls, vec![value]);
        }
    }

    #[test]
    fn rumble_without_haptics_is_ignored() {
        let mut controller = LegacyController::n64(NoHaptics);
        let mut adapter = ControllerAdapter::attach(&mut controller).unwrap();
        adapter.on_rumble_changed(true);
        let mut report = sample_report();
        adapter.produce_report(&mut report);
        assert_eq!(report, Report::neutral());
    }

    #[test]
    fn attach_initializes() {
        let mut controller = LegacyController::n64(StubDecoder::default());
        let adapter = ControllerAdapter::attach(&mut controller).unwrap();
        assert_eq!(adapter.kind(), ControllerKind::N64);
        assert!(controller.decoder().initialized);
    }

    #[test]
    fn attach_propagates_decoder_failure() {
        let mut controller = LegacyController::gamecube(StubDecoder {
            fail_init: true,
            ..StubDecoder::default()
        });
        match ControllerAdapter::attach(&mut controller) {
            Err(Error::LegacyDecoderUnavailable { kind, source }) => {
                assert_eq!(kind, ControllerKind::Gamecube);
                assert_eq!(source.to_string(), "no answer on the data line");
            }
            Err(e) => panic!("unexpected error {:?}", e),
            Ok(_) => panic!("attach should fail"),
        }
    }
}
