use procon_sys::Report;

/// A source of controller state.
///
/// Both methods are called inline with the servicing of the transport, from a
/// single thread. They must not block: a slow provider stalls the whole device.
pub trait InputProvider {
    /// Fill `report` with the current button and stick state.
    ///
    /// `report` starts out as [`Report::neutral`] and must not be kept around
    /// after the call.
    fn produce_report(&mut self, report: &mut Report);

    /// The console turned rumble on or off.
    fn on_rumble_changed(&mut self, enabled: bool);
}

impl<P: InputProvider + ?Sized> InputProvider for &mut P {
    fn produce_report(&mut self, report: &mut Report) {
        (**self).produce_report(report)
    }

    fn on_rumble_changed(&mut self, enabled: bool) {
        (**self).on_rumble_changed(enabled)
    }
}

impl<P: InputProvider + ?Sized> InputProvider for Box<P> {
    fn produce_report(&mut self, report: &mut Report) {
        (**self).produce_report(report)
    }

    fn on_rumble_changed(&mut self, enabled: bool) {
        (**self).on_rumble_changed(enabled)
    }
}
