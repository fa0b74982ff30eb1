//! Interfaces to the USB or Bluetooth HID stacks, and the two ways of servicing
//! them.
//!
//! A [`PolledStack`] is driven by the caller, one unit of I/O at a time. An
//! [`EventStack`] owns the thread once its run loop is entered and calls back
//! into a [`HostCallbacks`] whenever the console wants something.

use crate::{Error, InputProvider, Result};
use procon_sys::{DeviceDescriptor, Report};
use std::fmt;
use tracing::{debug, trace};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Mode {
    /// Caller-driven, e.g. USB.
    Polled,
    /// Stack-driven run loop, e.g. Bluetooth.
    EventDriven,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mode::Polled => f.write_str("polled"),
            Mode::EventDriven => f.write_str("event-driven"),
        }
    }
}

/// What a polled stack reports after servicing one unit of I/O.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HostRequest {
    /// The endpoint is ready for the next input report.
    Report,
    /// The console changed the rumble state.
    Rumble(bool),
}

pub trait PolledStack {
    fn register_device(&mut self, descriptor: &DeviceDescriptor) -> anyhow::Result<()>;

    /// Services one unit of I/O without blocking.
    fn poll_service(&mut self) -> anyhow::Result<Option<HostRequest>>;

    fn send_report(&mut self, report: &Report) -> anyhow::Result<()>;
}

impl<S: PolledStack + ?Sized> PolledStack for &mut S {
    fn register_device(&mut self, descriptor: &DeviceDescriptor) -> anyhow::Result<()> {
        (**self).register_device(descriptor)
    }

    fn poll_service(&mut self) -> anyhow::Result<Option<HostRequest>> {
        (**self).poll_service()
    }

    fn send_report(&mut self, report: &Report) -> anyhow::Result<()> {
        (**self).send_report(report)
    }
}

/// Entry points an [`EventStack`] calls from its run loop.
pub trait HostCallbacks {
    /// The returned report is only valid until the next call.
    fn report_requested(&mut self) -> &Report;

    fn rumble_changed(&mut self, enabled: bool);
}

pub trait EventStack {
    fn register_device(&mut self, descriptor: &DeviceDescriptor) -> anyhow::Result<()>;

    /// Runs the stack until the device powers off.
    ///
    /// `callbacks` is the only way back into the dispatcher.
    fn run_loop_execute(&mut self, callbacks: &mut dyn HostCallbacks) -> anyhow::Result<()>;
}

impl<S: EventStack + ?Sized> EventStack for &mut S {
    fn register_device(&mut self, descriptor: &DeviceDescriptor) -> anyhow::Result<()> {
        (**self).register_device(descriptor)
    }

    fn run_loop_execute(&mut self, callbacks: &mut dyn HostCallbacks) -> anyhow::Result<()> {
        (**self).run_loop_execute(callbacks)
    }
}

/// Link between a transport and the input provider of a running device.
///
/// Owns the report buffer lent to the provider on each request.
pub struct HostSession<'p> {
    provider: &'p mut dyn InputProvider,
    buffer: Report,
    rumble: Option<bool>,
    reports: u64,
}

impl<'p> HostSession<'p> {
    pub(crate) fn new(provider: &'p mut dyn InputProvider) -> Self {
        HostSession {
            provider,
            buffer: Report::neutral(),
            rumble: None,
            reports: 0,
        }
    }

    pub fn reports(&self) -> u64 {
        self.reports
    }
}

impl HostCallbacks for HostSession<'_> {
    fn report_requested(&mut self) -> &Report {
        self.buffer = Report::neutral();
        self.provider.produce_report(&mut self.buffer);
        self.reports += 1;
        trace!(report = %hex::encode(self.buffer.as_bytes()));
        &self.buffer
    }

    fn rumble_changed(&mut self, enabled: bool) {
        if self.rumble == Some(enabled) {
            return;
        }
        self.rumble = Some(enabled);
        debug!(enabled, "rumble changed");
        self.provider.on_rumble_changed(enabled);
    }
}

/// One of the two servicing strategies, chosen when the dispatcher is built.
pub trait Transport {
    fn mode(&self) -> Mode;

    fn register(&mut self, descriptor: &DeviceDescriptor) -> anyhow::Result<()>;

    /// Polled: one unit of I/O. Event-driven: the whole run loop.
    fn service(&mut self, session: &mut HostSession<'_>) -> Result<()>;
}

pub struct PolledTransport<S> {
    stack: S,
}

impl<S: PolledStack> PolledTransport<S> {
    pub fn new(stack: S) -> Self {
        PolledTransport { stack }
    }
}

impl<S: PolledStack> Transport for PolledTransport<S> {
    fn mode(&self) -> Mode {
        Mode::Polled
    }

    fn register(&mut self, descriptor: &DeviceDescriptor) -> anyhow::Result<()> {
        self.stack.register_device(descriptor)
    }

    fn service(&mut self, session: &mut HostSession<'_>) -> Result<()> {
        match self.stack.poll_service().map_err(Error::Transport)? {
            Some(HostRequest::Report) => {
                let report = session.report_requested();
                self.stack.send_report(report).map_err(Error::Transport)?;
            }
            Some(HostRequest::Rumble(enabled)) => session.rumble_changed(enabled),
            None => (),
        }
        Ok(())
    }
}

pub struct EventDrivenTransport<S> {
    stack: S,
}

impl<S: EventStack> EventDrivenTransport<S> {
    pub fn new(stack: S) -> Self {
        EventDrivenTransport { stack }
    }
}

impl<S: EventStack> Transport for EventDrivenTransport<S> {
    fn mode(&self) -> Mode {
        Mode::EventDriven
    }

    fn register(&mut self, descriptor: &DeviceDescriptor) -> anyhow::Result<()> {
        self.stack.register_device(descriptor)
    }

    fn service(&mut self, session: &mut HostSession<'_>) -> Result<()> {
        self.stack
            .run_loop_execute(session)
            .map_err(Error::Transport)
    }
}
