use crate::{
    transport::{
        EventDrivenTransport, EventStack, HostSession, Mode, PolledStack, PolledTransport,
        Transport,
    },
    Error, InputProvider, Result,
};
use procon_sys::{DeviceDescriptor, PRO_CONTROLLER_DESCRIPTOR};
use tracing::{info, instrument};

/// Emulated Pro Controller: one input provider behind one transport.
///
/// The mode is fixed by the transport given at construction. Switching from
/// USB to Bluetooth means building a new `Dispatcher`. The session linking the
/// transport to the provider only exists once `init` succeeded.
///
/// ```ignore
/// let mut dispatcher = Dispatcher::polled(&mut provider, usb_stack);
/// dispatcher.init()?;
/// loop {
///     dispatcher.update()?;
/// }
/// ```
pub struct Dispatcher<'p> {
    mode: Mode,
    transport: Box<dyn Transport + 'p>,
    descriptor: DeviceDescriptor,
    /// Handed over to the session at `init`.
    provider: Option<&'p mut dyn InputProvider>,
    session: Option<HostSession<'p>>,
}

impl<'p> Dispatcher<'p> {
    pub fn new(provider: &'p mut dyn InputProvider, transport: Box<dyn Transport + 'p>) -> Self {
        Dispatcher {
            mode: transport.mode(),
            transport,
            descriptor: PRO_CONTROLLER_DESCRIPTOR,
            provider: Some(provider),
            session: None,
        }
    }

    pub fn polled<S: PolledStack + 'p>(provider: &'p mut dyn InputProvider, stack: S) -> Self {
        Dispatcher::new(provider, Box::new(PolledTransport::new(stack)))
    }

    pub fn event_driven<S: EventStack + 'p>(
        provider: &'p mut dyn InputProvider,
        stack: S,
    ) -> Self {
        Dispatcher::new(provider, Box::new(EventDrivenTransport::new(stack)))
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    /// Number of reports handed to the transport so far.
    pub fn reports(&self) -> u64 {
        self.session.as_ref().map_or(0, HostSession::reports)
    }

    /// Registers the device with the transport stack and opens the session.
    ///
    /// In event-driven mode this then enters the stack's run loop and only
    /// returns when the loop does. On failure nothing is left half-initialized
    /// and no report is ever produced.
    #[instrument(level = "info", skip(self), fields(mode = %self.mode), err)]
    pub fn init(&mut self) -> Result<()> {
        if self.session.is_some() {
            return Err(Error::AlreadyInitialized);
        }
        self.transport
            .register(&self.descriptor)
            .map_err(Error::TransportInit)?;
        let provider = self.provider.take().ok_or(Error::AlreadyInitialized)?;
        self.session = Some(HostSession::new(provider));
        info!(
            name = self.descriptor.name,
            vendor_id = self.descriptor.vendor_id,
            product_id = self.descriptor.product_id,
            "device registered"
        );

        match self.mode {
            Mode::Polled => Ok(()),
            Mode::EventDriven => self.run_loop(),
        }
    }

    /// Services one unit of transport I/O, pulling at most one report from the
    /// provider. Polled mode only, to be called in a tight loop.
    pub fn update(&mut self) -> Result<()> {
        self.check(Mode::Polled, "update")?;
        self.service()
    }

    /// Enters the stack's run loop again after it returned. Event-driven mode
    /// only.
    pub fn run(&mut self) -> Result<()> {
        self.check(Mode::EventDriven, "run")?;
        self.run_loop()
    }

    fn run_loop(&mut self) -> Result<()> {
        info!("entering the transport run loop");
        let result = self.service();
        info!(reports = self.reports(), "transport run loop returned");
        result
    }

    fn service(&mut self) -> Result<()> {
        let session = self.session.as_mut().ok_or(Error::NotInitialized)?;
        self.transport.service(session)
    }

    fn check(&self, mode: Mode, operation: &'static str) -> Result<()> {
        if self.mode != mode {
            return Err(Error::WrongMode {
                operation,
                mode: self.mode,
            });
        }
        if self.session.is_none() {
            return Err(Error::NotInitialized);
        }
        Ok(())
    }
}
