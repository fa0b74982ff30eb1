mod opts;
mod sim;

use anyhow::Context;
use clap::Parser;
use opts::{Opts, Source};
use procon::{
    providers::{AutoPress, AutoPressConfig, PinInputs, PinMap},
    ControllerAdapter, Dispatcher, InputProvider, LegacyController, Mode,
};
use sim::{Power, SimulatedHost, SpinningDecoder, SweepingPins};
use std::{thread::sleep, time::Duration};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let opts = Opts::parse();

    let (host, power) = SimulatedHost::new(
        opts.requests,
        Duration::from_millis(opts.interval_ms),
        opts.refuse_registration,
    );

    match opts.source {
        Source::AutoPress => {
            let mut provider = AutoPress::new(AutoPressConfig {
                interval: Duration::from_millis(opts.press_interval_ms),
                hold: Duration::from_millis(opts.press_hold_ms),
                ..AutoPressConfig::default()
            });
            run(&opts, &mut provider, host, power)
        }
        Source::LegacyN64 => {
            let mut controller = LegacyController::n64(SpinningDecoder::default());
            let mut adapter = ControllerAdapter::attach(&mut controller)?;
            run(&opts, &mut adapter, host, power)
        }
        Source::LegacyGamecube => {
            let mut controller = LegacyController::gamecube(SpinningDecoder::default());
            let mut adapter = ControllerAdapter::attach(&mut controller)?;
            run(&opts, &mut adapter, host, power)
        }
        Source::Pins => {
            let mut provider = PinInputs::new(SweepingPins::default(), PinMap::default());
            run(&opts, &mut provider, host, power)
        }
    }
}

fn run(
    opts: &Opts,
    provider: &mut dyn InputProvider,
    host: SimulatedHost,
    power: Power,
) -> anyhow::Result<()> {
    let mut dispatcher = match opts.mode.mode() {
        Mode::Polled => Dispatcher::polled(provider, host),
        Mode::EventDriven => Dispatcher::event_driven(provider, host),
    };

    // In event-driven mode this only returns once the console is off.
    dispatcher.init().context("initializing the controller")?;

    if dispatcher.mode() == Mode::Polled {
        while power.is_on() {
            dispatcher.update()?;
            sleep(Duration::from_micros(200));
        }
    }

    info!(reports = dispatcher.reports(), "done");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let pretty = std::env::var_os("LOG_PRETTY").is_some();
    let timing = std::env::var_os("LOG_TIMING").is_some();
    match (pretty, timing) {
        (true, true) => builder.pretty().init(),
        (true, false) => builder.pretty().without_time().init(),
        (false, true) => builder.init(),
        (false, false) => builder.without_time().init(),
    }
}
