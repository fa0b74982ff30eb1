use clap::{ArgEnum, Parser};
use procon::Mode;

/// Emulate a Switch Pro Controller against a simulated console
///
/// Env variables:
///
/// - `RUST_LOG=<level>`:
///
///   -   `trace`: log every report byte sent to the console
///
///   -   `debug`: log every report received by the simulated console
///
/// - `LOG_PRETTY=1`: use a more verbose logging format
///
/// - `LOG_TIMING=1`: show timings
#[derive(Parser)]
pub struct Opts {
    /// Transport to emulate
    #[clap(short, long, arg_enum, default_value = "usb")]
    pub mode: TransportKind,
    /// Where the button and stick state comes from
    #[clap(short, long, arg_enum, default_value = "auto-press")]
    pub source: Source,
    /// Number of reports the console asks for before powering off
    #[clap(short, long, default_value = "1000")]
    pub requests: u32,
    /// Milliseconds between two report requests
    #[clap(short, long, default_value = "8")]
    pub interval_ms: u64,
    /// Milliseconds between two presses of the auto-press source
    #[clap(long, default_value = "5000")]
    pub press_interval_ms: u64,
    /// Milliseconds the auto-press source holds the button
    #[clap(long, default_value = "100")]
    pub press_hold_ms: u64,
    /// Make the console refuse to register the controller
    #[clap(long)]
    pub refuse_registration: bool,
}

#[derive(ArgEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransportKind {
    /// Polled by the application loop
    Usb,
    /// Run loop owned by the stack
    Bluetooth,
}

impl TransportKind {
    pub fn mode(self) -> Mode {
        match self {
            TransportKind::Usb => Mode::Polled,
            TransportKind::Bluetooth => Mode::EventDriven,
        }
    }
}

#[derive(ArgEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum Source {
    /// Press A periodically
    AutoPress,
    /// Simulated N64 controller spinning its stick
    LegacyN64,
    /// Simulated GameCube controller spinning its stick
    LegacyGamecube,
    /// Simulated GPIO buttons, activated one after the other
    Pins,
}
