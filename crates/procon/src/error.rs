use crate::{legacy::ControllerKind, transport::Mode};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The transport stack refused to register or advertise the device.
    #[error("transport stack failed to register the device")]
    TransportInit(#[source] anyhow::Error),
    #[error("{kind} controller failed to initialize")]
    LegacyDecoderUnavailable {
        kind: ControllerKind,
        #[source]
        source: anyhow::Error,
    },
    #[error("transport communication error")]
    Transport(#[source] anyhow::Error),
    #[error("`{operation}` is not available in {mode} mode")]
    WrongMode {
        operation: &'static str,
        mode: Mode,
    },
    #[error("the device is not initialized")]
    NotInitialized,
    #[error("the device is already initialized")]
    AlreadyInitialized,
}
