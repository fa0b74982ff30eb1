//! Emulates a Switch Pro Controller on top of a USB or Bluetooth HID stack.
//!
//! Implement [`InputProvider`] (or wrap a legacy controller in a
//! [`ControllerAdapter`]), then hand it to a [`Dispatcher`] together with the
//! stack.

mod dispatcher;
mod error;
pub mod legacy;
mod provider;
pub mod providers;
pub mod transport;

pub use dispatcher::Dispatcher;
pub use error::*;
pub use legacy::{ControllerAdapter, ControllerKind, LegacyController, LegacyDecoder};
pub use procon_sys;
pub use provider::InputProvider;
pub use transport::{EventStack, HostCallbacks, HostRequest, Mode, PolledStack};
