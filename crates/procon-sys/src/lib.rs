//! Wire format of the reports a Switch Pro Controller sends to the console.
//!
//! The main struct is [Report](input/struct.Report.html). Buttons are set
//! through [Button](input/enum.Button.html) on the raw 3-byte array, sticks are
//! packed with [Stick](input/struct.Stick.html).

#[macro_use]
extern crate num_derive;

pub mod common;
pub mod input;

pub use common::*;
pub use input::{Button, Report, Stick};
