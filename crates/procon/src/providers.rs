//! Ready-made input providers.

mod auto_press;
mod pins;

pub use auto_press::*;
pub use pins::*;
