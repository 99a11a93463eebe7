//! Common data structures that are used throughout the protocol

mod clock_accuracy;
mod clock_identity;
mod clock_quality;
mod port_identity;

pub use clock_accuracy::*;
pub use clock_identity::*;
pub use clock_quality::*;
pub use port_identity::*;
