//! States a PTP port can be in.

mod state;

pub use state::PortState;
