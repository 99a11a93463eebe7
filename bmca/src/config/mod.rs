//! Configuration of the local PTP instance and its ports, as far as the best
//! master clock algorithm needs it.

mod instance;
mod port;

pub use instance::InstanceConfig;
pub use port::{BmcaMode, PortConfig};

pub use crate::datastructures::common::{ClockAccuracy, ClockIdentity, ClockQuality, PortIdentity};
