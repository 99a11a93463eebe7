use crate::{
    bmc::dataset_comparison::Dataset,
    config::{ClockIdentity, ClockQuality, PortIdentity},
};

/// The parts of the PTP DefaultDS (*IEEE1588-2019 section 8.2.1*) that take
/// part in the best master clock algorithm.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceConfig {
    pub clock_identity: ClockIdentity,
    pub priority_1: u8,
    pub priority_2: u8,
    pub clock_quality: ClockQuality,
}

impl InstanceConfig {
    /// The dataset describing this instance as a grandmaster candidate, called
    /// D0 in the standard.
    ///
    /// Steps removed is zero, and both the sender and the receiver are the
    /// instance itself (with port number 0, as no single port is involved).
    pub fn own_dataset(&self) -> Dataset {
        let own_port = PortIdentity {
            clock_identity: self.clock_identity,
            port_number: 0,
        };

        Dataset {
            identity: self.clock_identity,
            priority_1: self.priority_1,
            priority_2: self.priority_2,
            quality: self.clock_quality,
            steps_removed: 0,
            sender: own_port,
            receiver: own_port,
        }
    }
}
