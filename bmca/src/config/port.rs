use crate::config::{ClockIdentity, PortIdentity};

/// Whether a port takes part in the standard state decision.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BmcaMode {
    /// The port state follows the state decision algorithm.
    #[default]
    Enabled,
    /// The port has a statically configured role. As long as nothing is heard
    /// on the port, the state decision leaves its state alone.
    Disabled,
}

/// Configuration items of the PTP PortDS dataset that are relevant to the best
/// master clock algorithm.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortConfig {
    /// Number of the port within the instance, starting at 1
    pub port_number: u16,

    /// See [`BmcaMode`]
    pub bmca_mode: BmcaMode,
}

impl PortConfig {
    /// Identity of this port on the instance with identity `clock_identity`
    pub fn port_identity(&self, clock_identity: ClockIdentity) -> PortIdentity {
        PortIdentity {
            clock_identity,
            port_number: self.port_number,
        }
    }
}
