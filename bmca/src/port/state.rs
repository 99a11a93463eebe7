use core::fmt::{Display, Formatter};

/// The state of a PTP port, see *IEEE1588-2019 section 9.2.5*.
///
/// Only [`Listening`](Self::Listening), [`GrandMaster`](Self::GrandMaster),
/// [`Master`](Self::Master), [`Passive`](Self::Passive) and
/// [`Slave`](Self::Slave) are ever recommended by the state decision. The
/// other states belong to the state machine of the port itself, and are only
/// passed through when the decision leaves the state unchanged.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PortState {
    #[default]
    Initializing,
    Faulty,
    Disabled,
    Listening,
    PreMaster,
    Master,
    /// Master on behalf of the local clock, which is the grandmaster
    GrandMaster,
    Passive,
    Uncalibrated,
    Slave,
}

impl Display for PortState {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            PortState::Initializing => write!(f, "Initializing"),
            PortState::Faulty => write!(f, "Faulty"),
            PortState::Disabled => write!(f, "Disabled"),
            PortState::Listening => write!(f, "Listening"),
            PortState::PreMaster => write!(f, "PreMaster"),
            PortState::Master => write!(f, "Master"),
            PortState::GrandMaster => write!(f, "GrandMaster"),
            PortState::Passive => write!(f, "Passive"),
            PortState::Uncalibrated => write!(f, "Uncalibrated"),
            PortState::Slave => write!(f, "Slave"),
        }
    }
}
