use super::clock_identity::ClockIdentity;

/// Identity of a single port of a PTP instance.
///
/// The derived ordering compares the [`ClockIdentity`] first and only looks at
/// the port number when the clock identities are equal. This is the ordering
/// the topology part of the dataset comparison relies on.
///
/// For more details, see *IEEE1588-2019 section 7.5.2.3*.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortIdentity {
    /// Identity of the clock this port belongs to
    pub clock_identity: ClockIdentity,
    /// Index of the port within its clock, starting at 1
    pub port_number: u16,
}

impl core::fmt::Display for PortIdentity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}-{}", self.clock_identity, self.port_number)
    }
}
