use super::clock_accuracy::ClockAccuracy;

/// A description of the accuracy and type of a clock.
///
/// For all three fields a lower value means a better clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockQuality {
    /// The PTP clock class.
    ///
    /// Per the standard, 248 is the default and a good option for most use
    /// cases. For grandmaster clocks, this should be below 128 to ensure the
    /// clock never takes time from another source. A value of 255 should be
    /// used for clocks that never act as a master.
    pub clock_class: u8,

    /// The accuracy of the clock
    pub clock_accuracy: ClockAccuracy,

    /// 2-log of the variance (in seconds^2) of the clock when not
    /// synchronized. See *IEEE1588-2019 section 7.6.3.5* for more details.
    pub offset_scaled_log_variance: u16,
}

impl ClockQuality {
    /// Highest clock class of a clock that is a primary, traceable reference.
    ///
    /// Clocks up to this class never synchronize to another clock, see
    /// *IEEE1588-2019 section 9.3.3*.
    pub const MAX_PRIMARY_CLOCK_CLASS: u8 = 127;

    /// Returns whether the clock is a primary reference that should never
    /// follow another clock.
    pub fn is_primary_reference(&self) -> bool {
        self.clock_class <= Self::MAX_PRIMARY_CLOCK_CLASS
    }
}

impl Default for ClockQuality {
    fn default() -> Self {
        Self {
            clock_class: 248,
            clock_accuracy: ClockAccuracy::UNKNOWN,
            offset_scaled_log_variance: 0xffff,
        }
    }
}
