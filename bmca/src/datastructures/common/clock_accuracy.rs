/// How accurate the underlying clock device is expected to be when not
/// synchronized.
///
/// This is the raw `clockAccuracy` value of *IEEE1588-2019 table 5*. Any
/// value can be represented, including reserved and profile specific ones,
/// since the dataset comparison algorithm orders them numerically no matter
/// what they mean. Lower values are more accurate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ClockAccuracy(pub u8);

impl ClockAccuracy {
    /// Accurate within 1 ps
    pub const PS1: Self = Self(0x17);
    /// Accurate within 2.5 ps
    pub const PS2_5: Self = Self(0x18);
    /// Accurate within 10 ps
    pub const PS10: Self = Self(0x19);
    /// Accurate within 25 ps
    pub const PS25: Self = Self(0x1a);
    /// Accurate within 100 ps
    pub const PS100: Self = Self(0x1b);
    /// Accurate within 250 ps
    pub const PS250: Self = Self(0x1c);
    /// Accurate within 1 ns
    pub const NS1: Self = Self(0x1d);
    /// Accurate within 2.5 ns
    pub const NS2_5: Self = Self(0x1e);
    /// Accurate within 10 ns
    pub const NS10: Self = Self(0x1f);
    /// Accurate within 25 ns
    pub const NS25: Self = Self(0x20);
    /// Accurate within 100 ns
    pub const NS100: Self = Self(0x21);
    /// Accurate within 250 ns
    pub const NS250: Self = Self(0x22);
    /// Accurate within 1 us
    pub const US1: Self = Self(0x23);
    /// Accurate within 2.5 us
    pub const US2_5: Self = Self(0x24);
    /// Accurate within 10 us
    pub const US10: Self = Self(0x25);
    /// Accurate within 25 us
    pub const US25: Self = Self(0x26);
    /// Accurate within 100 us
    pub const US100: Self = Self(0x27);
    /// Accurate within 250 us
    pub const US250: Self = Self(0x28);
    /// Accurate within 1 ms
    pub const MS1: Self = Self(0x29);
    /// Accurate within 2.5 ms
    pub const MS2_5: Self = Self(0x2a);
    /// Accurate within 10 ms
    pub const MS10: Self = Self(0x2b);
    /// Accurate within 25 ms
    pub const MS25: Self = Self(0x2c);
    /// Accurate within 100 ms
    pub const MS100: Self = Self(0x2d);
    /// Accurate within 250 ms
    pub const MS250: Self = Self(0x2e);
    /// Accurate within 1 s
    pub const S1: Self = Self(0x2f);
    /// Accurate within 10 s
    pub const S10: Self = Self(0x30);
    /// Accurate within >10 s
    pub const SGT10: Self = Self(0x31);
    /// Accuracy is unknown
    pub const UNKNOWN: Self = Self(0xfe);
}

impl Default for ClockAccuracy {
    fn default() -> Self {
        Self::UNKNOWN
    }
}
