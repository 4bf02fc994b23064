//! Wrapping 32-bit timestamps.

use core::fmt;

/// Caller-supplied time in seconds, truncated to 32 bits.
///
/// Pools never read a clock: every operation receives the current
/// timestamp from its caller.  Time only moves forward, but the 32-bit
/// value wraps roughly every 136 years, so elapsed time is always computed
/// with modular subtraction.
///
/// # Examples
///
/// ```
/// use adaptive_cpamm::domain::Timestamp;
///
/// let before = Timestamp::new(u32::MAX - 9);
/// let after = Timestamp::new(5);
/// assert_eq!(after.elapsed_since(before), 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(u32);

impl Timestamp {
    /// Creates a timestamp from a raw 32-bit value.
    #[must_use]
    pub const fn new(secs: u32) -> Self {
        Self(secs)
    }

    /// Truncates a 64-bit unix time to 32 bits.
    #[must_use]
    pub const fn from_unix(secs: u64) -> Self {
        Self((secs % (1u64 << 32)) as u32)
    }

    /// Returns the raw 32-bit value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Seconds elapsed since `earlier`, modulo 2^32.
    #[must_use]
    pub const fn elapsed_since(&self, earlier: Self) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// The timestamp `secs` seconds later, wrapping.
    #[must_use]
    pub const fn add_secs(&self, secs: u32) -> Self {
        Self(self.0.wrapping_add(secs))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}
