//! Bounded volatility score.

use core::fmt;

/// Volatility score in `0..=100`.
///
/// Higher scores select higher fee tiers for pairs that are not
/// classified as stable.
///
/// # Examples
///
/// ```
/// use adaptive_cpamm::domain::VolatilityScore;
///
/// assert_eq!(VolatilityScore::new(250).get(), 100);
/// assert_eq!(VolatilityScore::new(42).distance(VolatilityScore::new(30)), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolatilityScore(u8);

impl VolatilityScore {
    /// Upper bound of the score.
    pub const MAX: Self = Self(100);

    /// Creates a score, clamping to `0..=100`.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        if value > 100 {
            Self(100)
        } else {
            Self(value)
        }
    }

    /// Returns the raw score.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Absolute difference between two scores.
    #[must_use]
    pub const fn distance(&self, other: Self) -> u8 {
        self.0.abs_diff(other.0)
    }
}

impl fmt::Display for VolatilityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
