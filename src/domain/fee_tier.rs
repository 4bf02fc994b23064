//! Swap fee tiers built on [`BasisPoints`].

use core::fmt;

use super::{BasisPoints, BPS_DENOMINATOR};

/// The basis-point fee currently charged on swap inputs.
///
/// The classifier only ever selects one of the five presets below, but any
/// [`BasisPoints`] value up to 100% is representable so deployments can
/// configure their own [`FeeSchedule`](crate::config::FeeSchedule).
///
/// # Examples
///
/// ```
/// use adaptive_cpamm::domain::FeeTier;
///
/// let tier = FeeTier::TIER_0_30_PERCENT;
/// assert_eq!(tier.rate(), 30);
/// assert_eq!(tier.denominator(), 10_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// 0.01% — two stable assets.
    pub const TIER_0_01_PERCENT: Self = Self(BasisPoints::new(1));

    /// 0.05% — a stable asset against a major asset.
    pub const TIER_0_05_PERCENT: Self = Self(BasisPoints::new(5));

    /// 0.30% — volatile pair in calm conditions.
    pub const TIER_0_30_PERCENT: Self = Self(BasisPoints::new(30));

    /// 0.50% — volatile pair under moderate volatility.
    pub const TIER_0_50_PERCENT: Self = Self(BasisPoints::new(50));

    /// 1.00% — volatile pair under high volatility.
    pub const TIER_1_00_PERCENT: Self = Self(BasisPoints::new(100));

    /// Creates a tier from arbitrary basis points.
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Returns the underlying [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Fee rate `f` in parts per [`denominator`](Self::denominator).
    #[must_use]
    pub const fn rate(&self) -> u32 {
        self.0.get()
    }

    /// Fee denominator `D`.
    #[must_use]
    pub const fn denominator(&self) -> u32 {
        BPS_DENOMINATOR
    }

    /// Returns `true` if this tier is one of the five presets.
    #[must_use]
    pub const fn is_standard(&self) -> bool {
        matches!(self.0.get(), 1 | 5 | 30 | 50 | 100)
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}
