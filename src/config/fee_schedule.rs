//! Fee tiers selected by the classifier and the volatility thresholds
//! that separate them.

use crate::domain::{FeeTier, VolatilityScore};
use crate::error::AmmError;

/// Fee tier for each classifier outcome.
///
/// # Defaults
///
/// | Outcome | Tier |
/// |---------|------|
/// | stable / stable | 0.01% |
/// | stable / major | 0.05% |
/// | volatility ≤ 30 | 0.30% |
/// | 30 < volatility ≤ 50 | 0.50% |
/// | volatility > 50 | 1.00% |
///
/// Thresholds are strict: a score equal to a threshold stays in the lower
/// band.  Pools start at volatility 30, which therefore lands in the low
/// band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeSchedule {
    stable_pair: FeeTier,
    stable_major: FeeTier,
    low: FeeTier,
    medium: FeeTier,
    high: FeeTier,
    medium_threshold: VolatilityScore,
    high_threshold: VolatilityScore,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            stable_pair: FeeTier::TIER_0_01_PERCENT,
            stable_major: FeeTier::TIER_0_05_PERCENT,
            low: FeeTier::TIER_0_30_PERCENT,
            medium: FeeTier::TIER_0_50_PERCENT,
            high: FeeTier::TIER_1_00_PERCENT,
            medium_threshold: VolatilityScore::new(30),
            high_threshold: VolatilityScore::new(50),
        }
    }
}

impl FeeSchedule {
    /// Creates a schedule.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn new(
        stable_pair: FeeTier,
        stable_major: FeeTier,
        volatility_tiers: [FeeTier; 3],
        medium_threshold: VolatilityScore,
        high_threshold: VolatilityScore,
    ) -> Result<Self, AmmError> {
        let [low, medium, high] = volatility_tiers;
        let schedule = Self {
            stable_pair,
            stable_major,
            low,
            medium,
            high,
            medium_threshold,
            high_threshold,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Validates the schedule.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if any tier is 100% or
    /// more, or if the thresholds are not strictly ascending.
    pub fn validate(&self) -> Result<(), AmmError> {
        let tiers = [
            self.stable_pair,
            self.stable_major,
            self.low,
            self.medium,
            self.high,
        ];
        if tiers.iter().any(|t| t.basis_points().complement() == 0) {
            return Err(AmmError::InvalidConfiguration("fee tier must be below 100%"));
        }
        if self.medium_threshold >= self.high_threshold {
            return Err(AmmError::InvalidConfiguration(
                "volatility thresholds must be strictly ascending",
            ));
        }
        Ok(())
    }

    /// Tier for a pair of two stable assets.
    #[must_use]
    pub const fn stable_pair(&self) -> FeeTier {
        self.stable_pair
    }

    /// Tier for a stable asset paired with a major asset.
    #[must_use]
    pub const fn stable_major(&self) -> FeeTier {
        self.stable_major
    }

    /// Tier chosen purely from a volatility score.
    #[must_use]
    pub fn for_volatility(&self, volatility: VolatilityScore) -> FeeTier {
        if volatility > self.high_threshold {
            self.high
        } else if volatility > self.medium_threshold {
            self.medium
        } else {
            self.low
        }
    }
}
