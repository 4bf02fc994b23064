//! Mapping from observed price movement to a volatility score.

use crate::domain::VolatilityScore;

/// Score for an absolute price change of `percent` whole percent.
///
/// | Change | Score |
/// |--------|-------|
/// | ≥ 20 % | 80 |
/// | ≥ 10 % | 60 |
/// | ≥ 5 % | 40 |
/// | ≥ 2 % | 20 |
/// | otherwise | 10 |
#[must_use]
pub const fn score_from_change(percent: u32) -> VolatilityScore {
    let score = if percent >= 20 {
        80
    } else if percent >= 10 {
        60
    } else if percent >= 5 {
        40
    } else if percent >= 2 {
        20
    } else {
        10
    };
    VolatilityScore::new(score)
}

/// Applies the hysteresis margin: `Some(candidate)` only when it differs
/// from `current` by strictly more than `margin` points.
#[must_use]
pub const fn damped(
    current: VolatilityScore,
    candidate: VolatilityScore,
    margin: u8,
) -> Option<VolatilityScore> {
    if current.distance(candidate) > margin {
        Some(candidate)
    } else {
        None
    }
}
