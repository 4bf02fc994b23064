//! Oracle snapshots.

use ethnum::U256;

use super::Timestamp;

/// Cumulative price accumulators captured at a point in time.
///
/// Two observations bracket a window; the difference of their cumulatives
/// divided by the elapsed seconds is the time-weighted average price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Observation {
    /// When the snapshot was taken.
    pub timestamp: Timestamp,
    /// Σ price(B per A) × dt, UQ112.112, wrapping.
    pub price_a_cumulative: U256,
    /// Σ price(A per B) × dt, UQ112.112, wrapping.
    pub price_b_cumulative: U256,
}

impl Observation {
    /// Creates a snapshot.
    #[must_use]
    pub const fn new(timestamp: Timestamp, price_a_cumulative: U256, price_b_cumulative: U256) -> Self {
        Self {
            timestamp,
            price_a_cumulative,
            price_b_cumulative,
        }
    }
}
