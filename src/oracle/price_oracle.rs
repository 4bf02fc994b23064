//! Cumulative price accumulators and TWAP queries.

use ethnum::U256;
use tracing::debug;

use super::ObservationRing;
use crate::domain::{Amount, Observation, Price, Timestamp};
use crate::error::AmmError;

/// Time-weighted average prices over a window ending at the query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Twap {
    /// Average price of A, quoted in B.
    pub price_a: Price,
    /// Average price of B, quoted in A.
    pub price_b: Price,
    /// Seconds covered by the average; `0` when the spot price was used.
    pub window: u32,
}

/// Time-weighted price oracle fed by reserve updates.
///
/// The pool calls [`accumulate`](Self::accumulate) with its *pre-update*
/// reserves on every reserve change, then
/// [`maybe_record`](Self::maybe_record) to snapshot the accumulators at
/// most once per interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceOracle {
    price_a_cumulative: U256,
    price_b_cumulative: U256,
    last_update: Timestamp,
    ring: ObservationRing,
    interval: u32,
}

impl PriceOracle {
    /// Creates an oracle with empty history.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidConfiguration`] if `capacity` is zero.
    pub fn new(capacity: usize, interval: u32, now: Timestamp) -> Result<Self, AmmError> {
        Ok(Self {
            price_a_cumulative: U256::ZERO,
            price_b_cumulative: U256::ZERO,
            last_update: now,
            ring: ObservationRing::new(capacity)?,
            interval,
        })
    }

    /// Accumulated `price(B per A) × seconds`, wrapping.
    #[must_use]
    pub const fn price_a_cumulative(&self) -> U256 {
        self.price_a_cumulative
    }

    /// Accumulated `price(A per B) × seconds`, wrapping.
    #[must_use]
    pub const fn price_b_cumulative(&self) -> U256 {
        self.price_b_cumulative
    }

    /// Time of the last reserve update.
    #[must_use]
    pub const fn last_update(&self) -> Timestamp {
        self.last_update
    }

    /// Stored snapshots.
    #[must_use]
    pub const fn ring(&self) -> &ObservationRing {
        &self.ring
    }

    /// Advances the accumulators to `now` using the reserves that were in
    /// force since the last update.
    ///
    /// Nothing accrues when no time passed or when either reserve is zero.
    /// `last_update` always moves to `now`.
    pub fn accumulate(&mut self, reserve_a: Amount, reserve_b: Amount, now: Timestamp) {
        let (a, b) = self.cumulatives_at(now, reserve_a, reserve_b);
        self.price_a_cumulative = a;
        self.price_b_cumulative = b;
        self.last_update = now;
    }

    /// Snapshots the accumulators if the ring is empty or at least one
    /// interval has passed since the latest snapshot.
    ///
    /// Returns the physical slot and the stored observation.
    pub fn maybe_record(&mut self, now: Timestamp) -> Option<(usize, Observation)> {
        let due = self
            .ring
            .latest()
            .map_or(true, |latest| now.elapsed_since(latest.timestamp) >= self.interval);
        if !due {
            return None;
        }
        let observation = Observation::new(now, self.price_a_cumulative, self.price_b_cumulative);
        let slot = self.ring.push(observation);
        debug!(slot, timestamp = %now, "observation recorded");
        Some((slot, observation))
    }

    /// Accumulators as they would read if updated at `now` with the given
    /// reserves, without mutating anything.
    #[must_use]
    pub fn cumulatives_at(&self, now: Timestamp, reserve_a: Amount, reserve_b: Amount) -> (U256, U256) {
        let elapsed = now.elapsed_since(self.last_update);
        if elapsed == 0 {
            return (self.price_a_cumulative, self.price_b_cumulative);
        }
        // zero or out-of-range reserves contribute nothing
        match (
            Price::from_ratio(reserve_b, reserve_a),
            Price::from_ratio(reserve_a, reserve_b),
        ) {
            (Ok(price_a), Ok(price_b)) => (
                self.price_a_cumulative.wrapping_add(price_a.times(elapsed)),
                self.price_b_cumulative.wrapping_add(price_b.times(elapsed)),
            ),
            _ => (self.price_a_cumulative, self.price_b_cumulative),
        }
    }

    /// Average prices over roughly the last `seconds_ago` seconds.
    ///
    /// Picks the newest observation taken at or before `now − seconds_ago`
    /// by binary search over chronological order.  When none is that old
    /// the oldest observation is used instead, and an empty history (or a
    /// zero-length window) falls back to the spot price.
    ///
    /// # Errors
    ///
    /// [`AmmError::DivisionByZero`] if the spot price is needed and a
    /// reserve is zero.
    pub fn consult(
        &self,
        now: Timestamp,
        seconds_ago: u32,
        reserve_a: Amount,
        reserve_b: Amount,
    ) -> Result<Twap, AmmError> {
        let Some(observed) = self.observation_before(now, seconds_ago) else {
            return spot(reserve_a, reserve_b);
        };
        let window = now.elapsed_since(observed.timestamp);
        let (cum_a, cum_b) = self.cumulatives_at(now, reserve_a, reserve_b);
        match (
            Price::average(cum_a, observed.price_a_cumulative, window),
            Price::average(cum_b, observed.price_b_cumulative, window),
        ) {
            (Some(price_a), Some(price_b)) => Ok(Twap {
                price_a,
                price_b,
                window,
            }),
            _ => spot(reserve_a, reserve_b),
        }
    }

    fn observation_before(&self, now: Timestamp, seconds_ago: u32) -> Option<&Observation> {
        let age = |logical: usize| {
            self.ring
                .get(logical)
                .map_or(0, |o| now.elapsed_since(o.timestamp))
        };
        // ages shrink from oldest to newest; find the first one too young
        let (mut lo, mut hi) = (0, self.ring.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if age(mid) >= seconds_ago {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        match lo.checked_sub(1) {
            Some(idx) => self.ring.get(idx),
            None => self.ring.oldest(),
        }
    }
}

fn spot(reserve_a: Amount, reserve_b: Amount) -> Result<Twap, AmmError> {
    Ok(Twap {
        price_a: Price::from_ratio(reserve_b, reserve_a)?,
        price_b: Price::from_ratio(reserve_a, reserve_b)?,
        window: 0,
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::RESOLUTION;

    fn oracle(capacity: usize, interval: u32) -> PriceOracle {
        let Ok(o) = PriceOracle::new(capacity, interval, Timestamp::new(0)) else {
            panic!("valid oracle");
        };
        o
    }

    fn q(n: u128) -> U256 {
        U256::from(n) << RESOLUTION
    }

    #[test]
    fn accumulates_pre_update_price() {
        let mut o = oracle(4, 10);
        o.accumulate(Amount::new(10), Amount::new(40), Timestamp::new(5));
        assert_eq!(o.price_a_cumulative(), q(4) * U256::new(5));
        assert_eq!(o.price_b_cumulative(), (q(1) / U256::new(4)) * U256::new(5));
        assert_eq!(o.last_update(), Timestamp::new(5));
    }

    #[test]
    fn zero_reserves_do_not_accrue() {
        let mut o = oracle(4, 10);
        o.accumulate(Amount::ZERO, Amount::new(40), Timestamp::new(5));
        assert_eq!(o.price_a_cumulative(), U256::ZERO);
        assert_eq!(o.last_update(), Timestamp::new(5));
    }

    #[test]
    fn same_timestamp_does_not_accrue() {
        let mut o = oracle(4, 10);
        o.accumulate(Amount::new(1), Amount::new(1), Timestamp::new(0));
        assert_eq!(o.price_a_cumulative(), U256::ZERO);
    }

    #[test]
    fn records_respect_interval() {
        let mut o = oracle(4, 10);
        assert!(o.maybe_record(Timestamp::new(0)).is_some());
        assert!(o.maybe_record(Timestamp::new(9)).is_none());
        assert!(o.maybe_record(Timestamp::new(10)).is_some());
        assert_eq!(o.ring().len(), 2);
    }

    #[test]
    fn interval_survives_timestamp_wrap() {
        let Ok(mut o) = PriceOracle::new(4, 10, Timestamp::new(u32::MAX - 4)) else {
            panic!("valid oracle");
        };
        assert!(o.maybe_record(Timestamp::new(u32::MAX - 4)).is_some());
        assert!(o.maybe_record(Timestamp::new(3)).is_none());
        assert!(o.maybe_record(Timestamp::new(5)).is_some());
    }

    #[test]
    fn consult_empty_history_uses_spot() {
        let o = oracle(4, 10);
        let Ok(twap) = o.consult(Timestamp::new(100), 50, Amount::new(10), Amount::new(20)) else {
            panic!("expected Ok");
        };
        assert_eq!(twap.window, 0);
        assert_eq!(twap.price_a.raw(), q(2));
    }

    #[test]
    fn consult_averages_between_observation_and_now() {
        let mut o = oracle(8, 10);
        o.maybe_record(Timestamp::new(0));
        // price 2 for 100 s, then 4 for 100 s
        o.accumulate(Amount::new(1), Amount::new(2), Timestamp::new(100));
        o.maybe_record(Timestamp::new(100));
        let Ok(twap) = o.consult(Timestamp::new(200), 100, Amount::new(1), Amount::new(4)) else {
            panic!("expected Ok");
        };
        assert_eq!(twap.window, 100);
        assert_eq!(twap.price_a.raw(), q(4));

        let Ok(full) = o.consult(Timestamp::new(200), 200, Amount::new(1), Amount::new(4)) else {
            panic!("expected Ok");
        };
        assert_eq!(full.window, 200);
        assert_eq!(full.price_a.raw(), q(3));
    }

    #[test]
    fn consult_falls_back_to_oldest() {
        let mut o = oracle(8, 10);
        o.accumulate(Amount::ZERO, Amount::ZERO, Timestamp::new(50));
        o.maybe_record(Timestamp::new(50));
        let Ok(twap) = o.consult(Timestamp::new(60), 1_000, Amount::new(1), Amount::new(5)) else {
            panic!("expected Ok");
        };
        assert_eq!(twap.window, 10);
        assert_eq!(twap.price_a.raw(), q(5));
    }

    #[test]
    fn consult_picks_newest_old_enough() {
        let mut o = oracle(8, 10);
        for t in [0u32, 10, 20, 30, 40] {
            o.accumulate(Amount::new(1), Amount::new(1), Timestamp::new(t));
            o.maybe_record(Timestamp::new(t));
        }
        let Ok(twap) = o.consult(Timestamp::new(45), 12, Amount::new(1), Amount::new(1)) else {
            panic!("expected Ok");
        };
        // newest with age >= 12 is t = 30
        assert_eq!(twap.window, 15);
    }

    #[test]
    fn cumulatives_at_is_counterfactual() {
        let o = oracle(4, 10);
        let (a, _) = o.cumulatives_at(Timestamp::new(3), Amount::new(2), Amount::new(6));
        assert_eq!(a, q(3) * U256::new(3));
        assert_eq!(o.price_a_cumulative(), U256::ZERO);
    }
}
