//! UQ112.112 fixed-point exchange rate.

use core::fmt;

use ethnum::U256;

use super::Amount;
use crate::error::AmmError;

/// Number of fractional bits in a [`Price`].
pub const RESOLUTION: u32 = 112;

/// Exchange rate as an unsigned UQ112.112 fixed-point number.
///
/// `Price::from_ratio(quote, base)` is the amount of `quote` paid for one
/// unit of `base`.  With both reserves bounded to 112 bits, every ratio is
/// exactly representable in 224 bits, and a price multiplied by a `u32`
/// elapsed time still fits a `U256`.
///
/// # Examples
///
/// ```
/// use adaptive_cpamm::domain::{Amount, Price};
///
/// let price = Price::from_ratio(Amount::new(10), Amount::new(4)).expect("non-zero base");
/// assert_eq!(price.to_string(), "2.500000");
/// assert_eq!(price.quote(Amount::new(8)), Some(Amount::new(20)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Price(U256);

impl Price {
    /// Zero price.
    pub const ZERO: Self = Self(U256::ZERO);

    /// Wraps a raw UQ112.112 value.
    #[must_use]
    pub const fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// Returns the raw UQ112.112 value.
    #[must_use]
    pub const fn raw(&self) -> U256 {
        self.0
    }

    /// Computes `quote / base`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::DivisionByZero`] if `base` is zero.
    /// - [`AmmError::ReserveOverflow`] if either side exceeds 112 bits.
    pub fn from_ratio(quote: Amount, base: Amount) -> crate::error::Result<Self> {
        if !quote.fits_reserve() || !base.fits_reserve() {
            return Err(AmmError::ReserveOverflow {
                balance_a: base,
                balance_b: quote,
            });
        }
        if base.is_zero() {
            return Err(AmmError::DivisionByZero);
        }
        Ok(Self((quote.widen() << RESOLUTION) / base.widen()))
    }

    /// Time-weighted average between two cumulative snapshots.
    ///
    /// Both cumulatives wrap modulo 2^256, so only their difference is
    /// meaningful.  Returns `None` for a zero interval.
    #[must_use]
    pub fn average(cumulative_now: U256, cumulative_then: U256, elapsed: u32) -> Option<Self> {
        if elapsed == 0 {
            return None;
        }
        let delta = cumulative_now.wrapping_sub(cumulative_then);
        Some(Self(delta / U256::from(elapsed)))
    }

    /// `price × elapsed`, the contribution to a cumulative accumulator.
    #[must_use]
    pub fn times(&self, elapsed: u32) -> U256 {
        self.0.wrapping_mul(U256::from(elapsed))
    }

    /// Converts `amount` of the base asset into the quote asset, rounding
    /// down.  `None` if the result exceeds `u128`.
    #[must_use]
    pub fn quote(&self, amount: Amount) -> Option<Amount> {
        let product = self.0.checked_mul(amount.widen())?;
        Amount::from_wide(product >> RESOLUTION)
    }

    /// Absolute change from `reference` in whole percent, rounded down.
    ///
    /// A zero reference yields zero: there is no baseline to move from.
    #[must_use]
    pub fn percent_change_from(&self, reference: &Self) -> u32 {
        if reference.0 == U256::ZERO {
            return 0;
        }
        let diff = if self.0 >= reference.0 {
            self.0 - reference.0
        } else {
            reference.0 - self.0
        };
        let pct = diff.saturating_mul(U256::new(100)) / reference.0;
        if pct > U256::from(u32::MAX) {
            u32::MAX
        } else {
            pct.as_u32()
        }
    }
}

impl fmt::Display for Price {
    /// Decimal rendering with six fractional digits, truncated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let int = self.0 >> RESOLUTION;
        let mask = (U256::ONE << RESOLUTION) - U256::ONE;
        let frac = ((self.0 & mask) * U256::new(1_000_000)) >> RESOLUTION;
        write!(f, "{int}.{:06}", frac.as_u32())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn price(q: u128, b: u128) -> Price {
        let Ok(p) = Price::from_ratio(Amount::new(q), Amount::new(b)) else {
            panic!("valid ratio");
        };
        p
    }

    #[test]
    fn ratio_is_exact_for_integers() {
        assert_eq!(price(4, 1).raw(), U256::new(4) << RESOLUTION);
    }

    #[test]
    fn zero_base_rejected() {
        let result = Price::from_ratio(Amount::new(1), Amount::ZERO);
        assert_eq!(result, Err(AmmError::DivisionByZero));
    }

    #[test]
    fn oversized_reserve_rejected() {
        let result = Price::from_ratio(Amount::new(u128::MAX), Amount::new(1));
        assert!(matches!(result, Err(AmmError::ReserveOverflow { .. })));
    }

    #[test]
    fn average_over_interval() {
        let p = price(3, 1);
        let then = U256::new(17);
        let now = then.wrapping_add(p.times(600));
        assert_eq!(Price::average(now, then, 600), Some(p));
        assert_eq!(Price::average(now, then, 0), None);
    }

    #[test]
    fn average_survives_wraparound() {
        let p = price(2, 1);
        let then = U256::MAX - U256::new(5);
        let now = then.wrapping_add(p.times(10));
        assert!(now < then);
        assert_eq!(Price::average(now, then, 10), Some(p));
    }

    #[test]
    fn percent_change_both_directions() {
        let base = price(100, 1);
        assert_eq!(price(110, 1).percent_change_from(&base), 10);
        assert_eq!(price(75, 1).percent_change_from(&base), 25);
        assert_eq!(base.percent_change_from(&Price::ZERO), 0);
    }

    #[test]
    fn quote_converts_amounts() {
        assert_eq!(price(1, 2).quote(Amount::new(9)), Some(Amount::new(4)));
    }

    #[test]
    fn display_fraction() {
        assert_eq!(price(1, 3).to_string(), "0.333333");
        assert_eq!(price(4, 1).to_string(), "4.000000");
    }
}
