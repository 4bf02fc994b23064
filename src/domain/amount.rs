//! Raw asset amount with checked arithmetic and the reserve bit bound.

use core::fmt;

use ethnum::U256;

use super::Rounding;

/// Largest value a reserve may hold: `2^112 − 1`.
///
/// Two bounded reserves multiply to at most 224 bits, which leaves room in
/// a `U256` for the `D²` fee scaling of the swap invariant check.
pub const MAX_RESERVE: u128 = (1u128 << 112) - 1;

/// A raw asset amount in the smallest unit.
///
/// All `u128` values are valid amounts; reserves additionally have to pass
/// [`fits_reserve`](Self::fits_reserve).  Arithmetic is checked and returns
/// `None` instead of panicking.
///
/// # Examples
///
/// ```
/// use adaptive_cpamm::domain::{Amount, Rounding};
///
/// let a = Amount::new(7);
/// let b = Amount::new(2);
/// assert_eq!(a.checked_div(&b, Rounding::Up), Some(Amount::new(4)));
/// assert!(a.fits_reserve());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Largest amount a reserve can hold.
    pub const MAX_RESERVE: Self = Self(MAX_RESERVE);

    /// Creates a new `Amount` from a raw `u128` value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying `u128` value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount fits the 112-bit reserve bound.
    #[must_use]
    pub const fn fits_reserve(&self) -> bool {
        self.0 <= MAX_RESERVE
    }

    /// Widens to a `U256` for product computations.
    #[must_use]
    pub fn widen(&self) -> U256 {
        U256::from(self.0)
    }

    /// Narrows a `U256` back to an amount, `None` if it does not fit.
    pub fn from_wide(value: U256) -> Option<Self> {
        if value > U256::from(u128::MAX) {
            None
        } else {
            Some(Self(value.as_u128()))
        }
    }

    /// Checked addition. Returns `None` on overflow.
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Subtraction clamped at zero.
    ///
    /// Used to infer net inputs from balance deltas, where a balance below
    /// the expected level simply means nothing was paid in.
    pub const fn saturating_sub(&self, other: &Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Checked multiplication. Returns `None` on overflow.
    pub const fn checked_mul(&self, other: &Self) -> Option<Self> {
        match self.0.checked_mul(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked division with explicit rounding direction.
    ///
    /// Returns `None` if `divisor` is zero.
    pub const fn checked_div(&self, divisor: &Self, rounding: Rounding) -> Option<Self> {
        if divisor.0 == 0 {
            return None;
        }
        let q = self.0 / divisor.0;
        match rounding {
            Rounding::Down => Some(Self(q)),
            Rounding::Up => {
                if self.0 % divisor.0 == 0 {
                    Some(Self(q))
                } else {
                    // q < u128::MAX whenever a remainder exists
                    Some(Self(q + 1))
                }
            }
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
