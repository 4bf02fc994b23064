//! Liquidity share quantities.

use core::fmt;

use ethnum::U256;

/// A quantity of fungible pool shares.
///
/// Distinct from [`Amount`](super::Amount): shares measure proportional
/// ownership of both reserves, not a quantity of either asset.
///
/// # Examples
///
/// ```
/// use adaptive_cpamm::domain::Shares;
///
/// let a = Shares::new(1_000);
/// assert_eq!(a.checked_add(&Shares::new(24)), Some(Shares::new(1_024)));
/// assert_eq!(a.checked_sub(&Shares::new(2_000)), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Shares(u128);

impl Shares {
    /// Zero shares.
    pub const ZERO: Self = Self(0);

    /// Creates a share quantity from a raw value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Widens to a `U256`.
    #[must_use]
    pub fn widen(&self) -> U256 {
        U256::from(self.0)
    }

    /// Narrows a `U256`, `None` if it exceeds `u128`.
    pub fn from_wide(value: U256) -> Option<Self> {
        if value > U256::from(u128::MAX) {
            None
        } else {
            Some(Self(value.as_u128()))
        }
    }

    /// Checked addition.
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction.
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl fmt::Display for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
