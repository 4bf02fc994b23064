//! Canonically ordered pair of distinct assets.

use core::fmt;

use super::Address;
use crate::error::AmmError;

/// Which side of an [`AssetPair`] an asset sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The lower address.
    A,
    /// The higher address.
    B,
}

/// An ordered pair of distinct, non-null assets, sorted by address.
///
/// Sorting guarantees that `(x, y)` and `(y, x)` produce the same pair, so
/// a registry keyed on `AssetPair` holds exactly one pool per pair.
///
/// # Examples
///
/// ```
/// use adaptive_cpamm::domain::{Address, AssetPair};
///
/// let x = Address::from_bytes([1u8; 32]);
/// let y = Address::from_bytes([2u8; 32]);
///
/// let pair = AssetPair::new(y, x).expect("distinct assets");
/// assert_eq!(pair.asset_a(), x);
/// assert_eq!(pair.asset_b(), y);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssetPair {
    asset_a: Address,
    asset_b: Address,
}

impl AssetPair {
    /// Creates a canonically ordered pair.
    ///
    /// # Errors
    ///
    /// - [`AmmError::IdenticalAssets`] if both addresses are equal.
    /// - [`AmmError::NullAsset`] if either address is all zeros.
    pub fn new(x: Address, y: Address) -> Result<Self, AmmError> {
        if x == y {
            return Err(AmmError::IdenticalAssets(x));
        }
        let (asset_a, asset_b) = if x < y { (x, y) } else { (y, x) };
        if asset_a.is_zero() {
            return Err(AmmError::NullAsset);
        }
        Ok(Self { asset_a, asset_b })
    }

    /// The asset with the lower address.
    #[must_use]
    pub const fn asset_a(&self) -> Address {
        self.asset_a
    }

    /// The asset with the higher address.
    #[must_use]
    pub const fn asset_b(&self) -> Address {
        self.asset_b
    }

    /// Returns `true` if `asset` is one of the pair.
    #[must_use]
    pub fn contains(&self, asset: &Address) -> bool {
        self.asset_a == *asset || self.asset_b == *asset
    }

    /// Locates `asset` within the pair.
    #[must_use]
    pub fn side_of(&self, asset: &Address) -> Option<Side> {
        if *asset == self.asset_a {
            Some(Side::A)
        } else if *asset == self.asset_b {
            Some(Side::B)
        } else {
            None
        }
    }
}

impl fmt::Display for AssetPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.asset_a, self.asset_b)
    }
}
