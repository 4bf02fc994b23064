//! Static stable/major allow-list.

use std::collections::HashMap;

use crate::domain::{Address, AssetClass};
use crate::traits::AssetClassifier;

/// Asset identity → [`AssetClass`] table supplied at construction.
///
/// # Examples
///
/// ```
/// use adaptive_cpamm::config::AssetTable;
/// use adaptive_cpamm::domain::{Address, AssetClass};
/// use adaptive_cpamm::traits::AssetClassifier;
///
/// let usdc = Address::from_bytes([1u8; 32]);
/// let table = AssetTable::new().with_stable(usdc);
/// assert_eq!(table.classify(&usdc), AssetClass::Stable);
/// assert_eq!(table.classify(&Address::from_bytes([9u8; 32])), AssetClass::Other);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssetTable {
    classes: HashMap<Address, AssetClass>,
}

impl AssetTable {
    /// Empty table: every asset classifies as [`AssetClass::Other`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stable asset.
    #[must_use]
    pub fn with_stable(mut self, asset: Address) -> Self {
        self.classes.insert(asset, AssetClass::Stable);
        self
    }

    /// Adds a major asset.
    #[must_use]
    pub fn with_major(mut self, asset: Address) -> Self {
        self.classes.insert(asset, AssetClass::Major);
        self
    }

    /// Sets the class of `asset`, returning the previous one.
    pub fn insert(&mut self, asset: Address, class: AssetClass) -> Option<AssetClass> {
        self.classes.insert(asset, class)
    }

    /// Number of classified assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` if no asset is classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl AssetClassifier for AssetTable {
    fn classify(&self, asset: &Address) -> AssetClass {
        self.classes.get(asset).copied().unwrap_or_default()
    }
}
