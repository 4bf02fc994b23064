//! Lookup seam for asset classification.

use crate::domain::{Address, AssetClass};

/// Maps an asset to the class used for fee tier selection.
///
/// Classification is an allow-list lookup supplied by the deployment; it
/// is never derived from on-chain behaviour.  See
/// [`AssetTable`](crate::config::AssetTable) for the static table.
pub trait AssetClassifier {
    /// Class of `asset`; unknown assets are [`AssetClass::Other`].
    fn classify(&self, asset: &Address) -> AssetClass;
}
