//! Static asset classification used by the fee tier classifier.

/// How an asset is treated when choosing a fee tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AssetClass {
    /// Pegged asset (stablecoin).
    Stable,
    /// Deep, widely held asset (e.g. the chain's native asset).
    Major,
    /// Anything not on the allow-list.
    #[default]
    Other,
}
