//! Seams between the pool and its collaborators.
//!
//! - [`AssetLedger`] — external asset balances and transfers.
//! - [`AssetClassifier`] — stable/major allow-list lookup.
//! - [`FlashBorrower`] — mid-swap callback for the flash pattern.

mod asset_classifier;
mod asset_ledger;
mod flash_borrower;

pub use asset_classifier::AssetClassifier;
pub use asset_ledger::AssetLedger;
pub use flash_borrower::FlashBorrower;
