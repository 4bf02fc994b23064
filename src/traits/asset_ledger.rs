//! Interface to the external asset balances the pool custodies.
//!
//! The pool never tracks asset balances itself.  It reads them through
//! [`AssetLedger::balance_of`] and moves them through
//! [`AssetLedger::transfer`]; inputs are always inferred from observed
//! balance deltas, never from what a caller declares.

use crate::domain::{Address, Amount};
use crate::error::TransferError;

/// External fungible-asset balances.
///
/// Implementations must either perform a transfer completely or return an
/// error without side effects.  The pool treats every `Err` as a hard
/// failure of the enclosing operation and undoes any transfers it already
/// made.
///
/// # Implementors
///
/// - [`InMemoryAssets`](crate::assets::InMemoryAssets) — hash-map backed
///   balances for embedding and tests.
/// - [`Journal`](crate::assets::Journal) — records transfers so they can be
///   reverted.
pub trait AssetLedger {
    /// Balance of `asset` held by `holder`.
    fn balance_of(&self, asset: &Address, holder: &Address) -> Amount;

    /// Moves `amount` of `asset` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Any [`TransferError`]; the ledger must be unchanged on error.
    fn transfer(
        &mut self,
        asset: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), TransferError>;
}
