//! Callback invoked mid-swap for the borrow-and-repay pattern.

use crate::domain::{Address, Amount};
use crate::error::AmmError;
use crate::pool::Pool;
use crate::traits::AssetLedger;

/// Receiver of a flash swap.
///
/// The pool transfers the requested outputs to the recipient *before*
/// measuring inputs, then calls [`on_borrow`](Self::on_borrow).  The
/// borrower may use the funds in any way as long as, by the time it
/// returns, enough input has reached the pool for the fee-adjusted
/// invariant to hold.
///
/// The pool does not trust anything the borrower reports: it re-reads its
/// own balances after the callback.  Returning `Err` aborts the swap and
/// every transfer made through `assets` is reverted.  Any attempt to call
/// a state-changing pool operation from inside the callback fails with
/// [`AmmError::Reentrancy`].
pub trait FlashBorrower {
    /// Handles a flash swap.
    ///
    /// - `pool` — the pool being traded against; views reflect pre-trade
    ///   reserves.
    /// - `assets` — journaled asset ledger; all transfers must go through it.
    /// - `initiator` — caller of the swap.
    /// - `amount_a`, `amount_b` — outputs already sent to the recipient.
    /// - `payload` — opaque data forwarded from the swap request.
    ///
    /// # Errors
    ///
    /// Any error aborts and rolls back the swap.
    fn on_borrow(
        &mut self,
        pool: &Pool,
        assets: &mut dyn AssetLedger,
        initiator: Address,
        amount_a: Amount,
        amount_b: Amount,
        payload: &[u8],
    ) -> Result<(), AmmError>;
}
