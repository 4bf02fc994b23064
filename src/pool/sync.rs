//! Reconciling reserves with custody balances.

use tracing::{debug, warn};

use super::state::check_reserves;
use super::{CallContext, Pool};
use crate::assets::Journal;
use crate::domain::{Address, Amount};
use crate::error::AmmError;
use crate::traits::AssetLedger;

impl Pool {
    /// Sets the reserves to the pool's current balances.
    ///
    /// Recovers from assets sent to the pool without a mint or swap.  A
    /// second call with no transfer in between changes nothing but the
    /// emitted events.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Reentrancy`] if the pool is busy.
    /// - [`AmmError::ReserveOverflow`] if a balance exceeds 112 bits.
    pub fn sync<L: AssetLedger + ?Sized>(
        &self,
        ctx: &CallContext,
        assets: &L,
    ) -> Result<(), AmmError> {
        let _guard = self.lock.acquire()?;
        let (balance_a, balance_b) = self.balances(assets);
        check_reserves(balance_a, balance_b)?;
        self.state
            .borrow_mut()
            .update(balance_a, balance_b, ctx.now);
        Ok(())
    }

    /// Pays every balance above the reserves to `to`, leaving reserves
    /// untouched.
    ///
    /// Returns the amounts paid.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Reentrancy`] if the pool is busy.
    /// - [`AmmError::TransferFailed`] if a payout failed; earlier payouts
    ///   are reverted.
    pub fn skim<L: AssetLedger + ?Sized>(
        &self,
        ctx: &CallContext,
        assets: &mut L,
        to: Address,
    ) -> Result<(Amount, Amount), AmmError> {
        let _guard = self.lock.acquire()?;
        let (balance_a, balance_b) = self.balances(assets);
        let (excess_a, excess_b) = {
            let state = self.state.borrow();
            (
                balance_a.saturating_sub(&state.reserve_a),
                balance_b.saturating_sub(&state.reserve_b),
            )
        };
        let mut journal = Journal::new(assets);
        let paid = self
            .send(&mut journal, &self.pair.asset_a(), &to, excess_a)
            .and_then(|()| self.send(&mut journal, &self.pair.asset_b(), &to, excess_b));
        match paid {
            Ok(()) => {
                journal.commit();
                debug!(caller = %ctx.caller, %excess_a, %excess_b, "skimmed");
                Ok((excess_a, excess_b))
            }
            Err(err) => {
                warn!(%err, pool = %self.address, "skim reverted");
                journal.rollback();
                Err(err)
            }
        }
    }
}
