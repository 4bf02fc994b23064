//! Mutable state of one pool and the shared reserve-update path.

use ethnum::U256;

use super::events::{EventLog, PoolEvent};
use crate::domain::{Address, Amount, FeeTier, Shares, Timestamp, VolatilityScore};
use crate::error::AmmError;
use crate::fees::protocol_fee_shares;
use crate::ledger::LiquidityLedger;
use crate::oracle::PriceOracle;

#[derive(Debug, Clone)]
pub(crate) struct PoolState {
    pub(crate) reserve_a: Amount,
    pub(crate) reserve_b: Amount,
    pub(crate) oracle: PriceOracle,
    /// `reserve_a × reserve_b` after the last liquidity event while the
    /// protocol fee was on; zero otherwise.
    pub(crate) invariant_last: U256,
    pub(crate) fee_tier: FeeTier,
    pub(crate) volatility: VolatilityScore,
    pub(crate) last_volatility_update: Option<Timestamp>,
    pub(crate) shares: LiquidityLedger,
    pub(crate) events: EventLog,
}

/// Protocol fee shares to mint before a liquidity event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FeePlan {
    pub(crate) recipient: Option<Address>,
    pub(crate) shares: Shares,
}

impl PoolState {
    pub(crate) fn invariant(&self) -> U256 {
        // both reserves are below 2^112
        self.reserve_a.widen().saturating_mul(self.reserve_b.widen())
    }

    /// Computes the protocol fee owed on the current reserves.
    pub(crate) fn plan_protocol_fee(
        &self,
        recipient: Option<Address>,
        factor: u32,
    ) -> Result<FeePlan, AmmError> {
        let shares = match recipient {
            Some(_) => protocol_fee_shares(
                self.reserve_a,
                self.reserve_b,
                self.shares.total_shares(),
                self.invariant_last,
                factor,
            )?,
            None => Shares::ZERO,
        };
        Ok(FeePlan { recipient, shares })
    }

    pub(crate) fn apply_protocol_fee(&mut self, plan: &FeePlan) -> Result<(), AmmError> {
        match plan.recipient {
            Some(recipient) if !plan.shares.is_zero() => self.shares.mint(&recipient, plan.shares),
            _ => Ok(()),
        }
    }

    /// Records the post-event invariant when the fee is on, clears it
    /// otherwise.
    pub(crate) fn close_liquidity_event(&mut self, fee_on: bool) {
        self.invariant_last = if fee_on { self.invariant() } else { U256::ZERO };
    }

    /// Sets reserves to the given balances.
    ///
    /// Accrues the oracle with the outgoing reserves first, then snapshots
    /// if an interval has passed.  Callers must have run
    /// [`check_reserves`] on the balances.
    pub(crate) fn update(&mut self, balance_a: Amount, balance_b: Amount, now: Timestamp) {
        self.oracle.accumulate(self.reserve_a, self.reserve_b, now);
        self.reserve_a = balance_a;
        self.reserve_b = balance_b;
        if let Some((index, observation)) = self.oracle.maybe_record(now) {
            self.events
                .emit(PoolEvent::ObservationRecorded { index, observation });
        }
        self.events.emit(PoolEvent::ReservesSynced {
            reserve_a: balance_a,
            reserve_b: balance_b,
        });
    }
}

/// Rejects balances that do not fit the reserve bit width.
pub(crate) fn check_reserves(balance_a: Amount, balance_b: Amount) -> Result<(), AmmError> {
    if balance_a.fits_reserve() && balance_b.fits_reserve() {
        Ok(())
    } else {
        Err(AmmError::ReserveOverflow {
            balance_a,
            balance_b,
        })
    }
}
