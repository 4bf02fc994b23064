//! Optimistic swaps and the fee-adjusted invariant check.
//!
//! # Flow
//!
//! 1. Validate the requested outputs against the reserves.
//! 2. Pay the outputs to the recipient (journaled).
//! 3. Invoke the flash borrower, if any.
//! 4. Infer each input as `balance − (reserve − out)`.
//! 5. Require
//!    `(balance_a·D − in_a·f)·(balance_b·D − in_b·f) ≥ reserve_a·reserve_b·D²`.
//! 6. Commit reserves and accrue the oracle.
//!
//! Any failure after step 2 reverts every journaled transfer.

use ethnum::U256;
use tracing::{debug, warn};

use super::events::PoolEvent;
use super::state::check_reserves;
use super::{CallContext, Pool};
use crate::assets::Journal;
use crate::domain::{Address, Amount, FeeTier};
use crate::error::AmmError;
use crate::traits::{AssetLedger, FlashBorrower};

/// Outputs a swap should pay and where to send them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapRequest {
    /// Requested output of asset A.
    pub amount_a_out: Amount,
    /// Requested output of asset B.
    pub amount_b_out: Amount,
    /// Recipient of the outputs.
    pub to: Address,
}

impl SwapRequest {
    /// Creates a request.
    #[must_use]
    pub const fn new(amount_a_out: Amount, amount_b_out: Amount, to: Address) -> Self {
        Self {
            amount_a_out,
            amount_b_out,
            to,
        }
    }
}

/// Exact amounts moved by a committed swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapOutcome {
    /// Net input of asset A.
    pub amount_a_in: Amount,
    /// Net input of asset B.
    pub amount_b_in: Amount,
    /// Output of asset A.
    pub amount_a_out: Amount,
    /// Output of asset B.
    pub amount_b_out: Amount,
}

#[derive(Debug, Clone, Copy)]
struct PreTrade {
    reserve_a: Amount,
    reserve_b: Amount,
    fee_tier: FeeTier,
}

type Flash<'f> = Option<(&'f mut dyn FlashBorrower, &'f [u8])>;

impl Pool {
    /// Swaps without a callback.
    ///
    /// Inputs must already sit in the pool's custody before the call.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Reentrancy`] if the pool is busy.
    /// - [`AmmError::InsufficientOutputAmount`] if both outputs are zero.
    /// - [`AmmError::InsufficientLiquidity`] if an output is not strictly
    ///   below its reserve.
    /// - [`AmmError::InvalidRecipient`] if the recipient is a pool asset.
    /// - [`AmmError::InsufficientInputAmount`] if no net input arrived.
    /// - [`AmmError::ReserveOverflow`] if a balance exceeds 112 bits.
    /// - [`AmmError::InvariantViolation`] if the fee-adjusted product fell.
    /// - [`AmmError::TransferFailed`] if an output transfer failed.
    pub fn swap<L: AssetLedger + ?Sized>(
        &self,
        ctx: &CallContext,
        assets: &mut L,
        request: SwapRequest,
    ) -> Result<SwapOutcome, AmmError> {
        self.swap_with(ctx, assets, request, None)
    }

    /// Swaps with a mid-trade callback to `borrower`.
    ///
    /// Outputs are paid before `borrower` runs, so it may repay from the
    /// proceeds.  The pool only trusts the balances it observes afterwards.
    ///
    /// # Errors
    ///
    /// Everything [`swap`](Self::swap) reports, plus any error returned by
    /// the borrower.
    pub fn flash_swap<L: AssetLedger + ?Sized>(
        &self,
        ctx: &CallContext,
        assets: &mut L,
        request: SwapRequest,
        borrower: &mut dyn FlashBorrower,
        payload: &[u8],
    ) -> Result<SwapOutcome, AmmError> {
        self.swap_with(ctx, assets, request, Some((borrower, payload)))
    }

    fn swap_with<L: AssetLedger + ?Sized>(
        &self,
        ctx: &CallContext,
        assets: &mut L,
        request: SwapRequest,
        flash: Flash<'_>,
    ) -> Result<SwapOutcome, AmmError> {
        let _guard = self.lock.acquire()?;
        let pre = self.validate_swap(&request)?;
        let mut journal = Journal::new(assets);
        match self.execute_swap(ctx, &mut journal, &request, pre, flash) {
            Ok(outcome) => {
                journal.commit();
                Ok(outcome)
            }
            Err(err) => {
                warn!(%err, pool = %self.address, "swap reverted");
                journal.rollback();
                Err(err)
            }
        }
    }

    fn validate_swap(&self, request: &SwapRequest) -> Result<PreTrade, AmmError> {
        if request.amount_a_out.is_zero() && request.amount_b_out.is_zero() {
            return Err(AmmError::InsufficientOutputAmount);
        }
        let state = self.state.borrow();
        if request.amount_a_out >= state.reserve_a || request.amount_b_out >= state.reserve_b {
            return Err(AmmError::InsufficientLiquidity {
                amount_a_out: request.amount_a_out,
                amount_b_out: request.amount_b_out,
                reserve_a: state.reserve_a,
                reserve_b: state.reserve_b,
            });
        }
        if self.pair.contains(&request.to) {
            return Err(AmmError::InvalidRecipient(request.to));
        }
        Ok(PreTrade {
            reserve_a: state.reserve_a,
            reserve_b: state.reserve_b,
            fee_tier: state.fee_tier,
        })
    }

    fn execute_swap<L: AssetLedger + ?Sized>(
        &self,
        ctx: &CallContext,
        journal: &mut Journal<'_, L>,
        request: &SwapRequest,
        pre: PreTrade,
        flash: Flash<'_>,
    ) -> Result<SwapOutcome, AmmError> {
        let (asset_a, asset_b) = (self.pair.asset_a(), self.pair.asset_b());
        self.send(journal, &asset_a, &request.to, request.amount_a_out)?;
        self.send(journal, &asset_b, &request.to, request.amount_b_out)?;

        if let Some((borrower, payload)) = flash {
            debug!(pool = %self.address, initiator = %ctx.caller, "invoking flash borrower");
            borrower.on_borrow(
                self,
                journal,
                ctx.caller,
                request.amount_a_out,
                request.amount_b_out,
                payload,
            )?;
        }

        let (balance_a, balance_b) = self.balances(&*journal);
        let floor_a = pre.reserve_a.saturating_sub(&request.amount_a_out);
        let floor_b = pre.reserve_b.saturating_sub(&request.amount_b_out);
        let amount_a_in = balance_a.saturating_sub(&floor_a);
        let amount_b_in = balance_b.saturating_sub(&floor_b);
        if amount_a_in.is_zero() && amount_b_in.is_zero() {
            return Err(AmmError::InsufficientInputAmount);
        }
        check_reserves(balance_a, balance_b)?;
        check_invariant(pre, (balance_a, balance_b), (amount_a_in, amount_b_in))?;

        let outcome = SwapOutcome {
            amount_a_in,
            amount_b_in,
            amount_a_out: request.amount_a_out,
            amount_b_out: request.amount_b_out,
        };
        let mut state = self.state.borrow_mut();
        state.update(balance_a, balance_b, ctx.now);
        state.events.emit(PoolEvent::SwapExecuted {
            sender: ctx.caller,
            to: request.to,
            amount_a_in,
            amount_b_in,
            amount_a_out: request.amount_a_out,
            amount_b_out: request.amount_b_out,
        });
        Ok(outcome)
    }
}

fn check_invariant(
    pre: PreTrade,
    (balance_a, balance_b): (Amount, Amount),
    (amount_a_in, amount_b_in): (Amount, Amount),
) -> Result<(), AmmError> {
    let d = U256::from(pre.fee_tier.denominator());
    let f = U256::from(pre.fee_tier.rate());
    let adjust = |balance: Amount, input: Amount| {
        balance
            .widen()
            .checked_mul(d)
            .and_then(|scaled| scaled.checked_sub(input.widen().checked_mul(f)?))
            .ok_or(AmmError::Overflow("fee-adjusted balance"))
    };
    let adjusted = adjust(balance_a, amount_a_in)?
        .checked_mul(adjust(balance_b, amount_b_in)?)
        .ok_or(AmmError::Overflow("fee-adjusted product"))?;
    let required = pre
        .reserve_a
        .widen()
        .checked_mul(pre.reserve_b.widen())
        .and_then(|k| k.checked_mul(d))
        .and_then(|k| k.checked_mul(d))
        .ok_or(AmmError::Overflow("required product"))?;
    if adjusted < required {
        return Err(AmmError::InvariantViolation { adjusted, required });
    }
    Ok(())
}
