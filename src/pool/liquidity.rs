//! Share issuance and redemption.
//!
//! # First deposit
//!
//! ```text
//! shares = ⌊√(amount_a × amount_b)⌋ − floor      (floor minted to the sink)
//! ```
//!
//! # Later deposits
//!
//! ```text
//! shares = min(amount_a × total / reserve_a, amount_b × total / reserve_b)
//! ```
//!
//! # Withdrawal
//!
//! ```text
//! amount_x = shares × balance_x / total
//! ```
//!
//! The protocol fee is minted against pre-event reserves before any of
//! the above, so `total` already includes it.

use tracing::warn;

use super::events::PoolEvent;
use super::state::{check_reserves, FeePlan};
use super::{CallContext, Pool};
use crate::assets::Journal;
use crate::domain::{Address, Amount, Rounding, Shares};
use crate::error::AmmError;
use crate::math::{isqrt, mul_div, CheckedArithmetic};
use crate::traits::AssetLedger;

#[derive(Debug, Clone, Copy)]
struct MintPlan {
    amount_a: Amount,
    amount_b: Amount,
    fee: FeePlan,
    locked: Shares,
    liquidity: Shares,
}

#[derive(Debug, Clone, Copy)]
struct BurnPlan {
    shares: Shares,
    fee: FeePlan,
    amount_a: Amount,
    amount_b: Amount,
}

impl Pool {
    /// Issues shares to `to` for the assets sent to the pool since the
    /// last reserve update.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Reentrancy`] if the pool is busy.
    /// - [`AmmError::InvalidRecipient`] if `to` is the sink.
    /// - [`AmmError::ReserveOverflow`] if a balance exceeds 112 bits.
    /// - [`AmmError::InsufficientLiquidityMinted`] if the deposit is worth
    ///   zero shares (including a first deposit whose root does not
    ///   exceed the minimum share floor).
    /// - [`AmmError::Overflow`] if a balance fell below its reserve or the
    ///   share supply would overflow.
    pub fn mint<L: AssetLedger + ?Sized>(
        &self,
        ctx: &CallContext,
        assets: &L,
        to: Address,
    ) -> Result<Shares, AmmError> {
        let _guard = self.lock.acquire()?;
        if to == Address::SINK {
            return Err(AmmError::InvalidRecipient(to));
        }
        let (balance_a, balance_b) = self.balances(assets);
        let fee_recipient = self.fee_switch.recipient();
        let plan = self
            .plan_mint(balance_a, balance_b, fee_recipient)
            .inspect_err(|err| warn!(%err, pool = %self.address, "mint rejected"))?;

        let mut state = self.state.borrow_mut();
        state.apply_protocol_fee(&plan.fee)?;
        state.shares.mint(&Address::SINK, plan.locked)?;
        state.shares.mint(&to, plan.liquidity)?;
        state.update(balance_a, balance_b, ctx.now);
        state.close_liquidity_event(fee_recipient.is_some());
        state.events.emit(PoolEvent::SharesMinted {
            sender: ctx.caller,
            to,
            amount_a: plan.amount_a,
            amount_b: plan.amount_b,
            shares: plan.liquidity,
            protocol_fee: plan.fee.shares,
        });
        Ok(plan.liquidity)
    }

    fn plan_mint(
        &self,
        balance_a: Amount,
        balance_b: Amount,
        fee_recipient: Option<Address>,
    ) -> Result<MintPlan, AmmError> {
        check_reserves(balance_a, balance_b)?;
        let state = self.state.borrow();
        let amount_a = balance_a.safe_sub(&state.reserve_a, "deposit of asset A")?;
        let amount_b = balance_b.safe_sub(&state.reserve_b, "deposit of asset B")?;
        let fee = state.plan_protocol_fee(fee_recipient, self.config.protocol_fee_factor())?;
        let total = state.shares.total_shares().safe_add(&fee.shares, "total shares")?;

        let (liquidity, locked) = if total.is_zero() {
            let product = amount_a
                .widen()
                .checked_mul(amount_b.widen())
                .ok_or(AmmError::Overflow("deposit product"))?;
            let floor = self.config.minimum_share_floor();
            let root = Shares::new(isqrt(product));
            (root.checked_sub(&floor).unwrap_or(Shares::ZERO), floor)
        } else {
            let by_a = mul_div(
                amount_a.widen(),
                total.widen(),
                state.reserve_a.widen(),
                Rounding::Down,
            )?;
            let by_b = mul_div(
                amount_b.widen(),
                total.widen(),
                state.reserve_b.widen(),
                Rounding::Down,
            )?;
            let shares =
                Shares::from_wide(by_a.min(by_b)).ok_or(AmmError::Overflow("minted shares"))?;
            (shares, Shares::ZERO)
        };
        if liquidity.is_zero() {
            return Err(AmmError::InsufficientLiquidityMinted {
                amount_a,
                amount_b,
                total_shares: state.shares.total_shares(),
            });
        }
        total
            .safe_add(&locked, "total shares")?
            .safe_add(&liquidity, "total shares")?;
        Ok(MintPlan {
            amount_a,
            amount_b,
            fee,
            locked,
            liquidity,
        })
    }

    /// Redeems every share held in the pool's custody and pays the
    /// proportional assets to `to`.
    ///
    /// Payouts use current balances, so assets sent to the pool without a
    /// mint are shared pro rata.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Reentrancy`] if the pool is busy.
    /// - [`AmmError::InsufficientLiquidityBurned`] if either payout is zero.
    /// - [`AmmError::TransferFailed`] if a payout transfer failed; nothing
    ///   is burned and earlier transfers are reverted.
    /// - [`AmmError::ReserveOverflow`] if a remaining balance exceeds 112
    ///   bits.
    pub fn burn<L: AssetLedger + ?Sized>(
        &self,
        ctx: &CallContext,
        assets: &mut L,
        to: Address,
    ) -> Result<(Amount, Amount), AmmError> {
        let _guard = self.lock.acquire()?;
        let (balance_a, balance_b) = self.balances(assets);
        let fee_recipient = self.fee_switch.recipient();
        let plan = self
            .plan_burn(balance_a, balance_b, fee_recipient)
            .inspect_err(|err| warn!(%err, pool = %self.address, "burn rejected"))?;

        let mut journal = Journal::new(assets);
        match self.settle_burn(ctx, &mut journal, to, &plan) {
            Ok(()) => {
                journal.commit();
                Ok((plan.amount_a, plan.amount_b))
            }
            Err(err) => {
                warn!(%err, pool = %self.address, "burn reverted");
                journal.rollback();
                Err(err)
            }
        }
    }

    fn plan_burn(
        &self,
        balance_a: Amount,
        balance_b: Amount,
        fee_recipient: Option<Address>,
    ) -> Result<BurnPlan, AmmError> {
        let state = self.state.borrow();
        let shares = state.shares.balance_of(&self.address);
        if shares.is_zero() {
            return Err(AmmError::InsufficientLiquidityBurned {
                shares,
                amount_a: Amount::ZERO,
                amount_b: Amount::ZERO,
            });
        }
        let fee = state.plan_protocol_fee(fee_recipient, self.config.protocol_fee_factor())?;
        let total = state.shares.total_shares().safe_add(&fee.shares, "total shares")?;
        let payout = |balance: Amount| {
            let wide = mul_div(shares.widen(), balance.widen(), total.widen(), Rounding::Down)?;
            Amount::from_wide(wide).ok_or(AmmError::Overflow("burn payout"))
        };
        let amount_a = payout(balance_a)?;
        let amount_b = payout(balance_b)?;
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(AmmError::InsufficientLiquidityBurned {
                shares,
                amount_a,
                amount_b,
            });
        }
        Ok(BurnPlan {
            shares,
            fee,
            amount_a,
            amount_b,
        })
    }

    fn settle_burn<L: AssetLedger + ?Sized>(
        &self,
        ctx: &CallContext,
        journal: &mut Journal<'_, L>,
        to: Address,
        plan: &BurnPlan,
    ) -> Result<(), AmmError> {
        self.send(journal, &self.pair.asset_a(), &to, plan.amount_a)?;
        self.send(journal, &self.pair.asset_b(), &to, plan.amount_b)?;
        let (balance_a, balance_b) = self.balances(&*journal);
        check_reserves(balance_a, balance_b)?;

        let mut state = self.state.borrow_mut();
        state.apply_protocol_fee(&plan.fee)?;
        state.shares.burn(&self.address, plan.shares)?;
        state.update(balance_a, balance_b, ctx.now);
        state.close_liquidity_event(plan.fee.recipient.is_some());
        state.events.emit(PoolEvent::SharesBurned {
            sender: ctx.caller,
            to,
            amount_a: plan.amount_a,
            amount_b: plan.amount_b,
            shares: plan.shares,
            protocol_fee: plan.fee.shares,
        });
        Ok(())
    }

    /// Moves `amount` of the caller's shares to `to`.
    ///
    /// Sending shares to [`address`](Self::address) queues them for the
    /// next [`burn`](Self::burn).
    ///
    /// # Errors
    ///
    /// - [`AmmError::Reentrancy`] if the pool is busy.
    /// - [`AmmError::InvalidRecipient`] if `to` is the sink.
    /// - [`AmmError::LockedShares`] if the caller is the sink.
    /// - [`AmmError::InsufficientShares`] if the caller holds too few.
    pub fn transfer_shares(
        &self,
        ctx: &CallContext,
        to: Address,
        amount: Shares,
    ) -> Result<(), AmmError> {
        let _guard = self.lock.acquire()?;
        // shares sent to the sink could never move again
        if to == Address::SINK {
            return Err(AmmError::InvalidRecipient(to));
        }
        self.state
            .borrow_mut()
            .shares
            .transfer(&ctx.caller, &to, amount)
    }
}
