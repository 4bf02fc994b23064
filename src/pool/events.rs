//! Notifications emitted on every pool state transition.

use tracing::info;

use crate::domain::{
    Address, Amount, AssetPair, FeeTier, Observation, Shares, VolatilityScore,
};

/// A committed pool state transition.
///
/// Events carry every value an indexer needs to rebuild pool history
/// without reading pool state.  They are appended only when an operation
/// commits; a failed operation emits nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PoolEvent {
    /// The pool was created.
    PoolCreated {
        /// Canonical asset pair.
        pair: AssetPair,
        /// Custody address of the pool.
        pool: Address,
        /// Initial fee tier.
        fee_tier: FeeTier,
        /// Initial volatility score.
        volatility: VolatilityScore,
    },
    /// Shares were issued against a deposit.
    SharesMinted {
        /// Caller of the mint.
        sender: Address,
        /// Recipient of the new shares.
        to: Address,
        /// Observed deposit of asset A.
        amount_a: Amount,
        /// Observed deposit of asset B.
        amount_b: Amount,
        /// Shares issued to `to`.
        shares: Shares,
        /// Shares issued to the fee recipient before the deposit.
        protocol_fee: Shares,
    },
    /// Shares were redeemed for assets.
    SharesBurned {
        /// Caller of the burn.
        sender: Address,
        /// Recipient of the withdrawn assets.
        to: Address,
        /// Asset A paid out.
        amount_a: Amount,
        /// Asset B paid out.
        amount_b: Amount,
        /// Shares destroyed.
        shares: Shares,
        /// Shares issued to the fee recipient before the withdrawal.
        protocol_fee: Shares,
    },
    /// A swap completed.
    SwapExecuted {
        /// Caller of the swap.
        sender: Address,
        /// Recipient of the outputs.
        to: Address,
        /// Net input of asset A.
        amount_a_in: Amount,
        /// Net input of asset B.
        amount_b_in: Amount,
        /// Output of asset A.
        amount_a_out: Amount,
        /// Output of asset B.
        amount_b_out: Amount,
    },
    /// Reserves were set to the observed balances.
    ReservesSynced {
        /// New reserve of asset A.
        reserve_a: Amount,
        /// New reserve of asset B.
        reserve_b: Amount,
    },
    /// An oracle snapshot was stored.
    ObservationRecorded {
        /// Physical ring slot written.
        index: usize,
        /// The stored snapshot.
        observation: Observation,
    },
    /// A new volatility score was committed and the fee tier recomputed.
    FeeTierChanged {
        /// Tier before the update.
        previous: FeeTier,
        /// Tier after the update.
        current: FeeTier,
        /// Committed volatility score.
        volatility: VolatilityScore,
    },
}

/// Append-only event buffer.
///
/// Nothing is ever evicted: the embedder owns delivery and must call
/// [`Pool::drain_events`](super::Pool::drain_events) to release events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct EventLog {
    pending: Vec<PoolEvent>,
}

impl EventLog {
    pub(crate) fn emit(&mut self, event: PoolEvent) {
        info!(?event, "pool event");
        self.pending.push(event);
    }

    pub(crate) fn pending(&self) -> &[PoolEvent] {
        &self.pending
    }

    pub(crate) fn drain(&mut self) -> Vec<PoolEvent> {
        std::mem::take(&mut self.pending)
    }
}
