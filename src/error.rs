//! Unified error types for the pool core.
//!
//! Every fallible operation in the crate returns [`AmmError`].  Variants
//! carry the values that caused the rejection so integrators can diagnose
//! a failure without re-reading pool state.
//!
//! Errors are grouped by [`ErrorKind`]:
//!
//! | Kind | Raised | State touched |
//! |------|--------|---------------|
//! | `Validation` | before any computation | none |
//! | `Liquidity` | after computation | none |
//! | `Invariant` | after the optimistic transfer | transfers rolled back |
//! | `Reentrancy` | at entry | none |
//! | `Overflow` | before reserves are committed | transfers rolled back |
//! | `Transfer` | when an asset transfer fails | transfers rolled back |
//! | `Configuration` | at construction | none |

use ethnum::U256;

use crate::domain::{Address, Amount, AssetPair, Shares};

/// Convenience alias used across the crate.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Failure reported by an [`AssetLedger`](crate::traits::AssetLedger)
/// implementation when a transfer cannot be carried out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    /// The sender does not hold enough of the asset.
    #[error("insufficient balance: holder {holder} has {balance}, needs {needed}")]
    InsufficientBalance {
        /// Account that attempted to send.
        holder: Address,
        /// Balance held at the time of the transfer.
        balance: Amount,
        /// Amount requested.
        needed: Amount,
    },

    /// The receiving balance would overflow.
    #[error("recipient balance overflow")]
    BalanceOverflow,

    /// The asset refused the transfer (non-standard or paused asset).
    #[error("transfer rejected: {0}")]
    Rejected(String),
}

/// Broad category of an [`AmmError`], mirroring where in an operation it
/// is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed request, rejected before any state is read for mutation.
    Validation,
    /// Reserves or shares cannot satisfy the request.
    Liquidity,
    /// The fee-adjusted constant-product check failed.
    Invariant,
    /// A state-changing call arrived while another one was in flight.
    Reentrancy,
    /// A value exceeded its fixed bit width.
    Overflow,
    /// An external asset transfer failed.
    Transfer,
    /// Invalid construction parameters.
    Configuration,
}

/// Error type shared by every module of the crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmmError {
    /// Both sides of a pair resolve to the same asset.
    #[error("identical assets: {0}")]
    IdenticalAssets(Address),

    /// The all-zero address was supplied as an asset.
    #[error("null asset address")]
    NullAsset,

    /// Recipient is one of the pool's own assets.
    #[error("invalid recipient {0}: recipient cannot be a pool asset")]
    InvalidRecipient(Address),

    /// The asset is not one of the pool's pair.
    #[error("asset {0} is not part of the pool's pair")]
    AssetNotInPair(Address),

    /// Both requested swap outputs are zero.
    #[error("insufficient output amount: at least one output must be positive")]
    InsufficientOutputAmount,

    /// A requested output is not strictly below its reserve.
    #[error(
        "insufficient liquidity: requested ({amount_a_out}, {amount_b_out}) \
         against reserves ({reserve_a}, {reserve_b})"
    )]
    InsufficientLiquidity {
        /// Requested output of asset A.
        amount_a_out: Amount,
        /// Requested output of asset B.
        amount_b_out: Amount,
        /// Reserve of asset A before the swap.
        reserve_a: Amount,
        /// Reserve of asset B before the swap.
        reserve_b: Amount,
    },

    /// No asset was paid into the pool during a swap.
    #[error("insufficient input amount: no net input observed")]
    InsufficientInputAmount,

    /// A deposit would mint zero shares.
    #[error(
        "insufficient liquidity minted: deposit ({amount_a}, {amount_b}) \
         against total supply {total_shares}"
    )]
    InsufficientLiquidityMinted {
        /// Observed deposit of asset A.
        amount_a: Amount,
        /// Observed deposit of asset B.
        amount_b: Amount,
        /// Total shares before the deposit.
        total_shares: Shares,
    },

    /// A withdrawal would pay out zero of an asset.
    #[error(
        "insufficient liquidity burned: {shares} shares redeem ({amount_a}, {amount_b})"
    )]
    InsufficientLiquidityBurned {
        /// Shares held in pool custody.
        shares: Shares,
        /// Computed payout of asset A.
        amount_a: Amount,
        /// Computed payout of asset B.
        amount_b: Amount,
    },

    /// Fee-adjusted post-trade product fell below the pre-trade product.
    #[error("invariant violation: adjusted product {adjusted} below required {required}")]
    InvariantViolation {
        /// `(balance_a·D − in_a·f)·(balance_b·D − in_b·f)`.
        adjusted: U256,
        /// `reserve_a·reserve_b·D²`.
        required: U256,
    },

    /// A state-changing call was made while the pool was busy.
    #[error("reentrant call rejected: pool is busy")]
    Reentrancy,

    /// An observed balance does not fit the reserve bit width.
    #[error("reserve overflow: balances ({balance_a}, {balance_b}) exceed 112 bits")]
    ReserveOverflow {
        /// Balance of asset A.
        balance_a: Amount,
        /// Balance of asset B.
        balance_b: Amount,
    },

    /// Arithmetic overflow or underflow in an intermediate computation.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Division by zero in an intermediate computation.
    #[error("division by zero")]
    DivisionByZero,

    /// An asset transfer failed; the whole operation is rolled back.
    #[error("transfer of {amount} {asset} to {to} failed")]
    TransferFailed {
        /// Asset being moved.
        asset: Address,
        /// Intended recipient.
        to: Address,
        /// Amount requested.
        amount: Amount,
        /// Underlying ledger failure.
        #[source]
        source: TransferError,
    },

    /// A share holder tried to move more shares than they own.
    #[error("insufficient shares: {holder} holds {balance}, needs {needed}")]
    InsufficientShares {
        /// Share holder.
        holder: Address,
        /// Current share balance.
        balance: Shares,
        /// Requested amount.
        needed: Shares,
    },

    /// The minimum-liquidity sink's shares can never move.
    #[error("shares held by the sink are permanently locked")]
    LockedShares,

    /// The caller may not perform a privileged registry action.
    #[error("unauthorized caller {0}")]
    Unauthorized(Address),

    /// Construction parameters are invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// No pool is registered for the pair.
    #[error("no pool registered for {0}")]
    PoolNotFound(AssetPair),
}

impl AmmError {
    /// Returns the broad category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::IdenticalAssets(_)
            | Self::NullAsset
            | Self::InvalidRecipient(_)
            | Self::AssetNotInPair(_)
            | Self::InsufficientOutputAmount
            | Self::PoolNotFound(_)
            | Self::Unauthorized(_) => ErrorKind::Validation,
            Self::InsufficientLiquidity { .. }
            | Self::InsufficientInputAmount
            | Self::InsufficientLiquidityMinted { .. }
            | Self::InsufficientLiquidityBurned { .. }
            | Self::InsufficientShares { .. }
            | Self::LockedShares => ErrorKind::Liquidity,
            Self::InvariantViolation { .. } => ErrorKind::Invariant,
            Self::Reentrancy => ErrorKind::Reentrancy,
            Self::ReserveOverflow { .. } | Self::Overflow(_) | Self::DivisionByZero => {
                ErrorKind::Overflow
            }
            Self::TransferFailed { .. } => ErrorKind::Transfer,
            Self::InvalidConfiguration(_) => ErrorKind::Configuration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(AmmError::NullAsset.kind(), ErrorKind::Validation);
        assert_eq!(AmmError::InsufficientInputAmount.kind(), ErrorKind::Liquidity);
        assert_eq!(AmmError::Reentrancy.kind(), ErrorKind::Reentrancy);
        assert_eq!(
            AmmError::InvariantViolation {
                adjusted: U256::ONE,
                required: U256::new(2),
            }
            .kind(),
            ErrorKind::Invariant
        );
        assert_eq!(AmmError::Overflow("x").kind(), ErrorKind::Overflow);
    }

    #[test]
    fn display_carries_offending_values() {
        let err = AmmError::InsufficientLiquidity {
            amount_a_out: Amount::new(10),
            amount_b_out: Amount::ZERO,
            reserve_a: Amount::new(10),
            reserve_b: Amount::new(40),
        };
        let msg = err.to_string();
        assert!(msg.contains("(10, 0)"));
        assert!(msg.contains("(10, 40)"));
    }

    #[test]
    fn transfer_failure_exposes_source() {
        use std::error::Error;
        let err = AmmError::TransferFailed {
            asset: Address::from_bytes([1u8; 32]),
            to: Address::from_bytes([2u8; 32]),
            amount: Amount::new(5),
            source: TransferError::Rejected("paused".to_owned()),
        };
        assert!(err.source().is_some());
        assert_eq!(err.kind(), ErrorKind::Transfer);
    }
}
