//! Protocol share of fee growth.
//!
//! Trading fees stay in the reserves, so `√(reserve_a × reserve_b)` grows
//! between liquidity events.  When the fee switch is on, the protocol is
//! minted enough new shares to own `1 / (factor + 1)` of that growth:
//!
//! ```text
//! shares = total × (√k_now − √k_last) / (√k_now × factor + √k_last)
//! ```

use ethnum::U256;

use crate::domain::{Amount, Shares};
use crate::error::AmmError;
use crate::math::isqrt;

/// Shares owed to the fee recipient for growth since `invariant_last`.
///
/// Zero when no invariant was recorded or the pool did not grow.
///
/// # Errors
///
/// - [`AmmError::Overflow`] if an intermediate exceeds 256 bits or the
///   result exceeds `u128`.
/// - [`AmmError::DivisionByZero`] if the denominator is zero.
///
/// # Examples
///
/// ```
/// use adaptive_cpamm::domain::{Amount, Shares};
/// use adaptive_cpamm::fees::protocol_fee_shares;
/// use ethnum::U256;
///
/// // √k grew from 100 to 110
/// let shares = protocol_fee_shares(
///     Amount::new(110),
///     Amount::new(110),
///     Shares::new(1_000),
///     U256::new(10_000),
///     5,
/// );
/// assert_eq!(shares, Ok(Shares::new(15)));
/// ```
pub fn protocol_fee_shares(
    reserve_a: Amount,
    reserve_b: Amount,
    total: Shares,
    invariant_last: U256,
    factor: u32,
) -> Result<Shares, AmmError> {
    if invariant_last == U256::ZERO {
        return Ok(Shares::ZERO);
    }
    let k_now = reserve_a
        .widen()
        .checked_mul(reserve_b.widen())
        .ok_or(AmmError::Overflow("invariant"))?;
    let root_now = U256::from(isqrt(k_now));
    let root_last = U256::from(isqrt(invariant_last));
    if root_now <= root_last {
        return Ok(Shares::ZERO);
    }
    let numerator = total
        .widen()
        .checked_mul(root_now - root_last)
        .ok_or(AmmError::Overflow("protocol fee numerator"))?;
    let denominator = root_now
        .checked_mul(U256::from(factor))
        .and_then(|v| v.checked_add(root_last))
        .ok_or(AmmError::Overflow("protocol fee denominator"))?;
    if denominator == U256::ZERO {
        return Err(AmmError::DivisionByZero);
    }
    Shares::from_wide(numerator / denominator).ok_or(AmmError::Overflow("protocol fee shares"))
}
