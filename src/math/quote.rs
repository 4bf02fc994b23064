//! Fee-aware pricing helpers over a pair of reserves.
//!
//! The pool itself never prices a trade: it only verifies the
//! fee-adjusted invariant on whatever balances it observes.  These helpers
//! compute amounts that are guaranteed to pass that check, for callers
//! building swap requests.
//!
//! # Exact-in (Token in → Token out)
//!
//! ```text
//! in_with_fee = amount_in × (D − f)
//! amount_out  = in_with_fee × reserve_out / (reserve_in × D + in_with_fee)
//! ```
//!
//! # Exact-out
//!
//! ```text
//! amount_in = reserve_in × amount_out × D / ((reserve_out − amount_out) × (D − f)) + 1
//! ```

use ethnum::U256;

use super::checked::mul_div;
use crate::domain::{Amount, FeeTier, Rounding};
use crate::error::AmmError;

/// Amount of B that keeps the reserve ratio when depositing `amount_a`.
///
/// # Errors
///
/// - [`AmmError::InsufficientOutputAmount`] if `amount_a` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
pub fn quote(amount_a: Amount, reserve_a: Amount, reserve_b: Amount) -> Result<Amount, AmmError> {
    if amount_a.is_zero() {
        return Err(AmmError::InsufficientOutputAmount);
    }
    if reserve_a.is_zero() || reserve_b.is_zero() {
        return Err(no_liquidity(reserve_a, reserve_b));
    }
    let out = mul_div(amount_a.widen(), reserve_b.widen(), reserve_a.widen(), Rounding::Down)?;
    Amount::from_wide(out).ok_or(AmmError::Overflow("quote result"))
}

/// Maximum output for an exact input, after the tier's fee.
///
/// # Errors
///
/// - [`AmmError::InsufficientInputAmount`] if `amount_in` is zero.
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
pub fn get_amount_out(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeTier,
) -> Result<Amount, AmmError> {
    if amount_in.is_zero() {
        return Err(AmmError::InsufficientInputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(no_liquidity(reserve_in, reserve_out));
    }
    let d = U256::from(fee.denominator());
    let in_with_fee = amount_in
        .widen()
        .checked_mul(U256::from(fee.basis_points().complement()))
        .ok_or(AmmError::Overflow("amount in with fee"))?;
    let denominator = reserve_in
        .widen()
        .checked_mul(d)
        .and_then(|v| v.checked_add(in_with_fee))
        .ok_or(AmmError::Overflow("amount out denominator"))?;
    let out = mul_div(in_with_fee, reserve_out.widen(), denominator, Rounding::Down)?;
    Amount::from_wide(out).ok_or(AmmError::Overflow("amount out"))
}

/// Minimum input for an exact output, after the tier's fee.
///
/// # Errors
///
/// - [`AmmError::InsufficientOutputAmount`] if `amount_out` is zero.
/// - [`AmmError::InsufficientLiquidity`] if `amount_out` is not strictly
///   below `reserve_out`, or `reserve_in` is zero.
/// - [`AmmError::InvalidConfiguration`] for a 100% fee tier.
pub fn get_amount_in(
    amount_out: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeTier,
) -> Result<Amount, AmmError> {
    if amount_out.is_zero() {
        return Err(AmmError::InsufficientOutputAmount);
    }
    if reserve_in.is_zero() || amount_out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity {
            amount_a_out: Amount::ZERO,
            amount_b_out: amount_out,
            reserve_a: reserve_in,
            reserve_b: reserve_out,
        });
    }
    let complement = fee.basis_points().complement();
    if complement == 0 {
        return Err(AmmError::InvalidConfiguration("fee tier of 100% admits no input"));
    }
    let numerator = reserve_in
        .widen()
        .checked_mul(amount_out.widen())
        .and_then(|v| v.checked_mul(U256::from(fee.denominator())))
        .ok_or(AmmError::Overflow("amount in numerator"))?;
    let remaining = reserve_out.widen() - amount_out.widen();
    let denominator = remaining
        .checked_mul(U256::from(complement))
        .ok_or(AmmError::Overflow("amount in denominator"))?;
    let amount_in = numerator / denominator + U256::ONE;
    Amount::from_wide(amount_in).ok_or(AmmError::Overflow("amount in"))
}

fn no_liquidity(reserve_a: Amount, reserve_b: Amount) -> AmmError {
    AmmError::InsufficientLiquidity {
        amount_a_out: Amount::ZERO,
        amount_b_out: Amount::ZERO,
        reserve_a,
        reserve_b,
    }
}
