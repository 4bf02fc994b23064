//! Checked arithmetic that reports failures as [`AmmError`]s.
//!
//! The domain types expose `Option`-returning `checked_*` methods; this
//! trait lifts them into `Result`s tagged with a short context string so
//! that pool code can stay on the `?` path.
//!
//! ```
//! use adaptive_cpamm::domain::Amount;
//! use adaptive_cpamm::math::CheckedArithmetic;
//!
//! let sum = Amount::new(100).safe_add(&Amount::new(200), "deposit total");
//! assert_eq!(sum, Ok(Amount::new(300)));
//! ```

use ethnum::U256;

use crate::domain::{Amount, Rounding, Shares};
use crate::error::AmmError;

/// Fallible arithmetic for domain wrapper types.
///
/// No saturation: every out-of-range result becomes an error.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// [`AmmError::Overflow`] tagged with `context`.
    fn safe_add(&self, other: &Self, context: &'static str) -> Result<Self, AmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// [`AmmError::Overflow`] tagged with `context`.
    fn safe_sub(&self, other: &Self, context: &'static str) -> Result<Self, AmmError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self, context: &'static str) -> Result<Self, AmmError> {
        self.checked_add(other).ok_or(AmmError::Overflow(context))
    }

    #[inline]
    fn safe_sub(&self, other: &Self, context: &'static str) -> Result<Self, AmmError> {
        self.checked_sub(other).ok_or(AmmError::Overflow(context))
    }
}

impl CheckedArithmetic for Shares {
    #[inline]
    fn safe_add(&self, other: &Self, context: &'static str) -> Result<Self, AmmError> {
        self.checked_add(other).ok_or(AmmError::Overflow(context))
    }

    #[inline]
    fn safe_sub(&self, other: &Self, context: &'static str) -> Result<Self, AmmError> {
        self.checked_sub(other).ok_or(AmmError::Overflow(context))
    }
}

/// `a × b / d` with a 256-bit intermediate and explicit rounding.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `d` is zero.
/// - [`AmmError::Overflow`] if `a × b` exceeds 256 bits.
pub fn mul_div(a: U256, b: U256, d: U256, rounding: Rounding) -> Result<U256, AmmError> {
    if d == U256::ZERO {
        return Err(AmmError::DivisionByZero);
    }
    let product = a
        .checked_mul(b)
        .ok_or(AmmError::Overflow("mul_div product"))?;
    let q = product / d;
    match rounding {
        Rounding::Down => Ok(q),
        Rounding::Up if product % d != U256::ZERO => Ok(q + U256::ONE),
        Rounding::Up => Ok(q),
    }
}
