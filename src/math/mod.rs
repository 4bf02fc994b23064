//! Arithmetic helpers for pool calculations.
//!
//! - [`CheckedArithmetic`] lifts checked domain arithmetic into `Result`s.
//! - [`mul_div`] computes `a × b / d` over 256-bit intermediates.
//! - [`isqrt`] is the integer square root used for share issuance.
//! - [`quote`], [`get_amount_out`], [`get_amount_in`] price trades off-pool.

mod checked;
mod quote;
mod sqrt;

pub use checked::{mul_div, CheckedArithmetic};
pub use quote::{get_amount_in, get_amount_out, quote};
pub use sqrt::isqrt;
