//! Integer square root.

use ethnum::U256;

/// Floor of the square root of `n`, by Newton's method.
///
/// Converges from above: the first estimate is `n / 2 + 1`, each step
/// strictly decreases until `y ≥ x`, at which point `x = ⌊√n⌋`.
///
/// ```
/// use ethnum::U256;
/// use adaptive_cpamm::math::isqrt;
///
/// assert_eq!(isqrt(U256::new(4)), 2);
/// assert_eq!(isqrt(U256::new(24)), 4);
/// ```
#[must_use]
pub fn isqrt(n: U256) -> u128 {
    if n == U256::ZERO {
        return 0;
    }
    if n <= U256::new(3) {
        return 1;
    }
    let mut x = n;
    let mut y = (n >> 1u32) + U256::ONE;
    while y < x {
        x = y;
        y = (x + n / x) >> 1u32;
    }
    // ⌊√(2^256 − 1)⌋ = 2^128 − 1, so the root always fits
    x.as_u128()
}
