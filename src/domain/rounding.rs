//! Explicit rounding direction for integer division.

/// Rounding direction for a division.
///
/// Every division that can lose precision takes a `Rounding` so the
/// direction is visible at the call site.  Amounts paid *out* of the pool
/// round [`Down`](Self::Down); amounts the pool *requires* round
/// [`Up`](Self::Up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}
