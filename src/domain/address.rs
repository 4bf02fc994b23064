//! Chain-agnostic 32-byte identity for assets, holders and pools.

use core::fmt;

/// A 32-byte identity shared by assets, share holders and pools.
///
/// Assets and accounts live in the same identity space so the pool can
/// reject a swap whose recipient is one of its own assets.  All 32-byte
/// sequences are valid; the all-zero value doubles as the null asset and
/// as the sink that owns the permanent minimum share floor.
///
/// # Examples
///
/// ```
/// use adaptive_cpamm::domain::Address;
///
/// let addr = Address::from_bytes([1u8; 32]);
/// assert_eq!(addr.as_bytes(), [1u8; 32]);
/// assert!(Address::ZERO.is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address([u8; 32]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Holder of the permanently locked minimum share floor.
    pub const SINK: Self = Self::ZERO;

    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns `true` for the all-zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for Address {
    /// Abbreviated hex form: first and last four bytes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for b in self.0.iter().take(4) {
            write!(f, "{b:02x}")?;
        }
        f.write_str("…")?;
        for b in self.0.iter().skip(28) {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}
