//! Fixed-capacity ring of oracle observations.

use crate::domain::Observation;
use crate::error::AmmError;

/// Circular buffer of [`Observation`]s with a rotating write pointer and a
/// saturating count.
///
/// Slots are addressed two ways:
///
/// - **physical** — the position in the backing array; `write_index` is
///   the physical slot the next observation lands in.
/// - **logical** — chronological order, `0` being the oldest stored
///   observation.  Once the ring is full the oldest entry sits at
///   `write_index`, so `physical = (start + logical) mod capacity`.
///
/// Writes are O(1): a full ring overwrites its oldest slot in place.
///
/// # Examples
///
/// ```
/// use adaptive_cpamm::domain::{Observation, Timestamp};
/// use adaptive_cpamm::oracle::ObservationRing;
/// use ethnum::U256;
///
/// let mut ring = ObservationRing::new(2).expect("non-zero capacity");
/// for t in [10, 20, 30] {
///     ring.push(Observation::new(Timestamp::new(t), U256::ZERO, U256::ZERO));
/// }
/// assert_eq!(ring.len(), 2);
/// assert_eq!(ring.write_index(), 1);
/// assert_eq!(ring.oldest().map(|o| o.timestamp.get()), Some(20));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationRing {
    slots: Box<[Observation]>,
    write_index: usize,
    count: usize,
}

impl ObservationRing {
    /// Creates an empty ring holding at most `capacity` observations.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidConfiguration`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, AmmError> {
        if capacity == 0 {
            return Err(AmmError::InvalidConfiguration(
                "observation capacity must be positive",
            ));
        }
        Ok(Self {
            slots: vec![Observation::default(); capacity].into_boxed_slice(),
            write_index: 0,
            count: 0,
        })
    }

    /// Maximum number of stored observations.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of stored observations, saturating at capacity.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if nothing has been recorded yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Physical slot the next observation is written to.
    #[must_use]
    pub const fn write_index(&self) -> usize {
        self.write_index
    }

    /// Stores `observation`, overwriting the oldest one when full.
    ///
    /// Returns the physical slot written.
    pub fn push(&mut self, observation: Observation) -> usize {
        let slot = self.write_index;
        if let Some(s) = self.slots.get_mut(slot) {
            *s = observation;
        }
        self.write_index = (slot + 1) % self.capacity();
        if self.count < self.capacity() {
            self.count += 1;
        }
        slot
    }

    /// Observation at chronological position `logical` (0 = oldest).
    #[must_use]
    pub fn get(&self, logical: usize) -> Option<&Observation> {
        if logical >= self.count {
            return None;
        }
        self.slots.get((self.start() + logical) % self.capacity())
    }

    /// Oldest stored observation.
    #[must_use]
    pub fn oldest(&self) -> Option<&Observation> {
        self.get(0)
    }

    /// Most recently stored observation.
    #[must_use]
    pub fn latest(&self) -> Option<&Observation> {
        self.count.checked_sub(1).and_then(|last| self.get(last))
    }

    /// Iterates oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Observation> + '_ {
        (0..self.count).filter_map(move |logical| self.get(logical))
    }

    /// Physical slot of the oldest observation.
    fn start(&self) -> usize {
        if self.count < self.capacity() {
            0
        } else {
            self.write_index
        }
    }
}
