//! Per-call inputs and the shared fee switch.

use std::cell::Cell;
use std::rc::Rc;

use crate::domain::{Address, Timestamp};

/// Who is calling and when.
///
/// Pools never read a clock; the caller supplies the current time with
/// every state-changing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallContext {
    /// Identity of the caller; reported in events and to flash borrowers.
    pub caller: Address,
    /// Current time.
    pub now: Timestamp,
}

impl CallContext {
    /// Creates a context.
    #[must_use]
    pub const fn new(caller: Address, now: Timestamp) -> Self {
        Self { caller, now }
    }
}

/// Shared, settable protocol fee recipient.
///
/// A registry hands clones of one switch to every pool it creates, so
/// turning the protocol fee on or off applies to all of them.
///
/// ```
/// use adaptive_cpamm::domain::Address;
/// use adaptive_cpamm::pool::FeeSwitch;
///
/// let switch = FeeSwitch::default();
/// let handle = switch.clone();
/// switch.set(Some(Address::from_bytes([7u8; 32])));
/// assert!(handle.is_on());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FeeSwitch(Rc<Cell<Option<Address>>>);

impl FeeSwitch {
    /// A switch that starts with the given recipient.
    #[must_use]
    pub fn new(recipient: Option<Address>) -> Self {
        Self(Rc::new(Cell::new(recipient)))
    }

    /// Current recipient, `None` when the protocol fee is off.
    #[must_use]
    pub fn recipient(&self) -> Option<Address> {
        self.0.get()
    }

    /// Returns `true` when a recipient is configured.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.0.get().is_some()
    }

    /// Replaces the recipient for every holder of this switch.
    pub fn set(&self, recipient: Option<Address>) {
        self.0.set(recipient);
    }
}
