//! Lifetime and ownership bookkeeping.
//!
//! The toolkit's implicit ownership graph (parent containers free their
//! children, children may also die independently) is made explicit here:
//! every wrapped handle has exactly one owner at any time. The binding
//! layer may only issue the native destructor for handles it owns;
//! everything else is observed, never freed, so an externally triggered
//! destroy updates bookkeeping without a double-free.

use crate::handle::HandleType;
use crate::signal::ListenerId;

/// Who is responsible for eventually destroying a wrapped object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    /// The binding layer created the object and must destroy it.
    Binding,
    /// A native container (parent backend, display, client) frees it; the
    /// binding layer only observes the destroy signal.
    Native,
}

/// Per-handle ownership record. Exactly one owner at any time; transfer is
/// explicit via [`Registry::track`](crate::registry::Registry::track).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnershipRecord {
    owner: Owner,
}

impl OwnershipRecord {
    pub(crate) fn new(owner: Owner) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> Owner {
        self.owner
    }

    /// Atomic (from the caller's perspective) ownership transfer.
    pub(crate) fn transfer(&mut self, owner: Owner) {
        self.owner = owner;
    }
}

/// Registry-side bookkeeping for one wrapped handle.
pub(crate) struct HandleEntry {
    pub(crate) tag: HandleType,
    pub(crate) valid: bool,
    pub(crate) record: OwnershipRecord,
    /// Every listener node attached to this handle, internal finalizer
    /// included. Released transitively at teardown.
    pub(crate) listeners: Vec<ListenerId>,
}

impl HandleEntry {
    pub(crate) fn new(tag: HandleType, owner: Owner) -> Self {
        Self {
            tag,
            valid: true,
            record: OwnershipRecord::new(owner),
            listeners: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_is_single_owner() {
        let mut record = OwnershipRecord::new(Owner::Native);
        assert_eq!(record.owner(), Owner::Native);
        record.transfer(Owner::Binding);
        assert_eq!(record.owner(), Owner::Binding);
        // No intermediate shared state: the record is one value.
        record.transfer(Owner::Binding);
        assert_eq!(record.owner(), Owner::Binding);
    }

    #[test]
    fn test_entry_starts_valid() {
        let entry = HandleEntry::new(HandleType::Output, Owner::Native);
        assert!(entry.valid);
        assert!(entry.listeners.is_empty());
        assert_eq!(entry.record.owner(), Owner::Native);
    }
}
