//! Listener/signal bridge.
//!
//! The toolkit's publish mechanism is a linked list of listener nodes
//! mutated freely during iteration — safe in C, not here. This module
//! keeps listeners in an index-stable arena with generation counters
//! (tombstoning) and the registry iterates a snapshot of the chain at
//! emission time. Consequences, all deliberate:
//!
//! - a node subscribed during an emission does not see that emission;
//! - a node unsubscribed during an emission is skipped if not yet reached;
//! - a stale node id (already removed, or released by the handle's
//!   teardown) is detected by its generation and reported as
//!   `DoubleUnsubscribe` instead of corrupting the chain.

use crate::handle::{RawAddr, RawHandle};
use crate::registry::Registry;
use crate::types::input::DeviceKind;
use crate::types::shell::DecorationMode;

/// Signal families exposed by wrapped toolkit objects.
///
/// Every wrapped object exposes `Destroy`; the rest depend on the object
/// family (outputs emit `Frame`, backends emit `NewOutput`/`NewInput`,
/// surfaces emit `Commit`/`Map`/`Unmap`, and so on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Destroy,
    // Backend
    NewOutput,
    NewInput,
    // Output
    Frame,
    ModeChanged,
    // Surface / shell
    Commit,
    Map,
    Unmap,
    // Input devices
    Key,
    Modifiers,
    Button,
    Motion,
    Axis,
    Touch,
    // Selection managers
    SelectionSet,
    // Decoration
    RequestMode,
}

/// Payload carried by one emission.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalData {
    /// Signal carries no payload (most destroy/commit emissions).
    None,
    /// Signal announces another wrapped object (e.g. `NewOutput`).
    Handle(RawHandle),
    /// Signal announces a new input device and its kind.
    Device { handle: RawHandle, kind: DeviceKind },
    /// Timestamped emission (frame callbacks).
    Time { ms: u32 },
    /// A client requesting a decoration mode for a toplevel.
    Decoration {
        toplevel: RawHandle,
        mode: DecorationMode,
    },
}

/// Callback invoked on emission. Runs on the dispatching thread only; the
/// registry is handed back in so the callback may subscribe, unsubscribe,
/// or destroy handles without corrupting the chain.
pub type SignalCallback = Box<dyn FnMut(&mut Registry, RawHandle, &SignalData)>;

/// Identifies one subscription. Weak: holding an id does not keep the
/// handle or the slot alive. The signal kind is carried for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
    pub(crate) signal: SignalKind,
}

impl ListenerId {
    /// The signal this listener was attached to.
    pub fn signal(&self) -> SignalKind {
        self.signal
    }
}

// ============================================================================
// Listener arena
// ============================================================================

pub(crate) struct ListenerSlot {
    generation: u32,
    active: bool,
    /// Internal finalizer slots are registered by the registry at wrap time
    /// and are not user-removable.
    pub(crate) internal: bool,
    pub(crate) handle: RawAddr,
    pub(crate) signal: SignalKind,
    callback: Option<SignalCallback>,
}

/// Index-stable arena of listener slots. Released slots are tombstoned
/// (generation bumped) and reused via a free list.
#[derive(Default)]
pub(crate) struct ListenerTable {
    slots: Vec<ListenerSlot>,
    free: Vec<u32>,
}

impl ListenerTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(
        &mut self,
        handle: RawAddr,
        signal: SignalKind,
        internal: bool,
        callback: SignalCallback,
    ) -> ListenerId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.active = true;
            slot.internal = internal;
            slot.handle = handle;
            slot.signal = signal;
            slot.callback = Some(callback);
            ListenerId {
                index,
                generation: slot.generation,
                signal,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(ListenerSlot {
                generation: 0,
                active: true,
                internal,
                handle,
                signal,
                callback: Some(callback),
            });
            ListenerId {
                index,
                generation: 0,
                signal,
            }
        }
    }

    fn slot(&self, id: ListenerId) -> Option<&ListenerSlot> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
    }

    pub(crate) fn is_active(&self, id: ListenerId) -> bool {
        self.slot(id).map(|s| s.active).unwrap_or(false)
    }

    pub(crate) fn is_internal(&self, id: ListenerId) -> bool {
        self.slot(id).map(|s| s.internal).unwrap_or(false)
    }

    /// Emitting object and signal of a live node.
    pub(crate) fn slot_target(&self, id: ListenerId) -> Option<(RawAddr, SignalKind)> {
        self.slot(id).filter(|s| s.active).map(|s| (s.handle, s.signal))
    }

    /// Tombstone a slot. Returns false if the id is stale or the slot was
    /// already released (the `DoubleUnsubscribe` case).
    pub(crate) fn release(&mut self, id: ListenerId) -> bool {
        match self.slots.get_mut(id.index as usize) {
            Some(slot) if slot.generation == id.generation && slot.active => {
                slot.active = false;
                slot.callback = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(id.index);
                true
            }
            _ => false,
        }
    }

    /// Take the callback out for invocation. The slot stays active; the
    /// callback is handed back via `put_callback` unless the node was
    /// released in the meantime.
    pub(crate) fn take_callback(&mut self, id: ListenerId) -> Option<SignalCallback> {
        match self.slots.get_mut(id.index as usize) {
            Some(slot) if slot.generation == id.generation && slot.active => {
                slot.callback.take()
            }
            _ => None,
        }
    }

    /// Hand a callback back after invocation. Dropped silently if the slot
    /// was released during the call (self-unsubscribe from the callback).
    pub(crate) fn put_callback(&mut self, id: ListenerId, callback: SignalCallback) {
        if let Some(slot) = self.slots.get_mut(id.index as usize) {
            if slot.generation == id.generation && slot.active {
                slot.callback = Some(callback);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> SignalCallback {
        Box::new(|_, _, _| {})
    }

    #[test]
    fn test_insert_release_reuse() {
        let mut table = ListenerTable::new();
        let a = table.insert(1, SignalKind::Destroy, false, noop());
        let b = table.insert(1, SignalKind::Destroy, false, noop());
        assert!(table.is_active(a));
        assert!(table.is_active(b));

        assert!(table.release(a));
        assert!(!table.is_active(a));
        // Second release of the same id is the DoubleUnsubscribe case.
        assert!(!table.release(a));

        // The slot is reused with a bumped generation; the stale id stays dead.
        let c = table.insert(2, SignalKind::Frame, false, noop());
        assert_eq!(c.index, a.index);
        assert_ne!(c.generation, a.generation);
        assert!(table.is_active(c));
        assert!(!table.is_active(a));
        assert!(!table.release(a));
    }

    #[test]
    fn test_take_put_callback() {
        let mut table = ListenerTable::new();
        let id = table.insert(7, SignalKind::Commit, false, noop());

        let cb = table.take_callback(id).expect("callback present");
        // While taken, the slot is active but has nothing to invoke.
        assert!(table.is_active(id));
        assert!(table.take_callback(id).is_none());

        table.put_callback(id, cb);
        assert!(table.take_callback(id).is_some());
    }

    #[test]
    fn test_put_callback_after_release_is_dropped() {
        let mut table = ListenerTable::new();
        let id = table.insert(7, SignalKind::Commit, false, noop());
        let cb = table.take_callback(id).unwrap();
        assert!(table.release(id));
        // Handing the callback back must not resurrect the node.
        table.put_callback(id, cb);
        assert!(!table.is_active(id));
        assert!(table.take_callback(id).is_none());
    }

    #[test]
    fn test_internal_flag() {
        let mut table = ListenerTable::new();
        let fin = table.insert(3, SignalKind::Destroy, true, noop());
        let user = table.insert(3, SignalKind::Destroy, false, noop());
        assert!(table.is_internal(fin));
        assert!(!table.is_internal(user));
    }
}
