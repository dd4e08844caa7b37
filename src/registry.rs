//! Handle registry and event dispatch.
//!
//! The registry is the single authority for everything the toolkit
//! leaves implicit on the C side: which wrapped handles are still
//! alive, who owns their destruction, and which listener nodes hang off
//! each signal. All mutating operations take `&mut self`; there is no
//! internal locking. The toolkit's event model is single-threaded
//! cooperative and the binding layer keeps it that way — callers needing
//! concurrency run the loop on a dedicated thread and bring their own
//! channel discipline.
//!
//! Destruction is observed, never assumed: every wrap auto-subscribes an
//! internal finalizer on the object's destroy signal, so a handle turns
//! invalid exactly once — whether we issued the destructor or the native
//! side freed the object behind our back — and its listener nodes are
//! released transitively.

use std::collections::HashMap;

use crate::errors::{BindingError, Result};
use crate::handle::{HandleType, RawAddr, RawHandle};
use crate::lifetime::{HandleEntry, Owner, OwnershipRecord};
use crate::native::{NativeApi, NativeEvent};
use crate::signal::{ListenerId, ListenerTable, SignalCallback, SignalData, SignalKind};

pub struct Registry {
    native: Box<dyn NativeApi>,
    entries: HashMap<RawAddr, HandleEntry>,
    listeners: ListenerTable,
    /// Per-(object, signal) subscriber chain in insertion order. The
    /// toolkit notifies first-subscribed-first and so do we.
    chains: HashMap<(RawAddr, SignalKind), Vec<ListenerId>>,
    dispatching: bool,
    /// Handles whose destroy signal fired during the current dispatch
    /// turn; finalized after the turn so user listeners still run.
    teardown: Vec<RawAddr>,
}

impl Registry {
    pub fn new(native: Box<dyn NativeApi>) -> Self {
        Self {
            native,
            entries: HashMap::new(),
            listeners: ListenerTable::new(),
            chains: HashMap::new(),
            dispatching: false,
            teardown: Vec::new(),
        }
    }

    pub(crate) fn native_mut(&mut self) -> &mut dyn NativeApi {
        self.native.as_mut()
    }

    // =========================================================================
    // Raw handle layer
    // =========================================================================

    /// Wrap a just-returned native address. Takes no ownership (the native
    /// side remains responsible for destruction until [`Registry::track`]
    /// says otherwise) and does not validate liveness — the caller
    /// guarantees the address came out of a native call.
    ///
    /// Wrapping also plants the internal finalizer listener first in the
    /// object's destroy chain, so destruction is observable without the
    /// caller subscribing anything.
    pub fn wrap(&mut self, addr: RawAddr, tag: HandleType) -> RawHandle {
        if let Some(entry) = self.entries.get(&addr) {
            debug_assert_eq!(entry.tag, tag, "address rewrapped with a different tag");
            return RawHandle::new(addr, entry.tag);
        }
        let handle = RawHandle::new(addr, tag);
        self.entries.insert(addr, HandleEntry::new(tag, Owner::Native));
        let finalizer = self.listeners.insert(
            addr,
            SignalKind::Destroy,
            true,
            Box::new(move |registry, emitter, _| {
                registry.begin_teardown(emitter.addr());
            }),
        );
        self.chains
            .entry((addr, SignalKind::Destroy))
            .or_default()
            .push(finalizer);
        self.entries.get_mut(&addr).unwrap().listeners.push(finalizer);
        tracing::debug!("wrapped {}", handle);
        handle
    }

    /// Local validity flag only; no native roundtrip.
    pub fn is_valid(&self, handle: RawHandle) -> bool {
        self.entries
            .get(&handle.addr())
            .map(|e| e.valid)
            .unwrap_or(false)
    }

    /// Look up the wrapped handle for a native address, if any.
    pub fn handle_for(&self, addr: RawAddr) -> Option<RawHandle> {
        self.entries.get(&addr).map(|e| RawHandle::new(addr, e.tag))
    }

    pub(crate) fn ensure_valid(&self, handle: RawHandle) -> Result<()> {
        match self.entries.get(&handle.addr()) {
            Some(entry) if entry.valid => Ok(()),
            _ => Err(BindingError::use_after_destroy(handle.tag(), handle.addr())),
        }
    }

    // =========================================================================
    // Listener/signal bridge
    // =========================================================================

    /// Subscribe a callback to one of the handle's signals. Notification
    /// order follows insertion order; the bridge never reorders.
    pub fn subscribe(
        &mut self,
        handle: RawHandle,
        kind: SignalKind,
        callback: SignalCallback,
    ) -> Result<ListenerId> {
        self.ensure_valid(handle)?;
        let id = self.listeners.insert(handle.addr(), kind, false, callback);
        self.chains
            .entry((handle.addr(), kind))
            .or_default()
            .push(id);
        self.entries
            .get_mut(&handle.addr())
            .unwrap()
            .listeners
            .push(id);
        Ok(id)
    }

    /// Remove a listener node. Safe to call at any time before the
    /// emitting object's destroy signal fires; calling it twice — or after
    /// teardown already released the node — fails with `DoubleUnsubscribe`.
    pub fn unsubscribe(&mut self, id: ListenerId) -> Result<()> {
        if self.listeners.is_internal(id) || !self.listeners.is_active(id) {
            return Err(BindingError::double_unsubscribe(id.signal()));
        }
        let (addr, kind) = self
            .listeners
            .slot_target(id)
            .expect("active listener has a target");
        self.listeners.release(id);
        if let Some(chain) = self.chains.get_mut(&(addr, kind)) {
            chain.retain(|i| *i != id);
        }
        if let Some(entry) = self.entries.get_mut(&addr) {
            entry.listeners.retain(|i| *i != id);
        }
        Ok(())
    }

    /// Emit one signal to the chain as it existed at this moment
    /// (snapshot semantics). Nodes subscribed during the emission are not
    /// invoked; nodes unsubscribed mid-emission are skipped if not yet
    /// reached. Exactly one invocation per active node.
    pub(crate) fn emit(&mut self, handle: RawHandle, kind: SignalKind, data: SignalData) {
        let snapshot = self
            .chains
            .get(&(handle.addr(), kind))
            .cloned()
            .unwrap_or_default();
        let nested = self.dispatching;
        self.dispatching = true;
        for id in snapshot {
            if let Some(mut callback) = self.listeners.take_callback(id) {
                callback(self, handle, &data);
                self.listeners.put_callback(id, callback);
            }
        }
        self.dispatching = nested;
        if !nested {
            self.flush_teardown();
        }
    }

    // =========================================================================
    // Event dispatch
    // =========================================================================

    /// Drain and route pending native events. Returns the number routed.
    /// Re-entrant calls (from inside a callback) are no-ops; the events
    /// drain when the outer turn resumes.
    pub fn dispatch_events(&mut self) -> usize {
        if self.dispatching {
            return 0;
        }
        self.dispatching = true;
        let mut routed = 0;
        loop {
            let events = self.native.drain_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                routed += 1;
                self.route(event);
            }
        }
        self.dispatching = false;
        self.flush_teardown();
        routed
    }

    fn route(&mut self, event: NativeEvent) {
        match event {
            NativeEvent::Destroyed { addr, tag } => {
                // Emit even if already marked invalid (explicit destroy):
                // the destroy chain is the one signal a dying handle fires.
                if let Some(entry) = self.entries.get(&addr) {
                    let handle = RawHandle::new(addr, entry.tag);
                    tracing::debug!("native destroyed {}", handle);
                    self.emit(handle, SignalKind::Destroy, SignalData::None);
                } else {
                    tracing::trace!("destroy of unwrapped {}@{:#x}", tag, addr);
                }
            }
            NativeEvent::NewOutput { backend, output } => {
                let new = self.wrap(output, HandleType::Output);
                let emitter = self.valid_handle(backend);
                if let Some(handle) = emitter {
                    self.emit(handle, SignalKind::NewOutput, SignalData::Handle(new));
                }
            }
            NativeEvent::NewInput {
                backend,
                device,
                kind,
            } => {
                let new = self.wrap(device, HandleType::InputDevice);
                let emitter = self.valid_handle(backend);
                if let Some(handle) = emitter {
                    self.emit(
                        handle,
                        SignalKind::NewInput,
                        SignalData::Device { handle: new, kind },
                    );
                }
            }
            NativeEvent::Frame { output, time_ms } => {
                if let Some(handle) = self.valid_handle(output) {
                    self.emit(handle, SignalKind::Frame, SignalData::Time { ms: time_ms });
                }
            }
            NativeEvent::RequestMode {
                manager,
                toplevel,
                mode,
            } => {
                let requester = self.wrap(toplevel, HandleType::Toplevel);
                if let Some(handle) = self.valid_handle(manager) {
                    self.emit(
                        handle,
                        SignalKind::RequestMode,
                        SignalData::Decoration {
                            toplevel: requester,
                            mode,
                        },
                    );
                }
            }
            NativeEvent::Signal { addr, kind } => {
                if let Some(handle) = self.valid_handle(addr) {
                    self.emit(handle, kind, SignalData::None);
                }
            }
        }
    }

    fn valid_handle(&self, addr: RawAddr) -> Option<RawHandle> {
        self.entries
            .get(&addr)
            .filter(|e| e.valid)
            .map(|e| RawHandle::new(addr, e.tag))
    }

    // =========================================================================
    // Lifetime & ownership tracker
    // =========================================================================

    /// The finalizer path: mark the handle invalid immediately, defer node
    /// release until the current dispatch turn completes so the rest of
    /// the destroy chain still runs.
    fn begin_teardown(&mut self, addr: RawAddr) {
        if let Some(entry) = self.entries.get_mut(&addr) {
            entry.valid = false;
            if !self.teardown.contains(&addr) {
                self.teardown.push(addr);
            }
        }
    }

    fn flush_teardown(&mut self) {
        while let Some(addr) = self.teardown.pop() {
            self.finalize(addr);
        }
    }

    /// Release everything still attached to a dead handle. Never calls
    /// into the toolkit: the native side already freed the memory.
    fn finalize(&mut self, addr: RawAddr) {
        if let Some(entry) = self.entries.remove(&addr) {
            for id in entry.listeners {
                self.listeners.release(id);
            }
            self.chains.retain(|(a, _), _| *a != addr);
            tracing::debug!("finalized {}@{:#x}", entry.tag, addr);
        }
    }

    /// Explicit ownership transfer. Returns the updated record.
    pub fn track(&mut self, handle: RawHandle, owner: Owner) -> Result<OwnershipRecord> {
        self.ensure_valid(handle)?;
        let entry = self.entries.get_mut(&handle.addr()).unwrap();
        entry.record.transfer(owner);
        Ok(entry.record)
    }

    /// Current ownership record for a live handle.
    pub fn ownership(&self, handle: RawHandle) -> Result<OwnershipRecord> {
        self.ensure_valid(handle)?;
        Ok(self.entries.get(&handle.addr()).unwrap().record)
    }

    /// Explicitly request native destruction. Only the binding layer may
    /// do this, and only for handles it owns; a handle owned by a native
    /// container fails with `NotOwner` without issuing the native free.
    pub fn destroy(&mut self, handle: RawHandle) -> Result<()> {
        self.ensure_valid(handle)?;
        let entry = self.entries.get(&handle.addr()).unwrap();
        if entry.record.owner() != Owner::Binding {
            return Err(BindingError::not_owner(handle.tag(), handle.addr()));
        }
        tracing::debug!("destroying {}", handle);
        self.native.destroy(handle.addr());
        // Dead to the caller immediately; the Destroyed event drained
        // below runs the destroy chain and the teardown.
        if let Some(entry) = self.entries.get_mut(&handle.addr()) {
            entry.valid = false;
        }
        self.dispatch_events();
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::StubToolkit;

    fn registry() -> (Registry, crate::native::StubControl) {
        let toolkit = StubToolkit::new();
        let control = toolkit.control();
        (Registry::new(Box::new(toolkit)), control)
    }

    #[test]
    fn test_wrap_is_idempotent() {
        let (mut registry, control) = registry();
        let addr = control.spawn(HandleType::Surface);
        let a = registry.wrap(addr, HandleType::Surface);
        let b = registry.wrap(addr, HandleType::Surface);
        assert_eq!(a, b);
        assert!(registry.is_valid(a));
        assert_eq!(registry.handle_for(addr), Some(a));
    }

    #[test]
    fn test_validity_transitions_once() {
        let (mut registry, control) = registry();
        let addr = control.spawn(HandleType::Surface);
        let handle = registry.wrap(addr, HandleType::Surface);
        assert!(registry.is_valid(handle));

        control.destroy_object(addr);
        registry.dispatch_events();
        assert!(!registry.is_valid(handle));

        // Never back to valid, even if an event goes astray.
        registry.dispatch_events();
        assert!(!registry.is_valid(handle));
    }

    #[test]
    fn test_subscribe_requires_valid_handle() {
        let (mut registry, control) = registry();
        let addr = control.spawn(HandleType::Surface);
        let handle = registry.wrap(addr, HandleType::Surface);
        control.destroy_object(addr);
        registry.dispatch_events();

        let err = registry
            .subscribe(handle, SignalKind::Commit, Box::new(|_, _, _| {}))
            .unwrap_err();
        assert_eq!(
            err,
            BindingError::use_after_destroy(HandleType::Surface, addr)
        );
    }

    #[test]
    fn test_external_destroy_updates_bookkeeping_only() {
        let (mut registry, control) = registry();
        let addr = control.spawn(HandleType::Surface);
        let handle = registry.wrap(addr, HandleType::Surface);
        registry.track(handle, Owner::Binding).unwrap();

        // Native side frees the object; the registry must not issue
        // another free even though it owns the handle.
        control.destroy_object(addr);
        registry.dispatch_events();
        assert!(!registry.is_valid(handle));
        assert!(control.calls().is_empty());
    }

    #[test]
    fn test_ownership_gates_destroy() {
        let (mut registry, control) = registry();
        let addr = control.spawn(HandleType::Surface);
        let handle = registry.wrap(addr, HandleType::Surface);

        // Wrapped handles start native-owned.
        assert_eq!(registry.ownership(handle).unwrap().owner(), Owner::Native);
        assert_eq!(
            registry.destroy(handle),
            Err(BindingError::not_owner(HandleType::Surface, addr))
        );
        assert!(registry.is_valid(handle));

        registry.track(handle, Owner::Binding).unwrap();
        registry.destroy(handle).unwrap();
        assert!(!registry.is_valid(handle));
        assert!(!control.object_exists(addr));

        // At most one destroy succeeds.
        assert_eq!(
            registry.destroy(handle),
            Err(BindingError::use_after_destroy(HandleType::Surface, addr))
        );
    }
}
