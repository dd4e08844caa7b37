//! Input device wrappers.
//!
//! Devices arrive through a backend's `NewInput` signal and die with the
//! backend or on unplug; they are always native-owned.

use crate::errors::Result;
use crate::handle::RawHandle;
use crate::registry::Registry;
use crate::signal::{ListenerId, SignalCallback, SignalKind};

/// The toolkit's input device families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    Keyboard,
    Pointer,
    Touch,
    TabletTool,
    TabletPad,
    Switch,
}

/// One input device under a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputDevice {
    handle: RawHandle,
    kind: DeviceKind,
}

impl InputDevice {
    pub fn new(handle: RawHandle, kind: DeviceKind) -> Self {
        Self { handle, kind }
    }

    pub fn handle(&self) -> RawHandle {
        self.handle
    }

    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    pub fn is_valid(&self, registry: &Registry) -> bool {
        registry.is_valid(self.handle)
    }

    pub fn on_destroy(
        &self,
        registry: &mut Registry,
        callback: SignalCallback,
    ) -> Result<ListenerId> {
        registry.subscribe(self.handle, SignalKind::Destroy, callback)
    }

    /// Subscribe to key press/release events (keyboards).
    pub fn on_key(
        &self,
        registry: &mut Registry,
        callback: SignalCallback,
    ) -> Result<ListenerId> {
        registry.subscribe(self.handle, SignalKind::Key, callback)
    }

    /// Subscribe to modifier updates (keyboards).
    pub fn on_modifiers(
        &self,
        registry: &mut Registry,
        callback: SignalCallback,
    ) -> Result<ListenerId> {
        registry.subscribe(self.handle, SignalKind::Modifiers, callback)
    }

    /// Subscribe to button events (pointers, tablet tools).
    pub fn on_button(
        &self,
        registry: &mut Registry,
        callback: SignalCallback,
    ) -> Result<ListenerId> {
        registry.subscribe(self.handle, SignalKind::Button, callback)
    }

    /// Subscribe to motion events (pointers, touch, tablet tools).
    pub fn on_motion(
        &self,
        registry: &mut Registry,
        callback: SignalCallback,
    ) -> Result<ListenerId> {
        registry.subscribe(self.handle, SignalKind::Motion, callback)
    }

    /// Subscribe to axis (scroll) events.
    pub fn on_axis(
        &self,
        registry: &mut Registry,
        callback: SignalCallback,
    ) -> Result<ListenerId> {
        registry.subscribe(self.handle, SignalKind::Axis, callback)
    }
}
