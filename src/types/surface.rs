//! Surface wrapper.
//!
//! Surfaces belong to clients; they appear and disappear with client
//! state and are always native-owned from the binding layer's point of
//! view.

use crate::errors::Result;
use crate::handle::{HandleType, RawAddr};
use crate::registry::Registry;
use crate::signal::{ListenerId, SignalCallback, SignalKind};
use crate::types::typed_handle;

typed_handle!(
    /// A client surface. Native-owned; invalidated when the client
    /// destroys it or disconnects.
    SurfaceHandle => Surface
);

impl Registry {
    /// Wrap a surface address handed over by the toolkit (a client
    /// surface reaching the compositor). Native-owned, like every wrap.
    pub fn wrap_surface(&mut self, addr: RawAddr) -> SurfaceHandle {
        SurfaceHandle::from_raw(self.wrap(addr, HandleType::Surface))
    }
}

impl SurfaceHandle {
    /// Subscribe to commit notifications (new state applied).
    pub fn on_commit(
        &self,
        registry: &mut Registry,
        callback: SignalCallback,
    ) -> Result<ListenerId> {
        registry.subscribe(self.handle(), SignalKind::Commit, callback)
    }

    /// Subscribe to map notifications (surface becomes displayable).
    pub fn on_map(
        &self,
        registry: &mut Registry,
        callback: SignalCallback,
    ) -> Result<ListenerId> {
        registry.subscribe(self.handle(), SignalKind::Map, callback)
    }

    /// Subscribe to unmap notifications.
    pub fn on_unmap(
        &self,
        registry: &mut Registry,
        callback: SignalCallback,
    ) -> Result<ListenerId> {
        registry.subscribe(self.handle(), SignalKind::Unmap, callback)
    }
}
