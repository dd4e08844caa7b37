//! Shell and decoration wrappers.

use crate::errors::Result;
use crate::handle::{HandleType, RawAddr};
use crate::registry::Registry;
use crate::signal::{ListenerId, SignalCallback, SignalKind};
use crate::types::{manager_handle, typed_handle};

/// Decoration mode negotiated between client and compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecorationMode {
    /// Client draws its own decorations (CSD).
    ClientSide,
    /// Compositor draws decorations (SSD).
    #[default]
    ServerSide,
}

manager_handle!(
    /// The xdg-shell global: clients create toplevels and popups through
    /// it.
    XdgShellManager => XdgShell
);

manager_handle!(
    /// The xdg-decoration global, negotiating CSD vs SSD per toplevel.
    DecorationManager => Decoration
);

impl DecorationManager {
    /// Subscribe to clients requesting a decoration mode.
    pub fn on_request_mode(
        &self,
        registry: &mut Registry,
        callback: SignalCallback,
    ) -> Result<ListenerId> {
        registry.subscribe(self.handle(), SignalKind::RequestMode, callback)
    }
}

typed_handle!(
    /// A toplevel window surface. Native-owned: it dies with the client
    /// surface it decorates.
    ToplevelHandle => Toplevel
);

impl Registry {
    /// Wrap a toplevel address handed over by the shell. Native-owned.
    pub fn wrap_toplevel(&mut self, addr: RawAddr) -> ToplevelHandle {
        ToplevelHandle::from_raw(self.wrap(addr, HandleType::Toplevel))
    }

    /// Wrap a popup address handed over by the shell. Native-owned.
    pub fn wrap_popup(&mut self, addr: RawAddr) -> PopupHandle {
        PopupHandle::from_raw(self.wrap(addr, HandleType::Popup))
    }
}

impl ToplevelHandle {
    pub fn on_map(
        &self,
        registry: &mut Registry,
        callback: SignalCallback,
    ) -> Result<ListenerId> {
        registry.subscribe(self.handle(), SignalKind::Map, callback)
    }

    pub fn on_unmap(
        &self,
        registry: &mut Registry,
        callback: SignalCallback,
    ) -> Result<ListenerId> {
        registry.subscribe(self.handle(), SignalKind::Unmap, callback)
    }
}

typed_handle!(
    /// A popup surface positioned relative to a parent.
    PopupHandle => Popup
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::native::StubToolkit;
    use crate::signal::SignalData;

    #[test]
    fn test_decoration_request_carries_mode_and_toplevel() {
        let toolkit = StubToolkit::new();
        let control = toolkit.control();
        let mut registry = Registry::new(Box::new(toolkit));

        let manager = DecorationManager::create(&mut registry).unwrap();
        let toplevel_addr = control.spawn(HandleType::Toplevel);
        let toplevel = registry.wrap_toplevel(toplevel_addr);

        let requests = Rc::new(RefCell::new(Vec::new()));
        let requests_in = Rc::clone(&requests);
        manager
            .on_request_mode(
                &mut registry,
                Box::new(move |_, _, data| {
                    if let SignalData::Decoration { toplevel, mode } = data {
                        requests_in.borrow_mut().push((*toplevel, *mode));
                    }
                }),
            )
            .unwrap();

        control.request_mode(
            manager.handle().addr(),
            toplevel_addr,
            DecorationMode::ClientSide,
        );
        registry.dispatch_events();

        assert_eq!(
            *requests.borrow(),
            vec![(toplevel.handle(), DecorationMode::ClientSide)]
        );
    }
}
