//! Clipboard and selection manager wrappers.

use crate::errors::Result;
use crate::registry::Registry;
use crate::signal::{ListenerId, SignalCallback, SignalKind};
use crate::types::manager_handle;

manager_handle!(
    /// The core data-device (clipboard and drag-and-drop) global.
    DataDeviceManager => DataDeviceManager
);

impl DataDeviceManager {
    /// Subscribe to a new selection being set.
    pub fn on_selection_set(
        &self,
        registry: &mut Registry,
        callback: SignalCallback,
    ) -> Result<ListenerId> {
        registry.subscribe(self.handle(), SignalKind::SelectionSet, callback)
    }
}

manager_handle!(
    /// Primary selection (middle-click paste) global.
    PrimarySelectionManager => PrimarySelection
);

impl PrimarySelectionManager {
    pub fn on_selection_set(
        &self,
        registry: &mut Registry,
        callback: SignalCallback,
    ) -> Result<ListenerId> {
        registry.subscribe(self.handle(), SignalKind::SelectionSet, callback)
    }
}

manager_handle!(
    /// Data-control global: privileged clipboard access for clipboard
    /// managers.
    DataControlManager => DataControl
);
