//! Output (display/monitor) wrapper.

use crate::errors::Result;
use crate::registry::Registry;
use crate::signal::{ListenerId, SignalCallback, SignalKind};
use crate::types::typed_handle;

/// One advertised output mode (resolution/refresh rate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputMode {
    pub width: u32,
    pub height: u32,
    /// Refresh rate in millihertz.
    pub refresh_mhz: u32,
    pub preferred: bool,
    pub current: bool,
}

typed_handle!(
    /// A display output owned by its backend. The backend frees it on
    /// unplug or backend destruction; the binding layer observes.
    OutputHandle => Output
);

impl OutputHandle {
    /// Subscribe to per-frame callbacks.
    pub fn on_frame(
        &self,
        registry: &mut Registry,
        callback: SignalCallback,
    ) -> Result<ListenerId> {
        registry.subscribe(self.handle(), SignalKind::Frame, callback)
    }

    /// Subscribe to mode-change notifications.
    pub fn on_mode_changed(
        &self,
        registry: &mut Registry,
        callback: SignalCallback,
    ) -> Result<ListenerId> {
        registry.subscribe(self.handle(), SignalKind::ModeChanged, callback)
    }

    /// Modes advertised by this output.
    pub fn modes(&self, registry: &mut Registry) -> Result<Vec<OutputMode>> {
        registry.ensure_valid(self.handle())?;
        Ok(registry.native_mut().output_modes(self.handle().addr()))
    }

    /// The mode currently programmed, if any.
    pub fn current_mode(&self, registry: &mut Registry) -> Result<Option<OutputMode>> {
        Ok(self.modes(registry)?.into_iter().find(|m| m.current))
    }

    /// The mode the output prefers, if it advertises one.
    pub fn preferred_mode(&self, registry: &mut Registry) -> Result<Option<OutputMode>> {
        Ok(self.modes(registry)?.into_iter().find(|m| m.preferred))
    }
}
