//! Backend polymorphism adapter.
//!
//! One constructor path over the toolkit's heterogeneous backend variants
//! (DRM, nested Wayland, nested X11, headless, libinput, multi). All
//! variants share the same capability surface — start, destroy, enumerate
//! outputs — and the multi variant adds non-owning child aggregation.
//! Configuration is validated before the native constructor runs, so
//! malformed input fails as `InvalidConfig` instead of crossing the
//! boundary.

pub mod config;

pub use config::{
    BackendConfig, BackendVariantKind, DrmConfig, HeadlessConfig, LibinputConfig, WaylandConfig,
    X11Config,
};

use std::collections::VecDeque;

use crate::errors::{BindingError, Result};
use crate::handle::{HandleType, RawHandle};
use crate::lifetime::Owner;
use crate::registry::Registry;
use crate::types::output::OutputHandle;

/// A started-or-startable backend. Binding-owned: created here, destroyed
/// via [`Registry::destroy`] on its handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backend {
    handle: RawHandle,
    variant: BackendVariantKind,
}

impl Backend {
    pub fn handle(&self) -> RawHandle {
        self.handle
    }

    pub fn variant(&self) -> BackendVariantKind {
        self.variant
    }

    pub fn is_valid(&self, registry: &Registry) -> bool {
        registry.is_valid(self.handle)
    }
}

/// Lazy cursor over a backend's outputs, snapshotted at enumeration time.
///
/// Finite and not restartable: once the backend is destroyed the cursor
/// yields nothing, and outputs destroyed since enumeration are skipped.
/// Not an `Iterator` — each step re-checks validity against the registry.
pub struct Outputs {
    backend: RawHandle,
    pending: VecDeque<RawHandle>,
}

impl Outputs {
    pub fn next(&mut self, registry: &Registry) -> Option<OutputHandle> {
        if !registry.is_valid(self.backend) {
            self.pending.clear();
            return None;
        }
        while let Some(handle) = self.pending.pop_front() {
            if registry.is_valid(handle) {
                return Some(OutputHandle::from_raw(handle));
            }
        }
        None
    }

    /// Remaining candidates (an upper bound; dead outputs are skipped).
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Drain the cursor into a vector.
    pub fn collect(mut self, registry: &Registry) -> Vec<OutputHandle> {
        let mut outputs = Vec::with_capacity(self.pending.len());
        while let Some(output) = self.next(registry) {
            outputs.push(output);
        }
        outputs
    }
}

impl Registry {
    // =========================================================================
    // Backend adapter
    // =========================================================================

    /// Validate `config` and dispatch to the variant-specific native
    /// constructor. The resulting backend is binding-owned.
    pub fn create_backend(&mut self, config: &BackendConfig) -> Result<Backend> {
        config.validate()?;
        let variant = config.kind();
        let addr = self
            .native_mut()
            .create_backend(variant)
            .map_err(|message| BindingError::backend_error(variant, message))?;
        let handle = self.wrap(addr, HandleType::Backend);
        self.track(handle, Owner::Binding)?;
        tracing::debug!("created {} backend {}", variant, handle);
        Ok(Backend { handle, variant })
    }

    /// Start the backend. Blocks on native I/O; failure is reported once,
    /// never retried here.
    pub fn start_backend(&mut self, backend: &Backend) -> Result<()> {
        self.ensure_valid(backend.handle)?;
        self.native_mut()
            .start_backend(backend.handle.addr())
            .map_err(|message| BindingError::backend_error(backend.variant, message))?;
        tracing::debug!("started {} backend {}", backend.variant, backend.handle);
        // Starting may immediately surface outputs and input devices.
        self.dispatch_events();
        Ok(())
    }

    /// Snapshot the backend's current outputs into a lazy cursor.
    pub fn enumerate_outputs(&mut self, backend: &Backend) -> Result<Outputs> {
        self.ensure_valid(backend.handle)?;
        let addrs = self.native_mut().backend_outputs(backend.handle.addr());
        let pending = addrs
            .into_iter()
            .map(|addr| self.wrap(addr, HandleType::Output))
            .collect();
        Ok(Outputs {
            backend: backend.handle,
            pending,
        })
    }

    /// Add a virtual output to a headless backend. The output is owned by
    /// the backend (native side), the same as a hotplugged display.
    pub fn add_headless_output(
        &mut self,
        backend: &Backend,
        width: u32,
        height: u32,
    ) -> Result<OutputHandle> {
        if backend.variant != BackendVariantKind::Headless {
            return Err(BindingError::invalid_config(
                backend.variant.to_string(),
                "only headless backends take virtual outputs",
            ));
        }
        self.ensure_valid(backend.handle)?;
        let addr = self
            .native_mut()
            .headless_add_output(backend.handle.addr(), width, height)
            .map_err(|message| BindingError::backend_error(backend.variant, message))?;
        // Drain the NewOutput event so subscribers see it before we return.
        self.dispatch_events();
        Ok(OutputHandle::from_raw(self.wrap(addr, HandleType::Output)))
    }

    // =========================================================================
    // Multi backend
    // =========================================================================

    /// Attach a child backend to a multi backend. Aggregation only: the
    /// multi forwards the child's events but takes no destruction
    /// authority, so the child's ownership record is untouched.
    pub fn multi_add_child(&mut self, multi: &Backend, child: &Backend) -> Result<()> {
        if multi.variant != BackendVariantKind::Multi {
            return Err(BindingError::invalid_config(
                multi.variant.to_string(),
                "not a multi backend",
            ));
        }
        self.ensure_valid(multi.handle)?;
        self.ensure_valid(child.handle)?;
        self.native_mut()
            .multi_add_child(multi.handle.addr(), child.handle.addr())
            .map_err(|message| BindingError::backend_error(multi.variant, message))?;
        tracing::debug!("multi {} aggregates {}", multi.handle, child.handle);
        Ok(())
    }

    /// The multi backend's current members. Children destroyed since they
    /// were added have already been dropped by the native aggregator.
    pub fn multi_children(&mut self, multi: &Backend) -> Result<Vec<RawHandle>> {
        if multi.variant != BackendVariantKind::Multi {
            return Err(BindingError::invalid_config(
                multi.variant.to_string(),
                "not a multi backend",
            ));
        }
        self.ensure_valid(multi.handle)?;
        let children = self
            .native_mut()
            .multi_children(multi.handle.addr())
            .into_iter()
            .map(|addr| self.wrap(addr, HandleType::Backend))
            .collect();
        Ok(children)
    }
}
