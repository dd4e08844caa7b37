//! Typed wrappers for the toolkit's object families.
//!
//! Every wrapped type is an opaque handle plus its operation set; no
//! native struct layout leaks through. The long tail of protocol
//! extension managers all have the same shape — create the global,
//! observe signals, destroy through the lifetime tracker — so they are
//! generated by the `manager_handle!` macro below.

pub mod extensions;
pub mod input;
pub mod output;
pub mod seat;
pub mod selection;
pub mod shell;
pub mod surface;

use crate::errors::{BindingError, Result};
use crate::handle::{HandleType, RawHandle};
use crate::lifetime::Owner;
use crate::registry::Registry;

/// Defines an opaque typed handle over [`RawHandle`] with the shared
/// validity and destroy-signal surface.
macro_rules! typed_handle {
    ($(#[$meta:meta])* $name:ident => $tag:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(crate::handle::RawHandle);

        impl $name {
            pub(crate) fn from_raw(handle: crate::handle::RawHandle) -> Self {
                debug_assert_eq!(handle.tag(), crate::handle::HandleType::$tag);
                Self(handle)
            }

            pub fn handle(&self) -> crate::handle::RawHandle {
                self.0
            }

            pub fn is_valid(&self, registry: &crate::registry::Registry) -> bool {
                registry.is_valid(self.0)
            }

            /// Subscribe to this object's destroy signal.
            pub fn on_destroy(
                &self,
                registry: &mut crate::registry::Registry,
                callback: crate::signal::SignalCallback,
            ) -> crate::errors::Result<crate::signal::ListenerId> {
                registry.subscribe(self.0, crate::signal::SignalKind::Destroy, callback)
            }
        }
    };
}
pub(crate) use typed_handle;

/// A typed handle that is also a protocol-extension manager global:
/// created once by the binding layer, destroyed through the tracker.
macro_rules! manager_handle {
    ($(#[$meta:meta])* $name:ident => $tag:ident) => {
        crate::types::typed_handle!($(#[$meta])* $name => $tag);

        impl $name {
            /// Create the manager global. Binding-owned.
            pub fn create(
                registry: &mut crate::registry::Registry,
            ) -> crate::errors::Result<Self> {
                let handle = registry.create_manager(crate::handle::HandleType::$tag)?;
                Ok(Self::from_raw(handle))
            }

            /// Destroy the manager global.
            pub fn destroy(
                self,
                registry: &mut crate::registry::Registry,
            ) -> crate::errors::Result<()> {
                registry.destroy(self.0)
            }
        }
    };
}
pub(crate) use manager_handle;

impl Registry {
    /// Create a protocol-extension manager global of the given tag.
    pub fn create_manager(&mut self, tag: HandleType) -> Result<RawHandle> {
        let addr = self
            .native_mut()
            .create_manager(tag)
            .map_err(|message| BindingError::invalid_config(tag.to_string(), message))?;
        let handle = self.wrap(addr, tag);
        self.track(handle, Owner::Binding)?;
        tracing::debug!("created manager {}", handle);
        Ok(handle)
    }
}
