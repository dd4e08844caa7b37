//! Seat wrapper.

use crate::errors::{BindingError, Result};
use crate::handle::{HandleType, RawHandle};
use crate::lifetime::Owner;
use crate::registry::Registry;
use crate::signal::{ListenerId, SignalCallback, SignalKind};

/// A named seat: the unit of input focus. Binding-owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    handle: RawHandle,
    name: String,
}

impl Seat {
    pub fn handle(&self) -> RawHandle {
        self.handle
    }

    /// The name given at creation ("seat0" by convention).
    pub fn name(&self) -> &str {
        &self.name
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
}

impl Registry {
    /// Create a named seat. The name must be non-empty and printable, the
    /// same contract the toolkit enforces by crashing.
    pub fn create_seat(&mut self, name: &str) -> Result<Seat> {
        if name.is_empty() {
            return Err(BindingError::invalid_config("seat", "name is empty"));
        }
        if name.chars().any(|c| c.is_control()) {
            return Err(BindingError::invalid_config(
                "seat",
                "name must not contain control characters",
            ));
        }
        let addr = self
            .native_mut()
            .create_seat(name)
            .map_err(|message| BindingError::invalid_config("seat", message))?;
        let handle = self.wrap(addr, HandleType::Seat);
        self.track(handle, Owner::Binding)?;
        Ok(Seat {
            handle,
            name: name.to_string(),
        })
    }
}
