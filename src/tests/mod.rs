//! Whole-binding scenarios exercising the registry, the backend adapter,
//! and the stub toolkit together. Unit tests live next to their modules;
//! these cover the cross-module flows.


#[cfg(feature = "unstable")]
mod config_validation;
#[cfg(feature = "unstable")]
mod destroy_order;
#[cfg(feature = "unstable")]
mod dispatch;

#[cfg(feature = "unstable")]
pub(crate) mod support {
    use crate::native::{StubControl, StubToolkit};
    use crate::registry::Registry;

    /// A registry over a fresh stub toolkit, plus the control handle.
    pub fn harness() -> (Registry, StubControl) {
        let toolkit = StubToolkit::new();
        let control = toolkit.control();
        (Registry::new(Box::new(toolkit)), control)
    }
}
