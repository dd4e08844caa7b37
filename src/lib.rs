// Tioga
// Copyright (c) 2026
//
// Safe binding layer over a native Wayland compositor toolkit.
// The toolkit's object model (opaque structs, signal/listener chains,
// destructor-driven lifetime) is mirrored by a handle registry that
// tracks validity and ownership across the language boundary.

// ===== Stable surface =====
// These modules do not depend on the toolkit's volatile object layout and
// keep their shape across releases: logging setup, geometry/region
// utilities, and cursor theme loading.
pub mod util;
pub mod xcursor;

pub mod prelude;

// ===== Unstable surface =====
// Everything below tracks toolkit internals that may change shape between
// releases. Usage is a visible opt-in via the `unstable` feature.
#[cfg(feature = "unstable")]
pub mod errors;
#[cfg(feature = "unstable")]
pub mod handle;
#[cfg(feature = "unstable")]
pub mod signal;
#[cfg(feature = "unstable")]
pub mod lifetime;
#[cfg(feature = "unstable")]
pub mod registry;
#[cfg(feature = "unstable")]
pub mod native;
#[cfg(feature = "unstable")]
pub mod backend;
#[cfg(feature = "unstable")]
pub mod render;
#[cfg(feature = "unstable")]
pub mod types;

#[cfg(feature = "unstable")]
pub use errors::{BindingError, Result};
#[cfg(feature = "unstable")]
pub use handle::{HandleType, RawAddr, RawHandle};
#[cfg(feature = "unstable")]
pub use registry::Registry;
#[cfg(feature = "unstable")]
pub use signal::{ListenerId, SignalData, SignalKind};

// Two wlr protocol families reference a protocol schema that is missing
// from the bundled toolkit headers. They can never be emitted, so asking
// for them is a build-time error rather than a runtime surprise.
#[cfg(feature = "layer-shell")]
compile_error!(
    "layer-shell is unavailable: the wlr-layer-shell protocol schema is \
     missing from the bundled toolkit headers. Integrate the native \
     library directly if you need this protocol."
);
#[cfg(feature = "output-power-management")]
compile_error!(
    "output-power-management is unavailable: the protocol schema is \
     missing from the bundled toolkit headers. Integrate the native \
     library directly if you need this protocol."
);

/// Crate version string.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests;
