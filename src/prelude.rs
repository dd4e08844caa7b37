//! One-stop import for binding users.
//!
//! ```rust
//! use tioga::prelude::*;
//! ```

pub use crate::util::edges::Edges;
pub use crate::util::geometry::{Point, Rect, Transform};
pub use crate::util::region::Region;
pub use crate::xcursor::{Cursor, CursorImage, CursorTheme, XCursorError};

#[cfg(feature = "unstable")]
pub use crate::backend::{
    Backend, BackendConfig, BackendVariantKind, DrmConfig, HeadlessConfig, LibinputConfig,
    Outputs, WaylandConfig, X11Config,
};
#[cfg(feature = "unstable")]
pub use crate::errors::{BindingError, Result};
#[cfg(feature = "unstable")]
pub use crate::handle::{HandleType, RawAddr, RawHandle};
#[cfg(feature = "unstable")]
pub use crate::lifetime::Owner;
#[cfg(feature = "unstable")]
pub use crate::registry::Registry;
#[cfg(feature = "unstable")]
pub use crate::signal::{ListenerId, SignalData, SignalKind};
#[cfg(feature = "unstable")]
pub use crate::types::input::{DeviceKind, InputDevice};
#[cfg(feature = "unstable")]
pub use crate::types::output::{OutputHandle, OutputMode};
#[cfg(feature = "unstable")]
pub use crate::types::seat::Seat;
#[cfg(feature = "unstable")]
pub use crate::types::shell::{DecorationMode, PopupHandle, ToplevelHandle};
#[cfg(feature = "unstable")]
pub use crate::types::surface::SurfaceHandle;
