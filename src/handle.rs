//! Raw handle layer.
//!
//! A handle is a native address plus a type tag — nothing more. It carries
//! no behavior and no liveness information of its own; validity lives in
//! the [`Registry`](crate::registry::Registry), which observes the
//! toolkit's destroy signals. Constructing a handle never takes ownership
//! and never validates the address: the caller guarantees it came out of a
//! just-returned native call.

use std::fmt;

/// Opaque native object address. Never dereferenced by this crate; it is
/// only an identity the toolkit hands back to us.
pub type RawAddr = u64;

/// Type tag for a wrapped toolkit object.
///
/// One variant per wrapped object family from the toolkit headers. The
/// layer-shell and output-power-management families are deliberately
/// absent (missing protocol schema upstream).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleType {
    Backend,
    Output,
    Surface,
    Seat,
    InputDevice,
    Renderer,
    Texture,
    Buffer,
    Toplevel,
    Popup,
    // Protocol extension managers
    XdgShell,
    Decoration,
    DataDeviceManager,
    PrimarySelection,
    DataControl,
    GammaControl,
    Screencopy,
    Idle,
    VirtualKeyboard,
    VirtualPointer,
    ForeignToplevel,
    Presentation,
    TabletManager,
}

impl HandleType {
    /// True for the protocol-extension manager singletons (create once,
    /// destroy with the display).
    pub fn is_manager(&self) -> bool {
        matches!(
            self,
            HandleType::XdgShell
                | HandleType::Decoration
                | HandleType::DataDeviceManager
                | HandleType::PrimarySelection
                | HandleType::DataControl
                | HandleType::GammaControl
                | HandleType::Screencopy
                | HandleType::Idle
                | HandleType::VirtualKeyboard
                | HandleType::VirtualPointer
                | HandleType::ForeignToplevel
                | HandleType::Presentation
                | HandleType::TabletManager
        )
    }
}

impl fmt::Display for HandleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Opaque reference to one native toolkit object.
///
/// Copyable and cheap; holding one does not keep the object alive. Check
/// [`Registry::is_valid`](crate::registry::Registry::is_valid) before use,
/// or rely on the registry reporting `UseAfterDestroy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawHandle {
    addr: RawAddr,
    tag: HandleType,
}

impl RawHandle {
    pub(crate) fn new(addr: RawAddr, tag: HandleType) -> Self {
        Self { addr, tag }
    }

    /// The native address. Identity only — never dereferenced.
    pub fn addr(&self) -> RawAddr {
        self.addr
    }

    /// The type tag assigned at wrap time.
    pub fn tag(&self) -> HandleType {
        self.tag
    }
}

impl fmt::Display for RawHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:#x}", self.tag, self.addr)
    }
}
