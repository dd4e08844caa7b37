//! Protocol-extension manager wrappers.
//!
//! All of these share the manager shape: one global, created by the
//! binding layer, observed via signals, destroyed through the lifetime
//! tracker. Layer-shell and output-power-management are deliberately
//! missing; see the crate-level build errors.

use crate::types::manager_handle;

manager_handle!(
    /// Gamma-control global (per-output gamma tables).
    GammaControlManager => GammaControl
);

manager_handle!(
    /// Screencopy global (screen capture into client buffers).
    ScreencopyManager => Screencopy
);

manager_handle!(
    /// Idle-notification global.
    IdleManager => Idle
);

manager_handle!(
    /// Virtual keyboard global (input injection).
    VirtualKeyboardManager => VirtualKeyboard
);

manager_handle!(
    /// Virtual pointer global (pointer injection).
    VirtualPointerManager => VirtualPointer
);

manager_handle!(
    /// Foreign-toplevel-management global (taskbar/dock protocol).
    ForeignToplevelManager => ForeignToplevel
);

manager_handle!(
    /// Presentation-time global (frame timing feedback).
    PresentationManager => Presentation
);

manager_handle!(
    /// Tablet-v2 global (graphics tablet seats).
    TabletManager => TabletManager
);
