//! Native call boundary.
//!
//! All traffic into the toolkit flows through [`NativeApi`]; everything
//! flowing back out is drained as [`NativeEvent`]s by
//! [`Registry::dispatch_events`](crate::registry::Registry::dispatch_events).
//! The polling shape keeps callback dispatch on the thread that drives the
//! event loop, matching the toolkit's single-threaded model.
//!
//! The in-tree [`StubToolkit`](stub::StubToolkit) emulates toolkit
//! behavior in memory and records every call, so tests can assert both
//! wrapper semantics and the absence of native calls on rejected input.

pub mod stub;

pub use stub::{CallLog, StubControl, StubToolkit};

use crate::backend::config::BackendVariantKind;
use crate::handle::{HandleType, RawAddr};
use crate::signal::SignalKind;
use crate::types::input::DeviceKind;
use crate::types::output::OutputMode;
use crate::types::shell::DecorationMode;

/// One native-side happening, drained during dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeEvent {
    /// An object was freed on the native side (explicitly by us or by its
    /// container). The registry finalizes the wrapper in response.
    Destroyed { addr: RawAddr, tag: HandleType },
    /// A backend grew a new output.
    NewOutput { backend: RawAddr, output: RawAddr },
    /// A backend grew a new input device.
    NewInput {
        backend: RawAddr,
        device: RawAddr,
        kind: DeviceKind,
    },
    /// An output produced a frame.
    Frame { output: RawAddr, time_ms: u32 },
    /// A client asked the decoration manager for a mode on a toplevel.
    RequestMode {
        manager: RawAddr,
        toplevel: RawAddr,
        mode: DecorationMode,
    },
    /// Any other toolkit signal, forwarded verbatim.
    Signal { addr: RawAddr, kind: SignalKind },
}

/// One call issued across the native boundary, as recorded by the stub.
/// Event draining is not logged; it happens on every dispatch turn.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeCall {
    CreateBackend { variant: BackendVariantKind },
    StartBackend { addr: RawAddr },
    Destroy { addr: RawAddr },
    BackendOutputs { addr: RawAddr },
    HeadlessAddOutput { backend: RawAddr },
    MultiAddChild { multi: RawAddr, child: RawAddr },
    MultiChildren { multi: RawAddr },
    CreateRenderer { backend: RawAddr },
    CreateTexture { renderer: RawAddr },
    CreateSeat { name: String },
    CreateManager { tag: HandleType },
    OutputModes { output: RawAddr },
}

/// The narrow surface of the native toolkit used by the binding layer.
///
/// Errors cross this boundary as plain messages; the registry attaches
/// variant/handle context when converting them to `BindingError`. Not
/// `Send`: the toolkit is single-threaded and so is the registry.
pub trait NativeApi {
    /// Construct a backend of the given variant. Configuration has already
    /// been validated by the adapter; this maps to the variant-specific
    /// native constructor.
    fn create_backend(&mut self, variant: BackendVariantKind) -> Result<RawAddr, String>;

    /// Start a backend. Blocks on native I/O (opening a DRM device,
    /// connecting to a parent display).
    fn start_backend(&mut self, backend: RawAddr) -> Result<(), String>;

    /// Issue the native destructor. Destruction is observed afterwards via
    /// `Destroyed` events (children first, then the object itself).
    fn destroy(&mut self, addr: RawAddr);

    /// Enumerate the outputs currently owned by a backend.
    fn backend_outputs(&mut self, backend: RawAddr) -> Vec<RawAddr>;

    /// Add a virtual output to a headless backend.
    fn headless_add_output(
        &mut self,
        backend: RawAddr,
        width: u32,
        height: u32,
    ) -> Result<RawAddr, String>;

    /// Attach a child to a multi backend. Aggregation only: the child's
    /// ownership is unaffected.
    fn multi_add_child(&mut self, multi: RawAddr, child: RawAddr) -> Result<(), String>;

    /// Current members of a multi backend.
    fn multi_children(&mut self, multi: RawAddr) -> Vec<RawAddr>;

    /// Autocreate a renderer for a backend.
    fn create_renderer(&mut self, backend: RawAddr) -> Result<RawAddr, String>;

    /// Upload pixel data into a new texture.
    fn create_texture(
        &mut self,
        renderer: RawAddr,
        width: u32,
        height: u32,
    ) -> Result<RawAddr, String>;

    /// Create a named seat.
    fn create_seat(&mut self, name: &str) -> Result<RawAddr, String>;

    /// Create a protocol-extension manager singleton.
    fn create_manager(&mut self, tag: HandleType) -> Result<RawAddr, String>;

    /// Modes advertised by an output.
    fn output_modes(&mut self, output: RawAddr) -> Vec<OutputMode>;

    /// Drain pending native-side events. Called repeatedly per dispatch
    /// turn until empty.
    fn drain_events(&mut self) -> Vec<NativeEvent>;
}
