//! In-memory toolkit stand-in.
//!
//! `StubToolkit` implements [`NativeApi`] against a small object table and
//! an event queue, emulating the destruction cascade the real toolkit
//! performs (a container frees its children before itself, aggregators
//! drop destroyed members). A [`StubControl`] shares the same state so
//! tests and the demo binary can trigger native-side happenings — hotplug
//! an output, emit a frame, destroy an object out from under the binding —
//! and inspect the call log.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::backend::config::BackendVariantKind;
use crate::handle::{HandleType, RawAddr};
use crate::native::{NativeApi, NativeCall, NativeEvent};
use crate::signal::SignalKind;
use crate::types::input::DeviceKind;
use crate::types::output::OutputMode;
use crate::types::shell::DecorationMode;

// ============================================================================
// Call log
// ============================================================================

/// Shared record of every call issued across the native boundary.
#[derive(Clone, Default)]
pub struct CallLog {
    inner: Arc<Mutex<Vec<NativeCall>>>,
}

impl CallLog {
    fn record(&self, call: NativeCall) {
        self.inner.lock().unwrap().push(call);
    }

    pub fn snapshot(&self) -> Vec<NativeCall> {
        self.inner.lock().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn contains(&self, call: &NativeCall) -> bool {
        self.inner.lock().unwrap().iter().any(|c| c == call)
    }

    pub fn clear(&self) {
        self.inner.lock().unwrap().clear();
    }
}

// ============================================================================
// Object table
// ============================================================================

struct StubObject {
    kind: HandleType,
    variant: Option<BackendVariantKind>,
    /// Owning container; destroyed together with it.
    parent: Option<RawAddr>,
    /// Objects this one owns (outputs under a backend, textures under a
    /// renderer). Destroyed child-first on cascade.
    owned: Vec<RawAddr>,
    /// Multi-backend members. Aggregation only; never destroyed by us.
    members: Vec<RawAddr>,
    device: Option<DeviceKind>,
    modes: Vec<OutputMode>,
    name: Option<String>,
    started: bool,
}

impl StubObject {
    fn new(kind: HandleType) -> Self {
        Self {
            kind,
            variant: None,
            parent: None,
            owned: Vec::new(),
            members: Vec::new(),
            device: None,
            modes: Vec::new(),
            name: None,
            started: false,
        }
    }
}

#[derive(Default)]
struct StubState {
    next_addr: RawAddr,
    objects: HashMap<RawAddr, StubObject>,
    events: VecDeque<NativeEvent>,
    fail_next_start: Option<String>,
    time_ms: u32,
}

impl StubState {
    fn alloc(&mut self, object: StubObject) -> RawAddr {
        // Addresses are shaped like pointers so mistakes show up in logs.
        self.next_addr += 0x10;
        let addr = 0x1000 + self.next_addr;
        self.objects.insert(addr, object);
        addr
    }

    /// Native destruction cascade: owned children first (post-order), then
    /// the object itself. Aggregator member lists drop the dead address,
    /// mirroring the toolkit reacting to the member's destroy signal.
    fn destroy(&mut self, addr: RawAddr) {
        let object = match self.objects.remove(&addr) {
            Some(o) => o,
            None => return,
        };
        for child in object.owned {
            self.destroy(child);
        }
        for other in self.objects.values_mut() {
            other.members.retain(|m| *m != addr);
            other.owned.retain(|m| *m != addr);
        }
        self.events.push_back(NativeEvent::Destroyed {
            addr,
            tag: object.kind,
        });
    }

    fn add_output(&mut self, backend: RawAddr, width: u32, height: u32) -> Option<RawAddr> {
        if !self
            .objects
            .get(&backend)
            .map(|o| o.kind == HandleType::Backend)
            .unwrap_or(false)
        {
            return None;
        }
        let mut output = StubObject::new(HandleType::Output);
        output.parent = Some(backend);
        output.modes = vec![OutputMode {
            width,
            height,
            refresh_mhz: 60_000,
            preferred: true,
            current: true,
        }];
        let addr = self.alloc(output);
        self.objects.get_mut(&backend).unwrap().owned.push(addr);
        self.events
            .push_back(NativeEvent::NewOutput { backend, output: addr });
        Some(addr)
    }
}

// ============================================================================
// Toolkit and control handle
// ============================================================================

/// The [`NativeApi`] half. Box this into the registry.
pub struct StubToolkit {
    state: Arc<Mutex<StubState>>,
    log: CallLog,
}

/// The test/demo half: triggers native-side happenings and inspects calls.
#[derive(Clone)]
pub struct StubControl {
    state: Arc<Mutex<StubState>>,
    log: CallLog,
}

impl StubToolkit {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(StubState::default())),
            log: CallLog::default(),
        }
    }

    /// A control handle sharing this toolkit's state.
    pub fn control(&self) -> StubControl {
        StubControl {
            state: Arc::clone(&self.state),
            log: self.log.clone(),
        }
    }
}

impl Default for StubToolkit {
    fn default() -> Self {
        Self::new()
    }
}

impl StubControl {
    /// Every call the binding layer has issued.
    pub fn calls(&self) -> CallLog {
        self.log.clone()
    }

    /// Create a bare native object outside any backend (e.g. a surface
    /// arriving from a client).
    pub fn spawn(&self, kind: HandleType) -> RawAddr {
        self.state.lock().unwrap().alloc(StubObject::new(kind))
    }

    /// Hotplug an output under a backend.
    pub fn add_output(&self, backend: RawAddr, width: u32, height: u32) -> Option<RawAddr> {
        self.state.lock().unwrap().add_output(backend, width, height)
    }

    /// Hotplug an input device under a backend.
    pub fn add_input(&self, backend: RawAddr, kind: DeviceKind) -> Option<RawAddr> {
        let mut state = self.state.lock().unwrap();
        if !state.objects.contains_key(&backend) {
            return None;
        }
        let mut device = StubObject::new(HandleType::InputDevice);
        device.parent = Some(backend);
        device.device = Some(kind);
        let addr = state.alloc(device);
        state.objects.get_mut(&backend).unwrap().owned.push(addr);
        state.events.push_back(NativeEvent::NewInput {
            backend,
            device: addr,
            kind,
        });
        Some(addr)
    }

    /// Emit a frame on an output with a monotonically increasing timestamp.
    pub fn emit_frame(&self, output: RawAddr) {
        let mut state = self.state.lock().unwrap();
        state.time_ms += 16;
        let time_ms = state.time_ms;
        state
            .events
            .push_back(NativeEvent::Frame { output, time_ms });
    }

    /// A client asks the decoration manager for a mode on a toplevel.
    pub fn request_mode(&self, manager: RawAddr, toplevel: RawAddr, mode: DecorationMode) {
        self.state
            .lock()
            .unwrap()
            .events
            .push_back(NativeEvent::RequestMode {
                manager,
                toplevel,
                mode,
            });
    }

    /// Forward an arbitrary toolkit signal (commit, map, key, ...).
    pub fn emit(&self, addr: RawAddr, kind: SignalKind) {
        self.state
            .lock()
            .unwrap()
            .events
            .push_back(NativeEvent::Signal { addr, kind });
    }

    /// Destroy an object from the native side, as a client disconnect or a
    /// parent container would. Not a binding call; not logged.
    pub fn destroy_object(&self, addr: RawAddr) {
        self.state.lock().unwrap().destroy(addr);
    }

    /// Make the next `start_backend` call fail with the given message.
    pub fn fail_next_start(&self, message: impl Into<String>) {
        self.state.lock().unwrap().fail_next_start = Some(message.into());
    }

    pub fn object_exists(&self, addr: RawAddr) -> bool {
        self.state.lock().unwrap().objects.contains_key(&addr)
    }

    pub fn object_count(&self) -> usize {
        self.state.lock().unwrap().objects.len()
    }
}

impl NativeApi for StubToolkit {
    fn create_backend(&mut self, variant: BackendVariantKind) -> Result<RawAddr, String> {
        self.log.record(NativeCall::CreateBackend { variant });
        let mut object = StubObject::new(HandleType::Backend);
        object.variant = Some(variant);
        Ok(self.state.lock().unwrap().alloc(object))
    }

    fn start_backend(&mut self, backend: RawAddr) -> Result<(), String> {
        self.log.record(NativeCall::StartBackend { addr: backend });
        let mut state = self.state.lock().unwrap();
        if let Some(message) = state.fail_next_start.take() {
            return Err(message);
        }
        match state.objects.get_mut(&backend) {
            Some(object) if object.kind == HandleType::Backend => {
                object.started = true;
                Ok(())
            }
            _ => Err(format!("no such backend: {:#x}", backend)),
        }
    }

    fn destroy(&mut self, addr: RawAddr) {
        self.log.record(NativeCall::Destroy { addr });
        self.state.lock().unwrap().destroy(addr);
    }

    fn backend_outputs(&mut self, backend: RawAddr) -> Vec<RawAddr> {
        self.log.record(NativeCall::BackendOutputs { addr: backend });
        let state = self.state.lock().unwrap();
        state
            .objects
            .get(&backend)
            .map(|o| {
                o.owned
                    .iter()
                    .copied()
                    .filter(|a| {
                        state
                            .objects
                            .get(a)
                            .map(|c| c.kind == HandleType::Output)
                            .unwrap_or(false)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn headless_add_output(
        &mut self,
        backend: RawAddr,
        width: u32,
        height: u32,
    ) -> Result<RawAddr, String> {
        self.log.record(NativeCall::HeadlessAddOutput { backend });
        self.state
            .lock()
            .unwrap()
            .add_output(backend, width, height)
            .ok_or_else(|| format!("no such backend: {:#x}", backend))
    }

    fn multi_add_child(&mut self, multi: RawAddr, child: RawAddr) -> Result<(), String> {
        self.log.record(NativeCall::MultiAddChild { multi, child });
        let mut state = self.state.lock().unwrap();
        if !state.objects.contains_key(&child) {
            return Err(format!("no such child backend: {:#x}", child));
        }
        match state.objects.get_mut(&multi) {
            Some(object) if object.variant == Some(BackendVariantKind::Multi) => {
                object.members.push(child);
                Ok(())
            }
            _ => Err(format!("not a multi backend: {:#x}", multi)),
        }
    }

    fn multi_children(&mut self, multi: RawAddr) -> Vec<RawAddr> {
        self.log.record(NativeCall::MultiChildren { multi });
        self.state
            .lock()
            .unwrap()
            .objects
            .get(&multi)
            .map(|o| o.members.clone())
            .unwrap_or_default()
    }

    fn create_renderer(&mut self, backend: RawAddr) -> Result<RawAddr, String> {
        self.log.record(NativeCall::CreateRenderer { backend });
        let mut state = self.state.lock().unwrap();
        if !state.objects.contains_key(&backend) {
            return Err(format!("no such backend: {:#x}", backend));
        }
        let mut renderer = StubObject::new(HandleType::Renderer);
        renderer.parent = Some(backend);
        let addr = state.alloc(renderer);
        state.objects.get_mut(&backend).unwrap().owned.push(addr);
        Ok(addr)
    }

    fn create_texture(
        &mut self,
        renderer: RawAddr,
        _width: u32,
        _height: u32,
    ) -> Result<RawAddr, String> {
        self.log.record(NativeCall::CreateTexture { renderer });
        let mut state = self.state.lock().unwrap();
        if !state.objects.contains_key(&renderer) {
            return Err(format!("no such renderer: {:#x}", renderer));
        }
        let mut texture = StubObject::new(HandleType::Texture);
        texture.parent = Some(renderer);
        let addr = state.alloc(texture);
        state.objects.get_mut(&renderer).unwrap().owned.push(addr);
        Ok(addr)
    }

    fn create_seat(&mut self, name: &str) -> Result<RawAddr, String> {
        self.log.record(NativeCall::CreateSeat {
            name: name.to_string(),
        });
        let mut seat = StubObject::new(HandleType::Seat);
        seat.name = Some(name.to_string());
        Ok(self.state.lock().unwrap().alloc(seat))
    }

    fn create_manager(&mut self, tag: HandleType) -> Result<RawAddr, String> {
        self.log.record(NativeCall::CreateManager { tag });
        if !tag.is_manager() {
            return Err(format!("not a manager type: {}", tag));
        }
        Ok(self.state.lock().unwrap().alloc(StubObject::new(tag)))
    }

    fn output_modes(&mut self, output: RawAddr) -> Vec<OutputMode> {
        self.log.record(NativeCall::OutputModes { output });
        self.state
            .lock()
            .unwrap()
            .objects
            .get(&output)
            .map(|o| o.modes.clone())
            .unwrap_or_default()
    }

    fn drain_events(&mut self) -> Vec<NativeEvent> {
        self.state.lock().unwrap().events.drain(..).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
