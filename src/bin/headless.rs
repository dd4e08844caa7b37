// Tioga
// Copyright (c) 2026
//
// Headless demo: drives the binding layer against the stub toolkit.
// Creates a headless backend, hotplugs an output, pumps a few frames,
// then tears everything down while logging what the registry observes.

use anyhow::Result;
use tracing::info;

use tioga::backend::{BackendConfig, HeadlessConfig};
use tioga::native::StubToolkit;
use tioga::registry::Registry;
use tioga::signal::{SignalData, SignalKind};
use tioga::tlog;
use tioga::util::logging::{self, module};

fn main() -> Result<()> {
    logging::init();
    tlog!(module::DEMO, "tioga {} headless demo", tioga::version());

    let toolkit = StubToolkit::new();
    let control = toolkit.control();
    let mut registry = Registry::new(Box::new(toolkit));

    let backend = registry.create_backend(&BackendConfig::Headless(HeadlessConfig::default()))?;
    registry.start_backend(&backend)?;
    info!(variant = %backend.variant(), "backend started");

    registry.subscribe(
        backend.handle(),
        SignalKind::NewOutput,
        Box::new(|_, _, data| {
            if let SignalData::Handle(output) = data {
                info!(%output, "output appeared");
            }
        }),
    )?;

    let output = registry.add_headless_output(&backend, 1920, 1080)?;
    if let Some(mode) = output.preferred_mode(&mut registry)? {
        info!(
            width = mode.width,
            height = mode.height,
            refresh_mhz = mode.refresh_mhz,
            "preferred mode"
        );
    }

    output.on_frame(
        &mut registry,
        Box::new(|_, _, data| {
            if let SignalData::Time { ms } = data {
                info!(time_ms = ms, "frame");
            }
        }),
    )?;
    output.on_destroy(
        &mut registry,
        Box::new(|_, emitter, _| {
            info!(%emitter, "output destroyed");
        }),
    )?;

    for _ in 0..3 {
        control.emit_frame(output.handle().addr());
    }
    let routed = registry.dispatch_events();
    info!(routed, "event queue drained");

    registry.destroy(backend.handle())?;
    info!(
        calls = control.calls().len(),
        objects = control.object_count(),
        "session complete"
    );
    Ok(())
}
