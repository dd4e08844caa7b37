//! Validation failures must stay on this side of the boundary: no native
//! call is issued for configuration the binding layer can reject itself.

use std::path::PathBuf;

use crate::backend::{BackendConfig, BackendVariantKind, DrmConfig, HeadlessConfig, X11Config};
use crate::errors::BindingError;
use crate::tests::support::harness;

#[test]
fn test_bad_drm_config_never_reaches_native() {
    let (mut registry, control) = harness();

    let config = BackendConfig::Drm(DrmConfig {
        device: PathBuf::from("card0"),
    });
    let err = registry.create_backend(&config).unwrap_err();
    assert_eq!(
        err,
        BindingError::invalid_config("drm", "device path must be absolute")
    );
    assert!(err.is_config_error());
    assert!(control.calls().is_empty());
}

#[test]
fn test_bad_x11_display_never_reaches_native() {
    let (mut registry, control) = harness();
    let config = BackendConfig::X11(X11Config {
        display: Some("localhost:0".to_string()),
    });
    assert!(registry.create_backend(&config).is_err());
    assert!(control.calls().is_empty());
}

#[test]
fn test_start_failure_surfaces_as_backend_error() {
    let (mut registry, control) = harness();
    let backend = registry
        .create_backend(&BackendConfig::Headless(HeadlessConfig::default()))
        .unwrap();

    control.fail_next_start("device busy");
    let err = registry.start_backend(&backend).unwrap_err();
    assert_eq!(
        err,
        BindingError::backend_error(BackendVariantKind::Headless, "device busy")
    );
    assert!(err.is_native_failure());

    // The failure is reported once; the backend handle stays usable and a
    // later attempt may succeed.
    assert!(backend.is_valid(&registry));
    registry.start_backend(&backend).unwrap();
}

#[test]
fn test_headless_output_rejected_on_other_variants() {
    let (mut registry, control) = harness();
    let backend = registry
        .create_backend(&BackendConfig::Wayland(Default::default()))
        .unwrap();
    control.calls().clear();

    let err = registry.add_headless_output(&backend, 800, 600).unwrap_err();
    assert!(err.is_config_error());
    assert!(control.calls().is_empty());
}

#[test]
fn test_bad_texture_buffer_never_reaches_native() {
    let (mut registry, control) = harness();
    let backend = registry
        .create_backend(&BackendConfig::Headless(HeadlessConfig::default()))
        .unwrap();
    let renderer = registry.create_renderer(&backend).unwrap();
    control.calls().clear();

    // 3 bytes short of a 2x2 ARGB buffer.
    let pixels = vec![0u8; 2 * 2 * 4 - 3];
    let err = registry.create_texture(&renderer, 2, 2, &pixels).unwrap_err();
    assert!(err.is_config_error());
    assert!(control.calls().is_empty());
}

#[test]
fn test_empty_seat_name_never_reaches_native() {
    let (mut registry, control) = harness();
    let err = registry.create_seat("").unwrap_err();
    assert!(err.is_config_error());
    assert!(control.calls().is_empty());
}
