//! Backend configuration and validation.
//!
//! Malformed configuration must fail as `InvalidConfig` on this side of
//! the boundary — the native constructors crash or misbehave on garbage
//! input rather than reporting it. Every validator runs before any native
//! call is issued.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::{BindingError, Result};

/// The closed set of backend variants the toolkit provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendVariantKind {
    Drm,
    Wayland,
    X11,
    Headless,
    Libinput,
    Multi,
}

impl fmt::Display for BackendVariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BackendVariantKind::Drm => "drm",
            BackendVariantKind::Wayland => "wayland",
            BackendVariantKind::X11 => "x11",
            BackendVariantKind::Headless => "headless",
            BackendVariantKind::Libinput => "libinput",
            BackendVariantKind::Multi => "multi",
        };
        f.write_str(name)
    }
}

/// DRM backend: a real GPU session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrmConfig {
    /// Render node or card device, e.g. `/dev/dri/card0`.
    pub device: PathBuf,
}

/// Nested session inside a parent Wayland compositor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaylandConfig {
    /// Parent socket name; `None` defers to `$WAYLAND_DISPLAY`.
    pub socket: Option<String>,
}

impl WaylandConfig {
    /// Resolve the socket from the environment, the way the toolkit would.
    pub fn from_env() -> Self {
        Self {
            socket: std::env::var("WAYLAND_DISPLAY").ok(),
        }
    }
}

/// Nested session inside a parent X11 server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct X11Config {
    /// Display name, e.g. `:0` or `:1.0`; `None` defers to `$DISPLAY`.
    pub display: Option<String>,
}

impl X11Config {
    pub fn from_env() -> Self {
        Self {
            display: std::env::var("DISPLAY").ok(),
        }
    }
}

/// Synthetic backend with no real inputs or outputs; outputs are added
/// explicitly after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessConfig {}

/// Input-only backend reading evdev devices for one seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibinputConfig {
    pub seat: String,
}

impl Default for LibinputConfig {
    fn default() -> Self {
        Self {
            seat: "seat0".to_string(),
        }
    }
}

/// Variant-tagged backend configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    Drm(DrmConfig),
    Wayland(WaylandConfig),
    X11(X11Config),
    Headless(HeadlessConfig),
    Libinput(LibinputConfig),
    /// Aggregator over other backends; forwards their events, owns none
    /// of them.
    Multi,
}

impl BackendConfig {
    pub fn kind(&self) -> BackendVariantKind {
        match self {
            BackendConfig::Drm(_) => BackendVariantKind::Drm,
            BackendConfig::Wayland(_) => BackendVariantKind::Wayland,
            BackendConfig::X11(_) => BackendVariantKind::X11,
            BackendConfig::Headless(_) => BackendVariantKind::Headless,
            BackendConfig::Libinput(_) => BackendVariantKind::Libinput,
            BackendConfig::Multi => BackendVariantKind::Multi,
        }
    }

    /// Validate before crossing into native code.
    pub fn validate(&self) -> Result<()> {
        match self {
            BackendConfig::Drm(config) => validate_drm_device(&config.device),
            BackendConfig::Wayland(config) => match &config.socket {
                Some(socket) => validate_wayland_socket(socket),
                None => Ok(()),
            },
            BackendConfig::X11(config) => match &config.display {
                Some(display) => validate_x11_display(display),
                None => Ok(()),
            },
            BackendConfig::Headless(_) | BackendConfig::Multi => Ok(()),
            BackendConfig::Libinput(config) => validate_seat_name(&config.seat),
        }
    }
}

fn validate_drm_device(device: &Path) -> Result<()> {
    let invalid = |reason: &str| Err(BindingError::invalid_config("drm", reason));
    if device.as_os_str().is_empty() {
        return invalid("device path is empty");
    }
    if !device.is_absolute() {
        return invalid("device path must be absolute");
    }
    if device.parent() != Some(Path::new("/dev/dri")) {
        return invalid("device must be a /dev/dri node");
    }
    let name = device
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    if !(name.starts_with("card") || name.starts_with("renderD")) {
        return invalid("device must be a card or render node");
    }
    Ok(())
}

fn validate_wayland_socket(socket: &str) -> Result<()> {
    let invalid = |reason: &str| Err(BindingError::invalid_config("wayland", reason));
    if socket.is_empty() {
        return invalid("socket name is empty");
    }
    if socket.contains('/') {
        return invalid("socket name must not contain '/'");
    }
    if socket.contains('\0') {
        return invalid("socket name must not contain NUL");
    }
    Ok(())
}

fn validate_x11_display(display: &str) -> Result<()> {
    let invalid = |reason: &str| Err(BindingError::invalid_config("x11", reason));
    let rest = match display.strip_prefix(':') {
        Some(rest) => rest,
        None => return invalid("display name must start with ':'"),
    };
    // ":N" or ":N.M", both numeric.
    let mut parts = rest.splitn(2, '.');
    let number = parts.next().unwrap_or_default();
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return invalid("display number must be numeric");
    }
    if let Some(screen) = parts.next() {
        if screen.is_empty() || !screen.chars().all(|c| c.is_ascii_digit()) {
            return invalid("screen number must be numeric");
        }
    }
    Ok(())
}

fn validate_seat_name(seat: &str) -> Result<()> {
    let invalid = |reason: &str| Err(BindingError::invalid_config("libinput", reason));
    if seat.is_empty() {
        return invalid("seat name is empty");
    }
    if seat.chars().any(|c| c.is_whitespace() || c == '\0') {
        return invalid("seat name must not contain whitespace");
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drm_device_validation() {
        let ok = BackendConfig::Drm(DrmConfig {
            device: PathBuf::from("/dev/dri/card0"),
        });
        assert!(ok.validate().is_ok());

        let render = BackendConfig::Drm(DrmConfig {
            device: PathBuf::from("/dev/dri/renderD128"),
        });
        assert!(render.validate().is_ok());

        for bad in ["", "card0", "/dev/null", "/dev/dri/mouse0", "/tmp/card0"] {
            let config = BackendConfig::Drm(DrmConfig {
                device: PathBuf::from(bad),
            });
            let err = config.validate().unwrap_err();
            assert!(err.is_config_error(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_wayland_socket_validation() {
        assert!(BackendConfig::Wayland(WaylandConfig { socket: None })
            .validate()
            .is_ok());
        assert!(BackendConfig::Wayland(WaylandConfig {
            socket: Some("wayland-1".to_string())
        })
        .validate()
        .is_ok());
        for bad in ["", "run/wayland-0", "way\0land"] {
            let config = BackendConfig::Wayland(WaylandConfig {
                socket: Some(bad.to_string()),
            });
            assert!(config.validate().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_x11_display_validation() {
        for ok in [":0", ":1", ":10.2"] {
            let config = BackendConfig::X11(X11Config {
                display: Some(ok.to_string()),
            });
            assert!(config.validate().is_ok(), "{ok:?} should be accepted");
        }
        for bad in ["", "0", ":x", ":0.", ":.1", "localhost:0"] {
            let config = BackendConfig::X11(X11Config {
                display: Some(bad.to_string()),
            });
            assert!(config.validate().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_seat_name_validation() {
        assert!(BackendConfig::Libinput(LibinputConfig::default())
            .validate()
            .is_ok());
        for bad in ["", "seat 0", "seat\t0"] {
            let config = BackendConfig::Libinput(LibinputConfig {
                seat: bad.to_string(),
            });
            assert!(config.validate().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_headless_and_multi_need_no_config() {
        assert!(BackendConfig::Headless(HeadlessConfig::default())
            .validate()
            .is_ok());
        assert!(BackendConfig::Multi.validate().is_ok());
        assert_eq!(BackendConfig::Multi.kind(), BackendVariantKind::Multi);
    }
}
