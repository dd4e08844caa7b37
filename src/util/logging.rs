//! Logging setup and the `tlog!` convenience macro.
//!
//! `init` wires up `tracing_subscriber` with a local-time stamp and an
//! env-filter so `RUST_LOG` works out of the box. `tlog!` is the cheap
//! fallback for code paths that run before the subscriber exists (early
//! startup, panic paths) and always goes to stderr.

/// Module tags used with [`tlog!`].
pub mod module {
    pub const BRIDGE: &str = "BRIDGE";
    pub const BACKEND: &str = "BACKEND";
    pub const SIGNAL: &str = "SIGNAL";
    pub const LIFETIME: &str = "LIFETIME";
    pub const NATIVE: &str = "NATIVE";
    pub const XCURSOR: &str = "XCURSOR";
    pub const DEMO: &str = "DEMO";
}

/// Timestamped stderr line with a module tag.
///
/// Works with or without a tracing subscriber installed.
#[macro_export]
macro_rules! tlog {
    ($module:expr, $($arg:tt)*) => {
        eprintln!(
            "{} [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            $module,
            format!($($arg)*)
        )
    };
}

/// Install the global tracing subscriber.
///
/// Defaults `RUST_LOG` to `info,tioga=debug` when unset. Safe to call
/// more than once; later calls are no-ops.
pub fn init() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info,tioga=debug");
    }
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(
            "%Y-%m-%d %H:%M:%S".to_string(),
        ))
        .with_ansi(false)
        .try_init()
        .ok();
}
