//! Binding error types.
//!
//! Every error carries enough context (handle tag, signal kind, backend
//! variant) to diagnose a failure without inspecting toolkit internals.
//! Lifetime violations (`UseAfterDestroy`, `DoubleUnsubscribe`) indicate a
//! defect in the calling code and are always reported, never downgraded.

use thiserror::Error;

use crate::backend::config::BackendVariantKind;
use crate::handle::{HandleType, RawAddr};
use crate::signal::SignalKind;

/// Errors surfaced at the binding boundary.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BindingError {
    /// Malformed configuration, rejected before any native call is issued.
    #[error("invalid {subject} configuration: {reason}")]
    InvalidConfig { subject: String, reason: String },

    /// Operation attempted on a handle whose destroy signal already fired.
    #[error("use after destroy: {tag} handle {addr:#x}")]
    UseAfterDestroy { tag: HandleType, addr: RawAddr },

    /// Destroy requested by a caller that does not own the object.
    #[error("not owner: {tag} handle {addr:#x} is destroyed by its native container")]
    NotOwner { tag: HandleType, addr: RawAddr },

    /// Listener node removed twice from the same signal chain.
    #[error("double unsubscribe: listener already removed from {signal:?} chain")]
    DoubleUnsubscribe { signal: SignalKind },

    /// The native backend failed (device busy, permission denied, socket
    /// unavailable). Never retried here; retry policy belongs to the caller.
    #[error("{variant} backend error: {message}")]
    BackendError {
        variant: BackendVariantKind,
        message: String,
    },
}

impl BindingError {
    // ===== Convenience constructors =====

    pub fn invalid_config(subject: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            subject: subject.into(),
            reason: reason.into(),
        }
    }

    pub fn use_after_destroy(tag: HandleType, addr: RawAddr) -> Self {
        Self::UseAfterDestroy { tag, addr }
    }

    pub fn not_owner(tag: HandleType, addr: RawAddr) -> Self {
        Self::NotOwner { tag, addr }
    }

    pub fn double_unsubscribe(signal: SignalKind) -> Self {
        Self::DoubleUnsubscribe { signal }
    }

    pub fn backend_error(variant: BackendVariantKind, message: impl Into<String>) -> Self {
        Self::BackendError {
            variant,
            message: message.into(),
        }
    }
}

/// Result type for binding operations.
pub type Result<T> = std::result::Result<T, BindingError>;

// ============================================================================
// Error Categories
// ============================================================================

impl BindingError {
    /// True for errors that indicate a logic defect in the calling code
    /// rather than a transient runtime condition.
    pub fn is_caller_defect(&self) -> bool {
        matches!(
            self,
            BindingError::UseAfterDestroy { .. }
                | BindingError::NotOwner { .. }
                | BindingError::DoubleUnsubscribe { .. }
        )
    }

    /// True for errors detected before the native boundary is crossed.
    pub fn is_config_error(&self) -> bool {
        matches!(self, BindingError::InvalidConfig { .. })
    }

    /// True for failures reported by the native backend itself.
    pub fn is_native_failure(&self) -> bool {
        matches!(self, BindingError::BackendError { .. })
    }

    /// Stable numeric code for diagnostics.
    pub fn code(&self) -> u32 {
        match self {
            BindingError::InvalidConfig { .. } => 1,
            BindingError::UseAfterDestroy { .. } => 10,
            BindingError::NotOwner { .. } => 11,
            BindingError::DoubleUnsubscribe { .. } => 12,
            BindingError::BackendError { .. } => 20,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
