//! Error types for the platform layer
//!
//! Fatal conditions (`Unavailable`, `UnsupportedOs`) must be surfaced before
//! any UI is constructed. Everything else is recoverable: the caller degrades
//! the affected feature and keeps running.

use thiserror::Error;

/// Errors raised by platform services
#[derive(Error, Debug)]
pub enum PlatformError {
    /// A required fact about the host could not be resolved (e.g. user home)
    #[error("Platform unavailable: {0}")]
    Unavailable(String),

    /// No platform service exists for the detected operating system
    #[error("Operating system `{0}` is not supported")]
    UnsupportedOs(String),

    /// The capability is not provided by this platform variant
    #[error("{capability} is not supported on {platform}")]
    NotSupported {
        platform: &'static str,
        capability: &'static str,
    },

    /// Calling out to the OS failed (browsing a URI, loading an icon, ...)
    #[error("{action} failed: {reason}")]
    ExternalActionFailed {
        action: &'static str,
        reason: String,
    },
}

impl PlatformError {
    /// Create an external action failure from any displayable cause
    pub fn external(action: &'static str, reason: impl ToString) -> Self {
        Self::ExternalActionFailed {
            action,
            reason: reason.to_string(),
        }
    }

    /// Whether startup has to be aborted because of this error
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::UnsupportedOs(_))
    }
}

/// Result alias for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
