//! Error types for the page controller.
//!
//! Two layers: [`SurfaceError`] is what a [`DocumentSurface`](crate::DocumentSurface)
//! reports when the host refuses an operation, and [`PageError`] is what
//! mounting the controller can fail with. Once mounted, handlers never
//! propagate errors; they log and carry on.

use thiserror::Error;

/// Failure reported by a document surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// The selector could not be parsed by the host.
    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector {
        /// The selector as written
        selector: String,
        /// Host-provided reason
        reason: String,
    },

    /// The host threw while mutating or reading the document.
    #[error("DOM operation '{operation}' failed: {reason}")]
    Dom {
        /// Name of the operation, e.g. `createElement`
        operation: &'static str,
        /// Host-provided reason
        reason: String,
    },

    /// The clipboard write was rejected (permission denied, insecure context).
    #[error("clipboard write rejected: {0}")]
    ClipboardRejected(String),

    /// A browser capability the controller needs is missing.
    #[error("'{0}' is not available in this environment")]
    Unavailable(&'static str),
}

impl SurfaceError {
    /// Shorthand for [`SurfaceError::Dom`].
    pub fn dom(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Dom {
            operation,
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while mounting the controller.
#[derive(Debug, Error)]
pub enum PageError {
    /// A configuration value failed validation.
    #[error("invalid config value for '{field}': {hint}")]
    InvalidConfig {
        /// camelCase path of the offending field, e.g. `selectors.nav`
        field: String,
        /// What is wrong and how to fix it
        hint: String,
    },

    /// The controller was already mounted on this page.
    #[error("page controller is already mounted")]
    AlreadyMounted,

    /// The surface failed during installation.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

impl PageError {
    pub(crate) fn invalid(field: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            hint: hint.into(),
        }
    }
}

/// Result type for surface operations
pub type SurfaceResult<T> = std::result::Result<T, SurfaceError>;

/// Result type for controller operations
pub type Result<T> = std::result::Result<T, PageError>;
