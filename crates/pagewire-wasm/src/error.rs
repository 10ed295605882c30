//! Structured errors for the JavaScript boundary
//!
//! Errors cross into JavaScript as plain objects with a `kind` discriminant,
//! so callers can branch on `err.kind` instead of parsing messages.

use pagewire::{PageError, SurfaceError};
use serde::{Deserialize, Serialize};
use std::fmt;
use wasm_bindgen::prelude::*;

/// Error categories surfaced to JavaScript
///
/// Serialized as `{"kind": "configError", "message": ..., ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
#[allow(clippy::enum_variant_names)]
pub enum WasmError {
    /// The config object could not be parsed or failed validation
    #[serde(rename_all = "camelCase")]
    ConfigError {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        field: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },

    /// The page was already mounted by an earlier call or by autostart
    #[serde(rename_all = "camelCase")]
    AlreadyMounted { message: String },

    /// The browser rejected a DOM operation during mount
    #[serde(rename_all = "camelCase")]
    SurfaceError {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },

    /// Failed to convert a result to a JavaScript value
    #[serde(rename_all = "camelCase")]
    SerializationError {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
}

impl WasmError {
    /// Create a config error with details
    pub fn config_with_details(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
            field: None,
            details: Some(details.into()),
        }
    }

    pub fn already_mounted() -> Self {
        Self::AlreadyMounted {
            message: "page interactivity is already mounted".to_string(),
        }
    }

    /// Create a serialization error with details
    pub fn serialization_with_details(
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self::SerializationError {
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Get the error kind as a string (for logging/debugging)
    pub fn kind_str(&self) -> &'static str {
        match self {
            Self::ConfigError { .. } => "ConfigError",
            Self::AlreadyMounted { .. } => "AlreadyMounted",
            Self::SurfaceError { .. } => "SurfaceError",
            Self::SerializationError { .. } => "SerializationError",
        }
    }

    /// Get the primary error message
    pub fn message(&self) -> &str {
        match self {
            Self::ConfigError { message, .. }
            | Self::AlreadyMounted { message }
            | Self::SurfaceError { message, .. }
            | Self::SerializationError { message, .. } => message,
        }
    }

    fn details(&self) -> Option<&str> {
        match self {
            Self::ConfigError { details, .. }
            | Self::SurfaceError { details, .. }
            | Self::SerializationError { details, .. } => details.as_deref(),
            Self::AlreadyMounted { .. } => None,
        }
    }
}

impl fmt::Display for WasmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind_str(), self.message())?;
        if let Self::ConfigError {
            field: Some(field), ..
        } = self
        {
            write!(f, "\n  field: {}", field)?;
        }
        if let Some(details) = self.details() {
            write!(f, "\nDetails: {}", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for WasmError {}

impl From<PageError> for WasmError {
    fn from(err: PageError) -> Self {
        match err {
            PageError::InvalidConfig { field, hint } => Self::ConfigError {
                message: format!("invalid value for `{}`", field),
                field: Some(field),
                details: Some(hint),
            },
            PageError::AlreadyMounted => Self::already_mounted(),
            PageError::Surface(source) => Self::from(source),
        }
    }
}

impl From<SurfaceError> for WasmError {
    fn from(err: SurfaceError) -> Self {
        let details = match &err {
            SurfaceError::InvalidSelector { selector, .. } => Some(selector.clone()),
            _ => None,
        };
        Self::SurfaceError {
            message: err.to_string(),
            details,
        }
    }
}

/// Convert WasmError to JsValue for throwing in JavaScript
///
/// Falls back to a plain JS Error carrying the display string if the
/// structured form cannot be built.
impl From<WasmError> for JsValue {
    fn from(err: WasmError) -> Self {
        match serde_wasm_bindgen::to_value(&err) {
            Ok(value) => value,
            Err(_) => js_sys::Error::new(&err.to_string()).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_keeps_field_and_hint() {
        let err = WasmError::from(PageError::InvalidConfig {
            field: "scroll.mobileBreakpoint".to_string(),
            hint: "must be greater than zero".to_string(),
        });

        assert_eq!(err.kind_str(), "ConfigError");
        let text = err.to_string();
        assert!(text.contains("scroll.mobileBreakpoint"));
        assert!(text.contains("must be greater than zero"));
    }

    #[test]
    fn already_mounted_maps_to_its_own_kind() {
        let err = WasmError::from(PageError::AlreadyMounted);
        assert_eq!(err, WasmError::already_mounted());
        assert_eq!(err.kind_str(), "AlreadyMounted");
    }

    #[test]
    fn invalid_selector_reports_selector_as_details() {
        let err = WasmError::from(PageError::Surface(SurfaceError::InvalidSelector {
            selector: "a[href".to_string(),
            reason: "unterminated attribute".to_string(),
        }));

        match err {
            WasmError::SurfaceError { details, message } => {
                assert_eq!(details.as_deref(), Some("a[href"));
                assert!(message.contains("a[href"));
            }
            other => panic!("expected SurfaceError, got {other:?}"),
        }
    }
}
