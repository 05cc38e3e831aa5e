//! Error types for map view operations
//!
//! The visibility filter itself is total and never fails. Errors only come
//! from the edges: looking a hotel up by identifier, opting into strict
//! viewport validation, and (de)serializing records.
//!
//! Each variant carries a stable error code and a category, so tool
//! servers and UIs can switch on them without parsing messages.
//!
//! # Example
//!
//! ```rust
//! use map_core::error::{ErrorCategory, MapError};
//!
//! let err = MapError::HotelNotFound { hotel_id: "cm-kani".to_string() };
//! assert_eq!(err.category(), ErrorCategory::NotFound);
//! assert_eq!(err.error_code(), "HOTEL_NOT_FOUND");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for map operations
pub type Result<T> = std::result::Result<T, MapError>;

/// Error category for grouping related errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Referenced record is not in the current list (404)
    NotFound,
    /// Input validation failed (400)
    Validation,
    /// External data could not be decoded (502)
    External,
}

/// Errors that can occur in map view operations
#[derive(Error, Debug)]
pub enum MapError {
    /// No hotel with this identifier in the current list
    #[error("Hotel not found: '{hotel_id}'. It is not part of the current hotel list.")]
    HotelNotFound { hotel_id: String },

    /// Viewport rectangle rejected by strict validation
    #[error("Invalid viewport: {reason}")]
    InvalidViewport { reason: String },

    /// JSON serialization or deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MapError {
    /// Returns the error category for grouping
    pub fn category(&self) -> ErrorCategory {
        match self {
            MapError::HotelNotFound { .. } => ErrorCategory::NotFound,
            MapError::InvalidViewport { .. } => ErrorCategory::Validation,
            MapError::Json(_) => ErrorCategory::External,
        }
    }

    /// Returns the stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            MapError::HotelNotFound { .. } => "HOTEL_NOT_FOUND",
            MapError::InvalidViewport { .. } => "INVALID_VIEWPORT",
            MapError::Json(_) => "JSON_ERROR",
        }
    }

    /// Returns the HTTP status code matching the category
    pub fn http_status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::NotFound => 404,
            ErrorCategory::Validation => 400,
            ErrorCategory::External => 502,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_status() {
        let err = MapError::InvalidViewport { reason: "minX > maxX".to_string() };
        assert_eq!(err.error_code(), "INVALID_VIEWPORT");
        assert_eq!(err.http_status_code(), 400);
        assert!(err.to_string().contains("minX > maxX"));
    }

    #[test]
    fn test_json_error_is_external() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = MapError::from(json_err);
        assert_eq!(err.category(), ErrorCategory::External);
        assert_eq!(err.http_status_code(), 502);
    }
}
