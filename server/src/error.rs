//! Error kinds for module resolution and loading, with their HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Failure modes when serving a module.
///
/// Every request is independent, so there is nothing to retry or roll back;
/// each variant maps straight to an HTTP status with a JSON error body.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// Unknown module name, missing file, or a rejected (traversal) name.
    #[error("module not found: {name}")]
    NotFound { name: String },

    /// The file exists but is not valid JSON.
    #[error("invalid JSON in module: {name}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// The file or directory could not be read.
    #[error("failed to read module: {name}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl ModuleError {
    pub fn status(&self) -> StatusCode {
        match self {
            ModuleError::NotFound { .. } => StatusCode::NOT_FOUND,
            ModuleError::Parse { .. } | ModuleError::Io { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ModuleError {
    fn into_response(self) -> Response {
        // Full detail (source chain) goes to the log; the body carries only
        // the module name and kind.
        match &self {
            ModuleError::Parse { name, source } => {
                error!(module = %name, %source, "module is not valid JSON");
            }
            ModuleError::Io { name, source } => {
                error!(module = %name, %source, "module read failed");
            }
            ModuleError::NotFound { .. } => {}
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = ModuleError::NotFound {
            name: "greeting.json".to_string(),
        };
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn parse_and_io_map_to_500() {
        let parse = ModuleError::Parse {
            name: "bad.json".to_string(),
            source: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        };
        let io = ModuleError::Io {
            name: "gone.json".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(parse.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(io.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
