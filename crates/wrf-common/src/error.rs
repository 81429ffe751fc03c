//! Error types for wrf-tile services.

use thiserror::Error;

/// Result type alias using GridError.
pub type GridResult<T> = Result<T, GridError>;

/// Primary error type for grid resolution operations.
#[derive(Debug, Error)]
pub enum GridError {
    // === Request Errors ===
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Unsupported projection: {0}")]
    UnsupportedProjection(String),

    // === Storage Errors ===
    #[error("Storage error: {0}")]
    StorageError(String),

    // === Infrastructure Errors ===
    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl GridError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            GridError::MissingParameter(_)
            | GridError::InvalidParameter { .. }
            | GridError::UnsupportedProjection(_) => 400,

            GridError::ServiceUnavailable(_) => 503,

            _ => 500,
        }
    }
}

impl From<std::io::Error> for GridError {
    fn from(err: std::io::Error) -> Self {
        GridError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        GridError::InternalError(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            GridError::UnsupportedProjection("polar stereographic".into()).http_status_code(),
            400
        );
        assert_eq!(GridError::StorageError("unreachable".into()).http_status_code(), 500);
        assert_eq!(GridError::ServiceUnavailable("loading".into()).http_status_code(), 503);
    }
}
