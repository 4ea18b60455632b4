use thiserror::Error;

/// Main error type for Valence API operations
#[derive(Debug, Error)]
pub enum ValenceError {
    /// Non-2xx answer from the API, carrying the raw error body
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    /// Required environment variable is not set
    #[error("missing environment variable {0}")]
    MissingEnv(String),

    /// Continuation URL of a paged result does not point at the API
    #[error("malformed next page URL: {0}")]
    Pagination(String),

    /// Request building error
    #[error("failed to build request: {0}")]
    RequestBuild(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl ValenceError {
    /// Create a new HTTP error
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        ValenceError::Http {
            status,
            body: body.into(),
        }
    }

    /// Check if this error is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, ValenceError::Http { status: 404, .. })
    }

    /// Check if this error is a permission denied error (403)
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, ValenceError::Http { status: 403, .. })
    }

    /// Get the HTTP status code if this is an HTTP error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ValenceError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for Valence operations
pub type Result<T> = std::result::Result<T, ValenceError>;
