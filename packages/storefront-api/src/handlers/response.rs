//! Response types and helpers for HTTP endpoints.

use serde::Serialize;

/// Envelope wrapping every successful response body.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// "ok" for reads, "success" for writes
    pub status: &'static str,
    /// HTTP status code repeated in the body
    pub code: u16,
    /// Human-readable notes about the operation
    pub messages: Vec<String>,
    /// Response data
    pub data: T,
}

/// Error body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always "error"
    pub status: &'static str,
    /// HTTP status code repeated in the body
    pub code: u16,
    /// What went wrong
    pub detail: String,
}

/// Helper to create a read response
pub fn ok_response<T: Serialize>(data: T) -> ApiResponse<T> {
    ApiResponse {
        status: "ok",
        code: 200,
        messages: Vec::new(),
        data,
    }
}

/// Helper to create a write response carrying a message
pub fn success_response<T: Serialize>(code: u16, message: &str, data: T) -> ApiResponse<T> {
    ApiResponse {
        status: "success",
        code,
        messages: vec![message.to_string()],
        data,
    }
}

/// Helper to create error response
pub fn error_response(code: u16, detail: String) -> ErrorResponse {
    ErrorResponse {
        status: "error",
        code,
        detail,
    }
}
