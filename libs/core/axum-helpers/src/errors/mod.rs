pub mod handlers;

pub use handlers::{method_not_allowed, not_found};

use serde::Serialize;

/// Standard error response structure for infrastructure-level errors.
///
/// Domain crates translate their own errors; this shape covers the
/// cross-cutting cases (unknown route, unsupported method).
///
/// # JSON Example
///
/// ```json
/// {
///   "error": "NotFound",
///   "message": "The requested resource was not found"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
