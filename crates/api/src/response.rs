//! Shared response envelope types for API handlers.
//!
//! All non-binary API responses use the `{ "success": ..., "data": ... }`
//! envelope. Use [`ApiResponse`] instead of ad-hoc `serde_json::json!`
//! to get compile-time type safety and consistent serialization.

use serde::Serialize;

/// Standard `{ "success": true, "data": T }` response envelope.
///
/// The error side of the envelope (`success: false, error: ...`) is
/// produced by `AppError`'s `IntoResponse` impl.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful envelope carrying a payload.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Successful envelope with no payload, e.g. for DELETE.
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
        }
    }
}
