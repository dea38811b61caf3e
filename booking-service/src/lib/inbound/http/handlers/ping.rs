use axum::http::StatusCode;

use super::ApiSuccess;
use super::MessageResponse;

/// Liveness probe.
pub async fn ping() -> ApiSuccess<MessageResponse> {
    ApiSuccess::new(StatusCode::OK, MessageResponse::new("server running"))
}
