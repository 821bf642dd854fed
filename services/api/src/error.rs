use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use followers_common::error::FollowersError;

pub struct ApiError(pub FollowersError);

impl From<FollowersError> for ApiError {
    fn from(err: FollowersError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if !self.0.is_client_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let (status, message) = match &self.0 {
            FollowersError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            FollowersError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };

        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}
