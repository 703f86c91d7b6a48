use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use voxagent_core::VoxError;

/// Wrapper turning a [`VoxError`] into an HTTP response.
///
/// Synchronous rejections map to 400, unknown identifiers to 404, provider
/// failures to 502, and everything else to 500. The body is always
/// `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError(
    /// The underlying service error.
    pub VoxError,
);

impl From<VoxError> for ApiError {
    fn from(err: VoxError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            VoxError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            VoxError::NotFound(_) => StatusCode::NOT_FOUND,
            VoxError::Synthesis(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn status_of(err: VoxError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn test_invalid_input_maps_to_400() {
        assert_eq!(
            status_of(VoxError::InvalidInput("empty".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_not_found_maps_to_404() {
        assert_eq!(
            status_of(VoxError::NotFound("task".into())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_synthesis_maps_to_502() {
        assert_eq!(
            status_of(VoxError::Synthesis("down".into())),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_other_errors_map_to_500() {
        assert_eq!(
            status_of(VoxError::Config("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(VoxError::Http("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
