// FetchError to HTTP response mapping
use crate::error::FetchError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

impl IntoResponse for FetchError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidRequest(msg) => {
                tracing::debug!("Rejected feed request: {msg}");
                StatusCode::BAD_REQUEST
            }
            Self::Unreachable(_) | Self::TransportFailure { .. } | Self::MalformedResponse(_) => {
                tracing::error!(error = %self, "Feed fetch failed");
                StatusCode::BAD_GATEWAY
            }
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let response = FetchError::InvalidRequest("result count must be positive".into())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = FetchError::TransportFailure { status: 401 }.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = FetchError::MalformedResponse("missing 'feeds' array".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = FetchError::Unreachable("connection refused".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
