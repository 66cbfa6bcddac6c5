use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mp_core::ValidationReport;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("form values are invalid")]
    Invalid(ValidationReport),

    #[error("upstream error: {0}")]
    Upstream(#[from] mp_core::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        };

        let body = match &self {
            ApiError::Invalid(report) => {
                serde_json::json!({ "error": self.to_string(), "fields": report.errors })
            }
            _ => serde_json::json!({ "error": self.to_string() }),
        };
        (status, axum::Json(body)).into_response()
    }
}
