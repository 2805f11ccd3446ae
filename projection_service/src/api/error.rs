use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use health_projector::ProjectionError;
use serde_json::json;
use thiserror::Error;

/// Errors returned to API clients
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error("Field {field} is not a valid unsigned integer: {value}")]
    InvalidField { field: &'static str, value: String },
}

impl ApiError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Projection(err) => err.error_code(),
            Self::InvalidField { .. } => "invalid_field",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Projection(err) => {
                StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_REQUEST)
            }
            Self::InvalidField { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error_code": self.error_code(),
            "message": self.to_string(),
        }));
        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let err = ApiError::from(ProjectionError::Overflow {
            operation: "health factor",
        });
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), "overflow");

        let err = ApiError::InvalidField {
            field: "health_factor",
            value: "-1".to_string(),
        };
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
