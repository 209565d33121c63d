use crate::errors::Error;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use tracing::{error, warn};

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub message: String,
    pub code: u16,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiError({}, {})", self.code, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::Json(self);
        (status, body).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound(entity) => {
                api_error(StatusCode::NOT_FOUND, &format!("{entity} not found"))
            }
            Error::Conflict(message) => {
                warn!("Rejected conflicting write: {}", message);
                api_error(StatusCode::BAD_REQUEST, &message)
            }
            Error::Validation(message) => api_error(StatusCode::UNPROCESSABLE_ENTITY, &message),
            other => {
                error!("Request failed: {}", other);
                api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        api_error(rejection.status(), &rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        api_error(StatusCode::UNPROCESSABLE_ENTITY, &rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(e) => {
                api_error(StatusCode::UNPROCESSABLE_ENTITY, &e.body_text())
            }
            other => api_error(other.status(), &other.body_text()),
        }
    }
}

/// Helper function to create API errors
pub fn api_error(status: StatusCode, message: &str) -> ApiError {
    ApiError {
        message: message.to_string(),
        code: status.as_u16(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_domain_errors_to_status_codes() {
        let cases = [
            (Error::NotFound("Author"), 404, "Author not found"),
            (
                Error::Conflict("Email already exists".to_string()),
                400,
                "Email already exists",
            ),
            (Error::Validation("bad".to_string()), 422, "bad"),
            (
                Error::DieselError(diesel::result::Error::RollbackTransaction),
                500,
                "Internal server error",
            ),
        ];

        for (err, code, message) in cases {
            let api = ApiError::from(err);
            assert_eq!(api.code, code);
            assert_eq!(api.message, message);
        }
    }

    #[test]
    fn unknown_code_falls_back_to_500() {
        let response = ApiError {
            message: "odd".to_string(),
            code: 42,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
