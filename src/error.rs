//! Error handling for the application

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::ClientError;
use crate::booking::responses::BookingErrorResponse;
use crate::booking::{FormError, SubmitError};

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Malformed request body: {0}")]
    Body(#[from] JsonRejection),

    #[error("Booking form is invalid")]
    Validation(Vec<FormError>),

    #[error("Booking API error: {0}")]
    Upstream(#[from] ClientError),

    #[error("Availability check still pending")]
    Pending,
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Invalid(errors) => AppError::Validation(errors),
            SubmitError::Api(e) => AppError::Upstream(e),
            SubmitError::NotReady => AppError::Pending,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message, errors) = match self {
            AppError::Body(rejection) => (rejection.status(), "invalid_body", rejection.body_text(), vec![]),
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation",
                "Booking form is invalid".to_string(),
                errors,
            ),
            AppError::Upstream(e) => {
                tracing::error!("Booking API error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "upstream",
                    "Booking API request failed".to_string(),
                    vec![],
                )
            }
            AppError::Pending => (
                StatusCode::CONFLICT,
                "pending",
                "Availability check has not resolved".to_string(),
                vec![],
            ),
        };

        let body = BookingErrorResponse {
            error_type: error_type.to_string(),
            message,
            errors,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation(vec![FormError::Unavailable]).into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::from(SubmitError::Api(ClientError::Upstream {
                status: 503,
                body: "down".to_string(),
            }))
                .into_response()
                .status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::from(SubmitError::NotReady).into_response().status(),
            StatusCode::CONFLICT
        );
    }
}
