use crate::error::AppError;
use axum::{http::StatusCode, response::IntoResponse, Json};
use error_types::{error_codes, ErrorResponse};

/// Map domain errors to HTTP responses.
pub fn map_error(err: &AppError) -> (StatusCode, ErrorResponse) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let (error_type, code) = match err {
        AppError::BadRequest(_) => ("validation_error", error_codes::INVALID_REQUEST),
        AppError::Unauthorized => ("authentication_error", error_codes::INVALID_CREDENTIALS),
        AppError::Forbidden => ("authorization_error", error_codes::NOT_MESSAGE_SENDER),
        AppError::NotFound => ("not_found_error", error_codes::MESSAGE_NOT_FOUND),
        AppError::Store(_) => ("server_error", error_codes::STORE_UNAVAILABLE),
        AppError::Config(_) | AppError::StartServer(_) | AppError::Internal => {
            ("server_error", error_codes::INTERNAL_SERVER_ERROR)
        }
    };

    let message = err.to_string();
    let response = ErrorResponse::new(
        match status {
            StatusCode::BAD_REQUEST => "Bad Request",
            StatusCode::UNAUTHORIZED => "Unauthorized",
            StatusCode::FORBIDDEN => "Forbidden",
            StatusCode::NOT_FOUND => "Not Found",
            StatusCode::SERVICE_UNAVAILABLE => "Service Unavailable",
            StatusCode::INTERNAL_SERVER_ERROR => "Internal Server Error",
            _ => "Error",
        },
        &message,
        status.as_u16(),
        error_type,
        code,
    );

    (status, response)
}

pub fn into_response(err: AppError) -> impl IntoResponse {
    let (status, response) = map_error(&err);
    (status, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[test]
    fn maps_forbidden_to_403() {
        let (status, resp) = map_error(&AppError::Forbidden);
        assert_eq!(status.as_u16(), 403);
        assert_eq!(resp.code, error_codes::NOT_MESSAGE_SENDER);
    }

    #[test]
    fn maps_store_failure_to_503() {
        let err = AppError::Store(StoreError::Unavailable("timeout".into()));
        let (status, resp) = map_error(&err);
        assert_eq!(status.as_u16(), 503);
        assert_eq!(resp.code, error_codes::STORE_UNAVAILABLE);
        assert!(resp.message.contains("timeout"));
    }

    #[test]
    fn maps_invalid_input_to_400() {
        let (status, resp) = map_error(&AppError::BadRequest("content must not be empty".into()));
        assert_eq!(status.as_u16(), 400);
        assert_eq!(resp.error_type, "validation_error");
    }
}
