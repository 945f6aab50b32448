use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use service::ServiceError;
use thiserror::Error;
use tracing::error;

use crate::views;

/// Errors that escape a handler and become an error page.
///
/// Expected outcomes such as a taken username or a failed login are turned
/// into flash messages by the handlers and never reach this type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Service(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Service(ServiceError::AlreadyExists(_)) => StatusCode::CONFLICT,
            AppError::Service(ServiceError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            AppError::Service(ServiceError::EmptyContent) => StatusCode::BAD_REQUEST,
            AppError::Service(ServiceError::Database(_) | ServiceError::PasswordHash(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, Html(views::error_page(status))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::from(ServiceError::NotFound(7)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_failures_map_to_500() {
        let db_error = sea_orm::DbErr::Custom("boom".to_string());
        let response = AppError::from(ServiceError::from(db_error)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = AppError::from(ServiceError::PasswordHash("x".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
