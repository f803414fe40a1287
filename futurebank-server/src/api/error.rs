//! API Error Handling
//!
//! Unified error types and conversion for API responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::backend::BackendError;
use crate::service::{
    auth_service::AuthError, kudos_service::KudosError, listing_service::ListingError,
    profile_service::ProfileError,
};

/// API error type
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Conflict(String),
    BackendError(BackendError),
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::BackendError(err) => {
                tracing::error!("Backend error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Rejected tokens become 401 and client errors reported by the hosted
/// service (bad credentials, unconfirmed e-mail, ...) become 400 with the
/// service's message; anything else is an internal error.
impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Unauthorized(msg) => ApiError::Unauthorized(msg),
            BackendError::Api {
                status: 401 | 403,
                message,
                ..
            } => ApiError::Unauthorized(message),
            BackendError::Api { status, message, .. } if (400..500).contains(&status) => {
                ApiError::BadRequest(message)
            }
            BackendError::Unsupported(what) => {
                ApiError::BadRequest(format!("{} is not supported by this server", what))
            }
            other => ApiError::BackendError(other),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(err) => ApiError::BadRequest(err.to_string()),
            AuthError::UnknownProvider(provider) => {
                ApiError::BadRequest(format!("Unknown OAuth provider: {}", provider))
            }
            AuthError::Backend(err) => err.into(),
        }
    }
}

impl From<ProfileError> for ApiError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::NotFound(id) => ApiError::NotFound(format!("Profile {} not found", id)),
            ProfileError::Validation(err) => ApiError::BadRequest(err.to_string()),
            ProfileError::UsernameTaken(name) => {
                ApiError::Conflict(format!("Username {} is already taken", name))
            }
            ProfileError::Backend(err) => err.into(),
        }
    }
}

impl From<ListingError> for ApiError {
    fn from(err: ListingError) -> Self {
        match err {
            ListingError::Validation(err) => ApiError::BadRequest(err.to_string()),
            ListingError::ProfileUnavailable(err) => {
                tracing::error!("Profile setup failed: {}", err);
                ApiError::InternalError("Could not set up your profile".to_string())
            }
            ListingError::Backend(err) => err.into(),
        }
    }
}

impl From<KudosError> for ApiError {
    fn from(err: KudosError) -> Self {
        match err {
            KudosError::Disabled => ApiError::NotFound("The kudos system is disabled".to_string()),
            KudosError::UnknownKudos(label) => {
                ApiError::BadRequest(format!("Unknown kudos: {}", label))
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
