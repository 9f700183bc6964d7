// src/error.rs
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

use crate::dtos::ApiResponse;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("an account with this email already exists")]
    DuplicateAccount,
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("supabase error: {0}")]
    Supabase(String),
    #[error("other: {0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("supabase error: {0}")]
    Supabase(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid store settings: {0}")]
    Config(String),
}

/// Client-side form checks, run before anything reaches a backend.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Password must be at least {0} characters long")]
    PasswordTooShort(usize),
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

/// Error surfaced to HTTP clients. Each variant renders as the standard
/// `{status, message, data}` envelope with `status = "error"`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn sign_in_required() -> Self {
        ApiError::Unauthorized("Please sign in".to_string())
    }

    fn client_message(&self) -> String {
        match self {
            ApiError::Validation(e) => e.to_string(),
            ApiError::Unauthorized(msg) | ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Auth(AuthError::InvalidCredentials) => "Invalid email or password".to_string(),
            ApiError::Auth(AuthError::DuplicateAccount) => {
                "Email already exists. Please sign in instead.".to_string()
            }
            ApiError::Auth(_) => "Authentication service unavailable. Please try again.".to_string(),
            ApiError::Store(_) => "Failed to reach the post store. Please try again.".to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Auth(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            ApiError::Auth(AuthError::DuplicateAccount) => StatusCode::CONFLICT,
            ApiError::Auth(AuthError::Other(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Auth(_) => StatusCode::BAD_GATEWAY,
            ApiError::Store(StoreError::Io(_))
            | ApiError::Store(StoreError::Serde(_))
            | ApiError::Store(StoreError::Config(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Store(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("request failed: {}", self);
        } else {
            log::warn!("request rejected: {}", self);
        }

        HttpResponse::build(status).json(ApiResponse::<()>::error(self.client_message()))
    }
}
