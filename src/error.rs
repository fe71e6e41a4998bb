// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::{AuthError, PasswordError};
use crate::storage::StorageError;

/// Business failures of the gateway and transformer.
///
/// Handlers turn these into an [`ApiError`]; only the HTTP status and a
/// generic message reach the caller.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("email already exists")]
    EmailAlreadyExists,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("identity {0} not found")]
    IdentityNotFound(Uuid),

    #[error("unauthenticated: {0}")]
    Unauthenticated(AuthError),

    #[error("failed to issue session token: {0}")]
    TokenIssue(AuthError),

    #[error("forbidden")]
    Forbidden,

    #[error("transformer call failed: {0}")]
    UpstreamFailure(String),

    #[error("transformer returned an empty response")]
    EmptyUpstreamResponse,

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// True for the upstream family (`UpstreamFailure` and its empty-body case).
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ServiceError::UpstreamFailure(_) | ServiceError::EmptyUpstreamResponse
        )
    }
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::EmailAlreadyExists => ApiError::conflict("Email already exists"),
            ServiceError::InvalidCredentials => ApiError::unauthorized("Invalid credentials"),
            ServiceError::Unauthenticated(auth) => {
                tracing::debug!(error_code = auth.error_code(), "Rejected bearer token");
                ApiError::new(auth.status_code(), "Unauthorized")
            }
            ServiceError::Forbidden => {
                ApiError::forbidden(crate::auth::middleware::FORBIDDEN_MESSAGE)
            }
            other => {
                tracing::error!(error = %other, "Request failed");
                ApiError::internal()
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        ApiError::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}
