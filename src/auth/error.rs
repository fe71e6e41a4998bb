// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::http::StatusCode;

/// Authentication error type.
///
/// `InvalidToken` covers every signature or structure failure so callers
/// cannot tell a tampered token from garbage. Expiry is reported separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No authorization header present
    MissingAuthHeader,
    /// Authorization header is not `Bearer <token>`
    InvalidAuthHeader,
    /// Token is malformed or its signature does not verify
    InvalidToken,
    /// Token verified but its expiry has passed
    TokenExpired,
    /// Signing secret is shorter than the HS256 minimum
    WeakKey { min_len: usize },
    /// Token could not be signed
    Signing(String),
}

impl AuthError {
    /// Stable code used in structured log fields.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::InvalidToken => "invalid_token",
            AuthError::TokenExpired => "token_expired",
            AuthError::WeakKey { .. } => "weak_signing_key",
            AuthError::Signing(_) => "signing_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthHeader
            | AuthError::InvalidAuthHeader
            | AuthError::InvalidToken
            | AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
            AuthError::WeakKey { .. } | AuthError::Signing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingAuthHeader => write!(f, "Authorization header is required"),
            AuthError::InvalidAuthHeader => {
                write!(f, "Invalid authorization header format (expected 'Bearer <token>')")
            }
            AuthError::InvalidToken => write!(f, "Token is invalid"),
            AuthError::TokenExpired => write!(f, "Token has expired"),
            AuthError::WeakKey { min_len } => {
                write!(f, "Signing secret must be at least {min_len} bytes")
            }
            AuthError::Signing(msg) => write!(f, "Failed to sign token: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}
