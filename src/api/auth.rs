// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Registration and login handlers.
//!
//! Argon2 is CPU-bound, so both coordinators run on the blocking pool.

use axum::{extract::State, Json};

use super::extract::ApiJson;
use crate::{
    error::{ApiError, ServiceError},
    models::{AuthRequest, AuthResponse},
    state::GatewayState,
};

#[utoipa::path(
    post,
    path = "/api/register",
    request_body = AuthRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Identity created", body = AuthResponse),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn register(
    State(state): State<GatewayState>,
    ApiJson(request): ApiJson<AuthRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let auth = state.auth.clone();
    let token = tokio::task::spawn_blocking(move || auth.register(&request.email, &request.password))
        .await
        .map_err(|e| ServiceError::Internal(format!("registration task failed: {e}")))??;

    Ok(Json(AuthResponse { token }))
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = AuthRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Credentials accepted", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<GatewayState>,
    ApiJson(request): ApiJson<AuthRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let auth = state.auth.clone();
    let token = tokio::task::spawn_blocking(move || auth.login(&request.email, &request.password))
        .await
        .map_err(|e| ServiceError::Internal(format!("login task failed: {e}")))??;

    Ok(Json(AuthResponse { token }))
}
