// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTP surface of both services.
//!
//! - [`gateway_router`]: public auth and process endpoints plus Swagger docs
//! - [`transformer_router`]: internal transform endpoint behind the trust gate

use axum::{
    http::{StatusCode, Uri},
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::internal_token_middleware,
    error::ApiError,
    models::{AuthRequest, AuthResponse, ProcessRequest, ProcessResponse},
    state::{GatewayState, TransformerState},
};

pub mod auth;
pub mod extract;
pub mod health;
pub mod process;
pub mod transform;

pub fn gateway_router(state: GatewayState) -> Router {
    let routes = Router::new()
        .route("/api/register", post(auth::register))
        .route("/api/login", post(auth::login))
        .route("/api/process", post(process::process))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    with_request_tracing(
        routes
            .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
            .layer(CorsLayer::permissive()),
    )
}

pub fn transformer_router(state: TransformerState) -> Router {
    let routes = Router::new()
        .route("/api/transform", post(transform::transform_text))
        .route("/health/live", get(health::liveness))
        // Unknown /api/ paths still go through the gate.
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.gate.clone(),
            internal_token_middleware,
        ));

    with_request_tracing(routes)
}

/// Request id generation and propagation around a trace span per request.
fn with_request_tracing(router: Router) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id()),
    )
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, format!("No route for {}", uri.path()))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register,
        auth::login,
        process::process,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            AuthRequest,
            AuthResponse,
            ProcessRequest,
            ProcessResponse,
            health::HealthResponse,
            health::ReadyResponse,
            health::HealthChecks
        )
    ),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Process", description = "Authenticated text processing"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
