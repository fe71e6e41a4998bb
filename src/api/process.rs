// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, http::HeaderMap, Json};

use super::extract::ApiJson;
use crate::{
    auth::authorization_header,
    error::ApiError,
    models::{ProcessRequest, ProcessResponse},
    state::GatewayState,
};

/// Transform text on behalf of an authenticated identity.
#[utoipa::path(
    post,
    path = "/api/process",
    request_body = ProcessRequest,
    tag = "Process",
    params(
        ("Authorization" = String, Header, description = "Bearer session token")
    ),
    responses(
        (status = 200, description = "Text transformed and audited", body = ProcessResponse),
        (status = 401, description = "Missing, invalid or expired token"),
        (status = 500, description = "Transformer unavailable")
    )
)]
pub async fn process(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    ApiJson(request): ApiJson<ProcessRequest>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let record = state
        .gateway
        .handle(authorization_header(&headers), request.text())
        .await?;

    Ok(Json(ProcessResponse {
        result: record.output_text,
    }))
}
