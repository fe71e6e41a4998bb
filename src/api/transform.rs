// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::Json;

use super::extract::ApiJson;
use crate::{
    models::{TransformRequest, TransformResponse},
    transform::transform,
};

/// Internal transform endpoint. Reached only through the trust gate.
pub async fn transform_text(
    ApiJson(request): ApiJson<TransformRequest>,
) -> Json<TransformResponse> {
    let text = request.text.as_deref().unwrap_or_default();
    Json(TransformResponse {
        result: Some(transform(text)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn absent_text_transforms_to_empty() {
        let Json(response) = transform_text(ApiJson(TransformRequest { text: None })).await;
        assert_eq!(response.result.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn text_is_transformed() {
        let Json(response) = transform_text(ApiJson(TransformRequest {
            text: Some("abc".into()),
        }))
        .await;
        assert_eq!(response.result.as_deref(), Some("CBA [TRANSFORMED]"));
    }
}
