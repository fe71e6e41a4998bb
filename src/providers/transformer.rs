// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HTTP client for the internal transformer service.
//!
//! Every call carries the internal trust header and is bounded by the
//! configured timeout. There are no retries: any transport error, non-2xx
//! status, timeout or empty body is reported once as an upstream failure.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::auth::InternalTrustGate;
use crate::config::GatewayConfig;
use crate::error::ServiceError;
use crate::models::{TransformRequest, TransformResponse};

/// Path of the transform endpoint on the transformer service.
pub const TRANSFORM_PATH: &str = "/api/transform";

/// Liveness path on the transformer service (outside the gated prefix).
pub const LIVENESS_PATH: &str = "/health/live";

#[derive(Debug, Clone)]
pub struct TransformerClient {
    base_url: String,
    endpoint: String,
    gate: InternalTrustGate,
    http: Client,
}

impl TransformerClient {
    pub fn new(
        base_url: &Url,
        timeout: Duration,
        gate: InternalTrustGate,
    ) -> Result<Self, ServiceError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Internal(format!("failed to build HTTP client: {e}")))?;

        let base_url = base_url.as_str().trim_end_matches('/').to_string();
        Ok(Self {
            endpoint: format!("{base_url}{TRANSFORM_PATH}"),
            base_url,
            gate,
            http,
        })
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self, ServiceError> {
        Self::new(
            &config.downstream_base_url,
            config.downstream_timeout,
            InternalTrustGate::new(config.internal_secret.clone()),
        )
    }

    /// Full URL of the transform endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send `text` to the transformer and return its result.
    pub async fn transform(&self, text: &str) -> Result<String, ServiceError> {
        let request = TransformRequest {
            text: Some(text.to_string()),
        };

        let response = self
            .gate
            .attach(self.http.post(&self.endpoint))
            .json(&request)
            .send()
            .await
            .map_err(|e| ServiceError::UpstreamFailure(describe(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::UpstreamFailure(format!(
                "POST {TRANSFORM_PATH} returned {status}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ServiceError::UpstreamFailure(describe(&e)))?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(ServiceError::EmptyUpstreamResponse);
        }

        let parsed: Option<TransformResponse> = serde_json::from_slice(&body).map_err(|e| {
            ServiceError::UpstreamFailure(format!("POST {TRANSFORM_PATH} invalid JSON: {e}"))
        })?;

        parsed
            .and_then(|response| response.result)
            .ok_or(ServiceError::EmptyUpstreamResponse)
    }

    /// Whether the transformer answers its liveness probe.
    pub async fn probe(&self) -> bool {
        match self
            .http
            .get(format!("{}{LIVENESS_PATH}", self.base_url))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(error = %e, "Transformer liveness probe failed");
                false
            }
        }
    }
}

fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("POST {TRANSFORM_PATH} timed out")
    } else {
        format!("POST {TRANSFORM_PATH} failed: {err}")
    }
}
