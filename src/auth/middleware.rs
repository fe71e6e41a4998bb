// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Internal trust gate for service-to-service calls.
//!
//! The transformer only accepts `/api/` requests carrying the shared secret
//! in `X-Internal-Token`. Everything outside that prefix (health probes)
//! bypasses the check. The gateway uses the same type on the client side to
//! attach the header to its outbound calls.
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/api/transform", post(transform))
//!     .layer(axum::middleware::from_fn_with_state(
//!         gate.clone(),
//!         internal_token_middleware,
//!     ));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{ApiError, ServiceError};

/// Header carrying the shared internal secret.
pub const INTERNAL_TOKEN_HEADER: &str = "X-Internal-Token";

/// Paths under this prefix require the internal secret.
pub const PROTECTED_PREFIX: &str = "/api/";

/// Error message returned to rejected internal callers.
pub const FORBIDDEN_MESSAGE: &str = "Forbidden: Invalid or missing internal token";

type HmacSha256 = Hmac<Sha256>;

/// Shared-secret check for internal calls.
///
/// Comparison goes through HMAC-SHA256 tags so it runs in constant time
/// while still requiring an exact match of the presented value.
#[derive(Clone)]
pub struct InternalTrustGate {
    secret: Arc<str>,
    expected_tag: Arc<[u8]>,
}

impl InternalTrustGate {
    /// Create a gate for the configured secret.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret: Arc<str> = Arc::from(secret.into());
        // An empty tag never verifies, so a key setup failure closes the gate.
        let expected_tag = keyed_mac(&secret)
            .map(|mut mac| {
                mac.update(secret.as_bytes());
                mac.finalize().into_bytes().to_vec()
            })
            .unwrap_or_default();

        Self {
            secret,
            expected_tag: Arc::from(expected_tag),
        }
    }

    /// Whether `path` is behind the gate.
    pub fn is_protected(path: &str) -> bool {
        path.starts_with(PROTECTED_PREFIX)
    }

    /// Whether the presented header value exactly equals the secret.
    pub fn is_trusted(&self, presented: Option<&[u8]>) -> bool {
        let Some(presented) = presented else {
            return false;
        };
        let Some(mut mac) = keyed_mac(&self.secret) else {
            return false;
        };
        mac.update(presented);
        mac.verify_slice(&self.expected_tag).is_ok()
    }

    /// Attach the internal secret to an outbound request.
    pub fn attach(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header(INTERNAL_TOKEN_HEADER, self.secret.as_ref())
    }
}

impl std::fmt::Debug for InternalTrustGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InternalTrustGate")
            .field("secret", &"<redacted>")
            .finish()
    }
}

fn keyed_mac(secret: &str) -> Option<HmacSha256> {
    <HmacSha256 as Mac>::new_from_slice(secret.as_bytes()).ok()
}

/// Reject `/api/` requests that lack the exact internal secret.
pub async fn internal_token_middleware(
    State(gate): State<InternalTrustGate>,
    request: Request,
    next: Next,
) -> Response {
    if !InternalTrustGate::is_protected(request.uri().path()) {
        return next.run(request).await;
    }

    let presented = request
        .headers()
        .get(INTERNAL_TOKEN_HEADER)
        .map(|value| value.as_bytes());
    let header_present = presented.is_some();

    if gate.is_trusted(presented) {
        return next.run(request).await;
    }

    tracing::warn!(
        path = %request.uri().path(),
        header_present,
        "Rejected internal call"
    );
    ApiError::from(ServiceError::Forbidden).into_response()
}
