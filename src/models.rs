// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies for both services. All types derive
//! `Serialize`, `Deserialize`, and `ToSchema` for JSON handling and OpenAPI
//! documentation.
//!
//! ## Model Categories
//!
//! - **Auth**: registration and login credentials, issued token
//! - **Process**: text submitted to the gateway and its result
//! - **Transform**: the internal gateway → transformer exchange
//!
//! Text fields are optional on the wire; an absent or `null` text is
//! treated as the empty string.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Auth
// =============================================================================

/// Credentials for `/api/register` and `/api/login`.
#[derive(Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AuthRequest {
    /// Account email, compared exactly as given.
    pub email: String,
    /// Plaintext password; hashed before storage and never logged.
    pub password: String,
}

impl std::fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Session token issued on successful registration or login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AuthResponse {
    /// Signed bearer token for `Authorization: Bearer <token>`.
    pub token: String,
}

// =============================================================================
// Process
// =============================================================================

/// Text submitted to `/api/process`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ProcessRequest {
    #[serde(default)]
    pub text: Option<String>,
}

impl ProcessRequest {
    /// The submitted text, empty when absent.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}

/// Result returned by `/api/process`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ProcessResponse {
    pub result: String,
}

// =============================================================================
// Transform (internal)
// =============================================================================

/// Body of the internal `/api/transform` call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct TransformRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Transformer reply. `result` is optional so a reply without it can be
/// told apart from an empty result.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct TransformResponse {
    #[serde(default)]
    pub result: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_null_text_reads_as_empty() {
        let absent: ProcessRequest = serde_json::from_str("{}").unwrap();
        let null: ProcessRequest = serde_json::from_str(r#"{"text":null}"#).unwrap();
        let given: ProcessRequest = serde_json::from_str(r#"{"text":"hi"}"#).unwrap();

        assert_eq!(absent.text(), "");
        assert_eq!(null.text(), "");
        assert_eq!(given.text(), "hi");
    }

    #[test]
    fn auth_request_debug_hides_password() {
        let request = AuthRequest {
            email: "a@x.com".into(),
            password: "hunter2".into(),
        };
        let rendered = format!("{request:?}");
        assert!(rendered.contains("a@x.com"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn transform_response_distinguishes_missing_result() {
        let missing: TransformResponse = serde_json::from_str("{}").unwrap();
        let empty: TransformResponse = serde_json::from_str(r#"{"result":""}"#).unwrap();

        assert_eq!(missing.result, None);
        assert_eq!(empty.result.as_deref(), Some(""));
    }
}
