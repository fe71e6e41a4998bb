// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token issuance and verification (HS256 JWT).
//!
//! Signature verification and expiry are checked independently:
//! [`TokenCodec::verify`] only proves the token is ours and intact, while
//! [`TokenCodec::is_expired`] looks at the embedded expiry. Request paths
//! use [`TokenCodec::authenticate`], which does both.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use super::{AuthError, SessionClaims};
use crate::config::{GatewayConfig, MIN_SIGNING_SECRET_LEN};

/// Issues and verifies session tokens with a symmetric key.
///
/// Stateless after construction; share it behind an `Arc`.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenCodec {
    /// Create a codec from raw key material.
    ///
    /// The secret must be at least 256 bits long.
    pub fn new(secret: &[u8], ttl: Duration) -> Result<Self, AuthError> {
        if secret.len() < MIN_SIGNING_SECRET_LEN {
            return Err(AuthError::WeakKey {
                min_len: MIN_SIGNING_SECRET_LEN,
            });
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked separately so stale and forged tokens stay distinguishable.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        })
    }

    /// Create a codec from the gateway configuration.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, AuthError> {
        Self::new(&config.signing_secret, config.token_ttl)
    }

    /// Configured token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject` and `identity_id`, valid from now.
    pub fn issue(&self, subject: &str, identity_id: Uuid) -> Result<String, AuthError> {
        self.issue_at(subject, identity_id, Utc::now())
    }

    /// Issue a token as if the current time were `issued_at`.
    pub fn issue_at(
        &self,
        subject: &str,
        identity_id: Uuid,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let claims = SessionClaims {
            sub: subject.to_string(),
            user_id: identity_id,
            iat: issued_at.timestamp(),
            exp: self.expiry_seconds(issued_at)?,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Check the signature and structure, returning the claims.
    ///
    /// Does not look at expiry.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }

    /// Whether the token's expiry has passed.
    ///
    /// A token that fails verification is treated as expired.
    pub fn is_expired(&self, token: &str) -> bool {
        self.is_expired_at(token, Utc::now())
    }

    /// [`TokenCodec::is_expired`] against an explicit clock reading.
    pub fn is_expired_at(&self, token: &str, now: DateTime<Utc>) -> bool {
        self.verify(token)
            .map(|claims| claims.is_expired_at(now))
            .unwrap_or(true)
    }

    /// Subject (email) of a verified token.
    pub fn extract_subject(&self, token: &str) -> Result<String, AuthError> {
        self.verify(token).map(|claims| claims.sub)
    }

    /// Identity id of a verified token.
    pub fn extract_identity_id(&self, token: &str) -> Result<Uuid, AuthError> {
        self.verify(token).map(|claims| claims.user_id)
    }

    /// True iff the signature verifies, the subject matches exactly and the
    /// token has not expired.
    pub fn validate(&self, token: &str, expected_subject: &str) -> bool {
        match self.verify(token) {
            Ok(claims) => claims.sub == expected_subject && !claims.is_expired_at(Utc::now()),
            Err(_) => false,
        }
    }

    /// Verify and reject expired tokens. Used before trusting any claim.
    pub fn authenticate(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let claims = self.verify(token)?;
        if claims.is_expired_at(Utc::now()) {
            return Err(AuthError::TokenExpired);
        }
        Ok(claims)
    }

    /// `exp` in whole seconds, rounded up so a token never expires before
    /// `issued_at + ttl`.
    fn expiry_seconds(&self, issued_at: DateTime<Utc>) -> Result<i64, AuthError> {
        let ttl_ms = i64::try_from(self.ttl.as_millis())
            .map_err(|_| AuthError::Signing("token ttl out of range".to_string()))?;
        let expiry_ms = issued_at
            .timestamp_millis()
            .checked_add(ttl_ms)
            .and_then(|ms| ms.checked_add(999))
            .ok_or_else(|| AuthError::Signing("token expiry out of range".to_string()))?;
        Ok(expiry_ms.div_euclid(1000))
    }
}
