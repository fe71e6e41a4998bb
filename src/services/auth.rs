// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Registration and login.

use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::{hash_password, verify_against_dummy, verify_password, TokenCodec};
use crate::error::ServiceError;
use crate::storage::{Identity, IdentityStore, StorageError};

/// Registers identities and exchanges credentials for session tokens.
///
/// Both operations hash or verify with Argon2id and are therefore slow and
/// blocking; async callers should run them on the blocking pool.
pub struct AuthCoordinator {
    identities: Arc<dyn IdentityStore>,
    codec: Arc<TokenCodec>,
}

impl AuthCoordinator {
    pub fn new(identities: Arc<dyn IdentityStore>, codec: Arc<TokenCodec>) -> Self {
        Self { identities, codec }
    }

    /// Create an identity and return a session token for it.
    ///
    /// Fails with `EmailAlreadyExists` if the email is taken, whether that
    /// is seen by the pre-check or by the store's own uniqueness guard.
    pub fn register(&self, email: &str, password: &str) -> Result<String, ServiceError> {
        if self.identities.exists_by_email(email)? {
            info!("Registration rejected: email already exists");
            return Err(ServiceError::EmailAlreadyExists);
        }

        let identity = Identity::new(email, hash_password(password)?);
        match self.identities.insert(&identity) {
            Ok(()) => {}
            Err(StorageError::DuplicateEmail) => {
                info!("Registration lost race for email");
                return Err(ServiceError::EmailAlreadyExists);
            }
            Err(e) => return Err(e.into()),
        }

        info!(identity_id = %identity.id, "Registered identity");
        self.issue(&identity)
    }

    /// Check credentials and return a session token.
    ///
    /// Unknown email and wrong password produce the same `InvalidCredentials`
    /// and cost the same Argon2 verification.
    pub fn login(&self, email: &str, password: &str) -> Result<String, ServiceError> {
        let Some(identity) = self.identities.find_by_email(email)? else {
            verify_against_dummy(password);
            warn!("Login failed");
            return Err(ServiceError::InvalidCredentials);
        };

        if !verify_password(password, &identity.password_hash)? {
            warn!(identity_id = %identity.id, "Login failed");
            return Err(ServiceError::InvalidCredentials);
        }

        info!(identity_id = %identity.id, "Login succeeded");
        self.issue(&identity)
    }

    fn issue(&self, identity: &Identity) -> Result<String, ServiceError> {
        self.codec
            .issue(&identity.email, identity.id)
            .map_err(ServiceError::TokenIssue)
    }
}
