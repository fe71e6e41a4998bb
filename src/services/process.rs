// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authenticated text processing: bearer check, transformer call, audit.

use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::{parse_bearer, TokenCodec};
use crate::error::ServiceError;
use crate::providers::TransformerClient;
use crate::storage::{AuditRecord, AuditStore, IdentityStore, StorageResult};

/// Front-door orchestration for `/api/process`.
pub struct RequestGateway {
    codec: Arc<TokenCodec>,
    identities: Arc<dyn IdentityStore>,
    audit: Arc<dyn AuditStore>,
    transformer: TransformerClient,
}

impl RequestGateway {
    pub fn new(
        codec: Arc<TokenCodec>,
        identities: Arc<dyn IdentityStore>,
        audit: Arc<dyn AuditStore>,
        transformer: TransformerClient,
    ) -> Self {
        Self {
            codec,
            identities,
            audit,
            transformer,
        }
    }

    /// Authenticate the caller, transform `text` and record the exchange.
    ///
    /// The audit record is appended only after the transformer has answered
    /// successfully; every earlier failure leaves the audit log untouched.
    /// Returns the record that was appended.
    pub async fn handle(
        &self,
        authorization: Option<&str>,
        text: &str,
    ) -> Result<AuditRecord, ServiceError> {
        let token = parse_bearer(authorization).map_err(ServiceError::Unauthenticated)?;
        let claims = self
            .codec
            .authenticate(token)
            .map_err(ServiceError::Unauthenticated)?;

        let identity_id = claims.user_id;
        let identities = self.identities.clone();
        let identity = run_blocking(move || identities.find_by_id(identity_id))
            .await?
            .ok_or(ServiceError::IdentityNotFound(identity_id))?;

        let output = self.transformer.transform(text).await.map_err(|e| {
            warn!(identity_id = %identity.id, error = %e, "Transformer call failed");
            e
        })?;

        let record = AuditRecord::new(identity.id, text, output);
        let audit = self.audit.clone();
        let record = run_blocking(move || audit.append(&record).map(|()| record)).await?;

        info!(
            identity_id = %record.identity_id,
            audit_id = %record.id,
            "Processed text"
        );
        Ok(record)
    }
}

/// Run a store call on the blocking pool; redb commits fsync.
async fn run_blocking<T, F>(call: F) -> Result<T, ServiceError>
where
    F: FnOnce() -> StorageResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(call)
        .await
        .map_err(|e| ServiceError::Internal(format!("store task failed: {e}")))?
        .map_err(ServiceError::from)
}
