// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{InternalTrustGate, TokenCodec};
use crate::config::{GatewayConfig, TransformerConfig};
use crate::error::ServiceError;
use crate::providers::TransformerClient;
use crate::services::{AuthCoordinator, RequestGateway};
use crate::storage::{AuditStore, IdentityStore};

/// Shared state of the gateway service.
#[derive(Clone)]
pub struct GatewayState {
    pub auth: Arc<AuthCoordinator>,
    pub gateway: Arc<RequestGateway>,
    pub transformer: TransformerClient,
}

impl GatewayState {
    /// Wire the gateway from its collaborators.
    pub fn new(
        codec: Arc<TokenCodec>,
        identities: Arc<dyn IdentityStore>,
        audit: Arc<dyn AuditStore>,
        transformer: TransformerClient,
    ) -> Self {
        Self {
            auth: Arc::new(AuthCoordinator::new(identities.clone(), codec.clone())),
            gateway: Arc::new(RequestGateway::new(
                codec,
                identities,
                audit,
                transformer.clone(),
            )),
            transformer,
        }
    }

    /// Wire the gateway from configuration and an opened store.
    pub fn from_config<S>(config: &GatewayConfig, store: Arc<S>) -> Result<Self, ServiceError>
    where
        S: IdentityStore + AuditStore + 'static,
    {
        let codec = TokenCodec::from_config(config)
            .map_err(|e| ServiceError::Internal(format!("invalid signing key: {e}")))?;
        let transformer = TransformerClient::from_config(config)?;
        Ok(Self::new(Arc::new(codec), store.clone(), store, transformer))
    }
}

/// Shared state of the transformer service.
#[derive(Clone, Debug)]
pub struct TransformerState {
    pub gate: InternalTrustGate,
}

impl TransformerState {
    pub fn new(gate: InternalTrustGate) -> Self {
        Self { gate }
    }

    pub fn from_config(config: &TransformerConfig) -> Self {
        Self::new(InternalTrustGate::new(config.internal_secret.clone()))
    }
}
