// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory store for tests and ephemeral deployments.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use super::{AuditRecord, AuditStore, Identity, IdentityStore, StorageError, StorageResult};

#[derive(Default)]
struct Inner {
    identities: HashMap<Uuid, Identity>,
    emails: HashMap<String, Uuid>,
    audit: Vec<AuditRecord>,
}

/// Identity and audit storage held in process memory.
///
/// A single lock covers both the uniqueness check and the insert.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of audit records across all identities.
    pub fn audit_len(&self) -> StorageResult<usize> {
        Ok(self.lock()?.audit.len())
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Inner>> {
        self.inner.lock().map_err(|_| StorageError::Poisoned)
    }
}

impl IdentityStore for InMemoryStore {
    fn insert(&self, identity: &Identity) -> StorageResult<()> {
        let mut inner = self.lock()?;
        if inner.emails.contains_key(&identity.email) {
            return Err(StorageError::DuplicateEmail);
        }
        if inner.identities.contains_key(&identity.id) {
            return Err(StorageError::DuplicateId(identity.id));
        }

        inner.emails.insert(identity.email.clone(), identity.id);
        inner.identities.insert(identity.id, identity.clone());
        Ok(())
    }

    fn find_by_email(&self, email: &str) -> StorageResult<Option<Identity>> {
        let inner = self.lock()?;
        Ok(inner
            .emails
            .get(email)
            .and_then(|id| inner.identities.get(id))
            .cloned())
    }

    fn find_by_id(&self, id: Uuid) -> StorageResult<Option<Identity>> {
        Ok(self.lock()?.identities.get(&id).cloned())
    }
}

impl AuditStore for InMemoryStore {
    fn append(&self, record: &AuditRecord) -> StorageResult<()> {
        self.lock()?.audit.push(record.clone());
        Ok(())
    }

    fn list_by_identity(&self, identity_id: Uuid) -> StorageResult<Vec<AuditRecord>> {
        let mut records: Vec<AuditRecord> = self
            .lock()?
            .audit
            .iter()
            .filter(|record| record.identity_id == identity_id)
            .cloned()
            .collect();
        records.sort_by_key(|record| record.created_at);
        Ok(records)
    }
}
