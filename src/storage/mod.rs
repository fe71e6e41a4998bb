// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! Persistence contracts for identities and the processing audit log, with
//! two implementations:
//!
//! - [`InMemoryStore`]: mutex-guarded maps, for tests and throwaway runs
//! - [`RedbStore`]: embedded ACID database under `DATA_DIR`
//!
//! ## Storage Layout (redb)
//!
//! ```text
//! {DATA_DIR}/textrelay.redb
//!   identities       id → Identity (JSON)
//!   identity_emails  email → id            (uniqueness index)
//!   audit_records    identity|time|id → AuditRecord (JSON)
//! ```
//!
//! ## Invariants
//!
//! - Email uniqueness is enforced inside a single write transaction (or a
//!   single lock for the in-memory store), so concurrent registrations with
//!   the same email cannot both succeed.
//! - Audit records are append-only; there is no update or delete.
//! - Timestamps are assigned by the caller before a record reaches the store.

pub mod audit;
pub mod database;
pub mod identity;
pub mod memory;

pub use audit::AuditRecord;
pub use database::RedbStore;
pub use identity::Identity;
pub use memory::InMemoryStore;

use uuid::Uuid;

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("email is already registered")]
    DuplicateEmail,

    #[error("record {0} already exists")]
    DuplicateId(Uuid),

    #[error("storage lock poisoned")]
    Poisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Registered identities.
pub trait IdentityStore: Send + Sync {
    /// Persist a new identity.
    ///
    /// Fails with [`StorageError::DuplicateEmail`] if the email is taken.
    fn insert(&self, identity: &Identity) -> StorageResult<()>;

    /// Look up an identity by exact email.
    fn find_by_email(&self, email: &str) -> StorageResult<Option<Identity>>;

    /// Look up an identity by id.
    fn find_by_id(&self, id: Uuid) -> StorageResult<Option<Identity>>;

    /// Whether an identity with this exact email exists.
    fn exists_by_email(&self, email: &str) -> StorageResult<bool> {
        Ok(self.find_by_email(email)?.is_some())
    }
}

/// Append-only log of completed transformations.
pub trait AuditStore: Send + Sync {
    /// Append one record.
    fn append(&self, record: &AuditRecord) -> StorageResult<()>;

    /// All records for an identity, oldest first.
    fn list_by_identity(&self, identity_id: Uuid) -> StorageResult<Vec<AuditRecord>>;
}
