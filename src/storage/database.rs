// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded identity and audit database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `identities`: identity id → serialized Identity
//! - `identity_emails`: email → identity id (uniqueness index)
//! - `audit_records`: composite key (identity|time|record) → serialized AuditRecord

use std::path::{Path, PathBuf};

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use uuid::Uuid;

use super::{AuditRecord, AuditStore, Identity, IdentityStore, StorageError, StorageResult};

// =============================================================================
// Table Definitions
// =============================================================================

/// Primary table: identity id (hyphenated) → serialized Identity (JSON bytes).
const IDENTITIES: TableDefinition<&str, &[u8]> = TableDefinition::new("identities");

/// Index: email exactly as registered → identity id.
const IDENTITY_EMAILS: TableDefinition<&str, &str> = TableDefinition::new("identity_emails");

/// Audit log: `identity_id | ordered_millis_be | record_id` → serialized AuditRecord.
const AUDIT_RECORDS: TableDefinition<&[u8], &[u8]> = TableDefinition::new("audit_records");

/// File name of the database inside the data directory.
pub const DATABASE_FILE: &str = "textrelay.redb";

// =============================================================================
// Audit Key Helpers
// =============================================================================

/// Map a signed millisecond timestamp onto `u64` so byte order matches time order.
fn ordered_millis(millis: i64) -> u64 {
    (millis as u64) ^ (1 << 63)
}

/// Build a composite key for the audit_records table.
///
/// Format: `identity_id (16) | ordered_millis_be (8) | record_id (16)`
///
/// Keys for one identity are contiguous and sorted oldest first.
fn make_audit_key(record: &AuditRecord) -> Vec<u8> {
    let mut key = Vec::with_capacity(40);
    key.extend_from_slice(record.identity_id.as_bytes());
    key.extend_from_slice(&ordered_millis(record.created_at.timestamp_millis()).to_be_bytes());
    key.extend_from_slice(record.id.as_bytes());
    key
}

/// Lower bound for scanning one identity's records.
fn make_prefix(identity_id: Uuid) -> Vec<u8> {
    identity_id.as_bytes().to_vec()
}

/// Upper bound for scanning one identity's records.
fn make_prefix_end(identity_id: Uuid) -> Vec<u8> {
    let mut end = Vec::with_capacity(16 + 24);
    end.extend_from_slice(identity_id.as_bytes());
    end.extend_from_slice(&[0xFF; 24]);
    end
}

// =============================================================================
// RedbStore
// =============================================================================

/// Embedded ACID store for identities and audit records.
pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(IDENTITIES)?;
            let _ = write_txn.open_table(IDENTITY_EMAILS)?;
            let _ = write_txn.open_table(AUDIT_RECORDS)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Open the database file inside a data directory.
    pub fn open_in(data_dir: &Path) -> StorageResult<Self> {
        Self::open(&Self::path_in(data_dir))
    }

    /// Location of the database file inside a data directory.
    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join(DATABASE_FILE)
    }
}

impl IdentityStore for RedbStore {
    /// Uniqueness check and insert share one write transaction.
    fn insert(&self, identity: &Identity) -> StorageResult<()> {
        let json = serde_json::to_vec(identity)?;
        let id = identity.id.to_string();

        let write_txn = self.db.begin_write()?;
        let conflict = {
            let mut emails = write_txn.open_table(IDENTITY_EMAILS)?;
            let mut identities = write_txn.open_table(IDENTITIES)?;

            if emails.get(identity.email.as_str())?.is_some() {
                Some(StorageError::DuplicateEmail)
            } else if identities.get(id.as_str())?.is_some() {
                Some(StorageError::DuplicateId(identity.id))
            } else {
                identities.insert(id.as_str(), json.as_slice())?;
                emails.insert(identity.email.as_str(), id.as_str())?;
                None
            }
        };

        if let Some(err) = conflict {
            write_txn.abort()?;
            return Err(err);
        }
        write_txn.commit()?;
        Ok(())
    }

    fn find_by_email(&self, email: &str) -> StorageResult<Option<Identity>> {
        let read_txn = self.db.begin_read()?;
        let emails = read_txn.open_table(IDENTITY_EMAILS)?;
        let id = match emails.get(email)? {
            Some(value) => value.value().to_string(),
            None => return Ok(None),
        };

        let identities = read_txn.open_table(IDENTITIES)?;
        match identities.get(id.as_str())? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    fn find_by_id(&self, id: Uuid) -> StorageResult<Option<Identity>> {
        let read_txn = self.db.begin_read()?;
        let identities = read_txn.open_table(IDENTITIES)?;
        let key = id.to_string();
        match identities.get(key.as_str())? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }
}

impl AuditStore for RedbStore {
    fn append(&self, record: &AuditRecord) -> StorageResult<()> {
        let json = serde_json::to_vec(record)?;
        let key = make_audit_key(record);

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(AUDIT_RECORDS)?;
            table.insert(key.as_slice(), json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn list_by_identity(&self, identity_id: Uuid) -> StorageResult<Vec<AuditRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(AUDIT_RECORDS)?;

        let start = make_prefix(identity_id);
        let end = make_prefix_end(identity_id);

        let mut records = Vec::new();
        for entry in table.range(start.as_slice()..end.as_slice())? {
            let (_key, value) = entry?;
            records.push(serde_json::from_slice(value.value())?);
        }
        Ok(records)
    }
}

// =============================================================================
// Tests
// =============================================================================
