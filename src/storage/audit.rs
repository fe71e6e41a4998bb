// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Audit records for completed transformations.
//!
//! One record is written per successful `/api/process` call, after the
//! transformer has answered. Records are never updated or deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// An audit log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuditRecord {
    /// Unique record ID.
    pub id: Uuid,
    /// Identity that requested the transformation.
    pub identity_id: Uuid,
    /// Text sent to the transformer.
    pub input_text: String,
    /// Text the transformer returned.
    pub output_text: String,
    /// When the record was written.
    pub created_at: DateTime<Utc>,
}

impl AuditRecord {
    /// Create a record stamped with the current time.
    pub fn new(
        identity_id: Uuid,
        input_text: impl Into<String>,
        output_text: impl Into<String>,
    ) -> Self {
        Self::at(identity_id, input_text, output_text, Utc::now())
    }

    /// Create a record with an explicit timestamp.
    pub fn at(
        identity_id: Uuid,
        input_text: impl Into<String>,
        output_text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            identity_id,
            input_text: input_text.into(),
            output_text: output_text.into(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_audit_record() {
        let identity_id = Uuid::new_v4();
        let before = Utc::now();
        let record = AuditRecord::new(identity_id, "hello", "OLLEH [TRANSFORMED]");

        assert_eq!(record.identity_id, identity_id);
        assert_eq!(record.input_text, "hello");
        assert_eq!(record.output_text, "OLLEH [TRANSFORMED]");
        assert!(record.created_at >= before);
    }

    #[test]
    fn records_get_distinct_ids() {
        let identity_id = Uuid::new_v4();
        let a = AuditRecord::new(identity_id, "a", "A");
        let b = AuditRecord::new(identity_id, "a", "A");
        assert_ne!(a.id, b.id);
    }
}
