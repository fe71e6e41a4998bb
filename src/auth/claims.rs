// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token claims.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by a session token.
///
/// `iat` and `exp` are Unix timestamps in seconds, as in any JWT.
/// The identity id travels as a custom `userId` claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the identity's email, exactly as stored
    pub sub: String,

    /// Identity id
    #[serde(rename = "userId")]
    pub user_id: Uuid,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl SessionClaims {
    /// Expiry as a UTC instant.
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Issue time as a UTC instant.
    pub fn issued_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.iat, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// A token is expired at and after its `exp` instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_claims() -> SessionClaims {
        SessionClaims {
            sub: "a@x.com".to_string(),
            user_id: Uuid::nil(),
            iat: 1_700_000_000,
            exp: 1_700_003_600,
        }
    }

    #[test]
    fn user_id_serializes_as_camel_case_string() {
        let json = serde_json::to_value(sample_claims()).unwrap();
        assert_eq!(json["userId"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["sub"], "a@x.com");
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let claims = sample_claims();
        let exp = claims.expires_at();

        assert!(!claims.is_expired_at(exp - chrono::Duration::milliseconds(1)));
        assert!(claims.is_expired_at(exp));
        assert!(claims.is_expired_at(exp + chrono::Duration::seconds(1)));
    }

    #[test]
    fn out_of_range_expiry_counts_as_expired() {
        let mut claims = sample_claims();
        claims.exp = i64::MAX;
        assert!(claims.is_expired_at(Utc::now()));
    }
}
