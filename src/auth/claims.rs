// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims carried by issued tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims encoded into access and refresh tokens.
///
/// `sub` is optional on the decode side: a token can be well signed and
/// still carry no subject, which the gate rejects as invalid rather than
/// failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Issued at timestamp
    #[serde(default)]
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Whether the expiry lies in the past relative to `now`.
    ///
    /// The decoder already rejects expired tokens (with leeway); this is
    /// the exact check the gate re-runs without leeway.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp < now.timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn expiry_in_the_past_is_expired() {
        let now = Utc::now();
        let claims = Claims {
            sub: Some("user-1".to_string()),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        assert!(claims.is_expired(now));
    }

    #[test]
    fn expiry_in_the_future_is_not_expired() {
        let now = Utc::now();
        let claims = Claims {
            sub: Some("user-1".to_string()),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };
        assert!(!claims.is_expired(now));
    }

    #[test]
    fn missing_sub_deserializes_as_none() {
        let claims: Claims = serde_json::from_str(r#"{"iat":1700000000,"exp":1700003600}"#)
            .expect("claims without sub parse");
        assert!(claims.sub.is_none());
    }
}
