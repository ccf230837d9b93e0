// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authorization gate for user-scoped endpoints.
//!
//! Every request that targets `/api/users/{user_id}/...` passes through
//! `authenticate`, which ties the bearer token to the user id in the path.
//! The checks run in a fixed order so each failure mode keeps its own
//! status: bad token 401, unknown subject 404, wrong subject 403.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use super::{AuthError, TokenCodec};
use crate::storage::{DocumentStore, StorageError, StoredUser, UserRepository};

/// Verifies that a bearer token belongs to the user a request targets.
#[derive(Clone)]
pub struct AuthGate {
    tokens: Arc<TokenCodec>,
    store: Arc<RwLock<DocumentStore>>,
}

impl AuthGate {
    pub fn new(tokens: Arc<TokenCodec>, store: Arc<RwLock<DocumentStore>>) -> Self {
        Self { tokens, store }
    }

    /// Resolve a token to a stored user and confirm it matches the claimed id.
    ///
    /// Order of checks:
    /// 1. signature and structure (`InvalidToken`)
    /// 2. expiry, re-checked without leeway (`TokenExpired`)
    /// 3. presence of a subject claim (`InvalidToken`)
    /// 4. subject resolves to an account (`UserNotFound`)
    /// 5. subject equals `claimed_user_id` (`NotAuthorized`)
    pub async fn authenticate(
        &self,
        token: &str,
        claimed_user_id: &str,
    ) -> Result<StoredUser, AuthError> {
        let claims = self.tokens.decode(token)?;

        if claims.is_expired(Utc::now()) {
            return Err(AuthError::TokenExpired);
        }

        let Some(subject) = claims.sub else {
            return Err(AuthError::InvalidToken);
        };

        let store = self.store.read().await;
        let user = UserRepository::new(&store)
            .get(&subject)
            .map_err(|e| match e {
                StorageError::NotFound(_) => AuthError::UserNotFound,
                other => AuthError::Internal(other.to_string()),
            })?;
        drop(store);

        if user.id != claimed_user_id {
            return Err(AuthError::NotAuthorized);
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Claims;
    use crate::config::AuthSettings;
    use crate::storage::{DocumentStore, StoragePaths};
    use chrono::{Duration, NaiveDate};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use tempfile::TempDir;

    const SECRET: &str = "gate-test-secret";

    fn test_gate() -> (AuthGate, Arc<RwLock<DocumentStore>>, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut store = DocumentStore::new(StoragePaths::new(temp_dir.path()));
        store.initialize().expect("Failed to initialize storage");

        let store = Arc::new(RwLock::new(store));
        let tokens = Arc::new(TokenCodec::new(AuthSettings::new(SECRET)));
        let gate = AuthGate::new(tokens, Arc::clone(&store));
        (gate, store, temp_dir)
    }

    async fn seed_user(store: &Arc<RwLock<DocumentStore>>, id: &str) {
        let store = store.read().await;
        let repo = UserRepository::new(&store);
        repo.create(&StoredUser {
            id: id.to_string(),
            name: "Jane Doe".to_string(),
            email: format!("{id}@example.com"),
            password: "$2b$12$fake.hash.for.tests".to_string(),
            dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
        .expect("seed user");
    }

    fn raw_token(claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn own_token_authenticates() {
        let (gate, store, _temp) = test_gate();
        seed_user(&store, "user-a").await;

        let token = TokenCodec::new(AuthSettings::new(SECRET))
            .issue_access_token("user-a")
            .unwrap();

        let user = gate.authenticate(&token, "user-a").await.expect("gate passes");
        assert_eq!(user.id, "user-a");
    }

    #[tokio::test]
    async fn another_users_token_is_forbidden() {
        let (gate, store, _temp) = test_gate();
        seed_user(&store, "user-a").await;
        seed_user(&store, "user-b").await;

        let token = TokenCodec::new(AuthSettings::new(SECRET))
            .issue_access_token("user-a")
            .unwrap();

        let result = gate.authenticate(&token, "user-b").await;
        assert!(matches!(result, Err(AuthError::NotAuthorized)));
    }

    #[tokio::test]
    async fn expired_token_is_rejected_before_identity_checks() {
        let (gate, store, _temp) = test_gate();
        seed_user(&store, "user-a").await;

        let now = Utc::now();
        let token = raw_token(&Claims {
            sub: Some("user-a".to_string()),
            iat: (now - Duration::days(2)).timestamp(),
            exp: (now - Duration::days(1)).timestamp(),
        });

        let result = gate.authenticate(&token, "user-a").await;
        assert!(matches!(result, Err(AuthError::TokenExpired)));

        // Same answer regardless of the claimed target.
        let result = gate.authenticate(&token, "user-b").await;
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[tokio::test]
    async fn token_without_subject_is_invalid() {
        let (gate, _store, _temp) = test_gate();

        let now = Utc::now();
        let token = raw_token(&Claims {
            sub: None,
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        });

        let result = gate.authenticate(&token, "user-a").await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn token_for_deleted_user_is_not_found() {
        let (gate, store, _temp) = test_gate();
        seed_user(&store, "user-a").await;

        let token = TokenCodec::new(AuthSettings::new(SECRET))
            .issue_access_token("user-a")
            .unwrap();

        {
            let store = store.read().await;
            let path = store.paths().user("user-a");
            store.delete(path).unwrap();
        }

        let result = gate.authenticate(&token, "user-a").await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn garbage_token_is_invalid() {
        let (gate, _store, _temp) = test_gate();

        let result = gate.authenticate("garbage", "user-a").await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }
}
