// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User account repository.
//!
//! ## Storage Layout
//!
//! Each account is a single document:
//! ```text
//! /data/users/{user_id}.json
//! ```
//!
//! Email addresses are unique across accounts; `create` rejects a second
//! account with an email that is already registered. The `password` field
//! holds a bcrypt hash and is never serialized into API responses.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::super::{DocumentStore, StorageError, StorageResult};

/// User account record stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUser {
    /// Unique user identifier (UUID)
    pub id: String,
    /// Display name
    pub name: String,
    /// Login email, unique across all accounts
    pub email: String,
    /// bcrypt hash of the password, never the plaintext
    pub password: String,
    /// Date of birth
    pub dob: NaiveDate,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// When the account was last modified
    pub updated_at: DateTime<Utc>,
}

/// Repository for user account operations on the document store.
pub struct UserRepository<'a> {
    storage: &'a DocumentStore,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository.
    pub fn new(storage: &'a DocumentStore) -> Self {
        Self { storage }
    }

    /// Check if a user exists.
    pub fn exists(&self, user_id: &str) -> bool {
        self.storage.exists(self.storage.paths().user(user_id))
    }

    /// Get a user record by ID.
    pub fn get(&self, user_id: &str) -> StorageResult<StoredUser> {
        let path = self.storage.paths().user(user_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("User {user_id}")));
        }
        self.storage.read_json(path)
    }

    /// Create a new user account.
    ///
    /// # Returns
    /// - `Ok(())` if successful
    /// - `Err(StorageError::AlreadyExists)` if the id or email is taken
    pub fn create(&self, user: &StoredUser) -> StorageResult<()> {
        if self.exists(&user.id) {
            return Err(StorageError::AlreadyExists(format!("User {}", user.id)));
        }

        if self.find_by_email(&user.email)?.is_some() {
            return Err(StorageError::AlreadyExists(format!(
                "Email {}",
                user.email
            )));
        }

        self.storage
            .write_json(self.storage.paths().user(&user.id), user)
    }

    /// Look up a user by email.
    ///
    /// Scans all account documents; emails compare exactly.
    pub fn find_by_email(&self, email: &str) -> StorageResult<Option<StoredUser>> {
        let user_ids = self
            .storage
            .list_files(self.storage.paths().users_dir(), "json")?;

        for user_id in &user_ids {
            if let Ok(user) = self.get(user_id) {
                if user.email == email {
                    return Ok(Some(user));
                }
            }
        }

        Ok(None)
    }
}
