// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password hashing.
//!
//! bcrypt at the default cost. The stored value is the full bcrypt string
//! (salt included); verification never needs the plaintext back.

use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};

/// Hash a plaintext password for storage.
pub fn hash_password(plain: &str) -> Result<String, BcryptError> {
    hash(plain, DEFAULT_COST)
}

/// Check a plaintext password against a stored hash.
///
/// A malformed stored hash counts as a failed match rather than an error;
/// the caller only ever learns yes or no.
pub fn verify_password(plain: &str, hashed: &str) -> bool {
    verify(plain, hashed).unwrap_or(false)
}
