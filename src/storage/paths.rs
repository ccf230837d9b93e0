// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path constants and utilities for the document store layout.

use std::path::{Path, PathBuf};

/// Base directory for all persistent documents.
pub const DATA_ROOT: &str = "/data";

/// Storage path utilities for the document filesystem.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DATA_ROOT)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // ========== User Paths ==========

    /// Directory containing all user records.
    pub fn users_dir(&self) -> PathBuf {
        self.root.join("users")
    }

    /// Path to a specific user record.
    pub fn user(&self, user_id: &str) -> PathBuf {
        self.users_dir().join(format!("{user_id}.json"))
    }

    // ========== Product Paths ==========

    /// Directory containing all catalog products.
    pub fn products_dir(&self) -> PathBuf {
        self.root.join("products")
    }

    /// Path to a specific product record.
    pub fn product(&self, product_id: &str) -> PathBuf {
        self.products_dir().join(format!("{product_id}.json"))
    }

    // ========== Cart Item Paths ==========

    /// Directory containing all cart items (across all users).
    pub fn cart_items_dir(&self) -> PathBuf {
        self.root.join("cart_items")
    }

    /// Path to a specific cart item record.
    pub fn cart_item(&self, cart_item_id: &str) -> PathBuf {
        self.cart_items_dir().join(format!("{cart_item_id}.json"))
    }
}
