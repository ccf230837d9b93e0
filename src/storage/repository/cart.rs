// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shopping cart repository.
//!
//! ## Storage Layout
//!
//! Cart items for all users share one directory:
//! ```text
//! /data/cart_items/{cart_item_id}.json
//! ```
//!
//! A user holds at most one item per product; callers look the pair up with
//! `find_by_user_and_product` and bump the quantity instead of inserting a
//! second row. Quantities are always positive; an item whose quantity would
//! reach zero is deleted instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::{DocumentStore, StorageError, StorageResult};

/// Cart line item stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCartItem {
    /// Unique cart item identifier (UUID)
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Referenced product
    pub product_id: String,
    /// Number of units, always positive
    pub quantity: u32,
    /// When the item was first added
    pub created_at: DateTime<Utc>,
    /// When the quantity last changed
    pub updated_at: DateTime<Utc>,
}

/// Repository for cart operations on the document store.
pub struct CartRepository<'a> {
    storage: &'a DocumentStore,
}

impl<'a> CartRepository<'a> {
    /// Create a new CartRepository.
    pub fn new(storage: &'a DocumentStore) -> Self {
        Self { storage }
    }

    /// Check if a cart item exists.
    pub fn exists(&self, cart_item_id: &str) -> bool {
        self.storage
            .exists(self.storage.paths().cart_item(cart_item_id))
    }

    /// Get a cart item by ID.
    pub fn get(&self, cart_item_id: &str) -> StorageResult<StoredCartItem> {
        let path = self.storage.paths().cart_item(cart_item_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("Cart item {cart_item_id}")));
        }
        self.storage.read_json(path)
    }

    /// Get a cart item by ID, scoped to its owner.
    ///
    /// Returns NotFound when the item belongs to a different user, so the
    /// caller cannot distinguish someone else's item from a missing one.
    pub fn get_for_user(
        &self,
        cart_item_id: &str,
        user_id: &str,
    ) -> StorageResult<StoredCartItem> {
        let item = self.get(cart_item_id)?;

        if item.user_id != user_id {
            return Err(StorageError::NotFound(format!(
                "Cart item {cart_item_id} not found for user"
            )));
        }

        Ok(item)
    }

    /// Find the item a user holds for a specific product, if any.
    pub fn find_by_user_and_product(
        &self,
        user_id: &str,
        product_id: &str,
    ) -> StorageResult<Option<StoredCartItem>> {
        let item_ids = self
            .storage
            .list_files(self.storage.paths().cart_items_dir(), "json")?;

        for item_id in &item_ids {
            if let Ok(item) = self.get(item_id) {
                if item.user_id == user_id && item.product_id == product_id {
                    return Ok(Some(item));
                }
            }
        }

        Ok(None)
    }

    /// List all cart items owned by a user.
    pub fn list_by_user(&self, user_id: &str) -> StorageResult<Vec<StoredCartItem>> {
        let item_ids = self
            .storage
            .list_files(self.storage.paths().cart_items_dir(), "json")?;

        let mut items = Vec::new();
        for item_id in &item_ids {
            if let Ok(item) = self.get(item_id) {
                if item.user_id == user_id {
                    items.push(item);
                }
            }
        }

        Ok(items)
    }

    /// Create a new cart item.
    pub fn create(&self, item: &StoredCartItem) -> StorageResult<()> {
        if self.exists(&item.id) {
            return Err(StorageError::AlreadyExists(format!(
                "Cart item {}",
                item.id
            )));
        }

        self.storage
            .write_json(self.storage.paths().cart_item(&item.id), item)
    }

    /// Overwrite an existing cart item record.
    pub fn update(&self, item: &StoredCartItem) -> StorageResult<()> {
        if !self.exists(&item.id) {
            return Err(StorageError::NotFound(format!("Cart item {}", item.id)));
        }

        self.storage
            .write_json(self.storage.paths().cart_item(&item.id), item)
    }

    /// Delete a cart item.
    pub fn delete(&self, cart_item_id: &str) -> StorageResult<()> {
        if !self.exists(cart_item_id) {
            return Err(StorageError::NotFound(format!("Cart item {cart_item_id}")));
        }

        self.storage
            .delete(self.storage.paths().cart_item(cart_item_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DocumentStore, StoragePaths};
    use std::env;
    use std::fs;

    fn test_store() -> DocumentStore {
        let test_dir = env::temp_dir().join(format!("test-cart-repo-{}", uuid::Uuid::new_v4()));
        let paths = StoragePaths::new(&test_dir);
        let mut store = DocumentStore::new(paths);
        store.initialize().expect("Failed to initialize");
        store
    }

    fn cleanup(store: &DocumentStore) {
        let _ = fs::remove_dir_all(store.paths().root());
    }

    fn test_item(id: &str, user_id: &str, product_id: &str) -> StoredCartItem {
        StoredCartItem {
            id: id.to_string(),
            user_id: user_id.to_string(),
            product_id: product_id.to_string(),
            quantity: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn create_and_get_item() {
        let store = test_store();
        let repo = CartRepository::new(&store);

        repo.create(&test_item("ci-1", "user-1", "prod-1")).unwrap();

        let loaded = repo.get("ci-1").unwrap();
        assert_eq!(loaded.user_id, "user-1");
        assert_eq!(loaded.product_id, "prod-1");
        assert_eq!(loaded.quantity, 1);

        cleanup(&store);
    }

    #[test]
    fn get_for_user_rejects_wrong_owner() {
        let store = test_store();
        let repo = CartRepository::new(&store);

        repo.create(&test_item("ci-1", "user-1", "prod-1")).unwrap();

        assert!(repo.get_for_user("ci-1", "user-1").is_ok());

        let result = repo.get_for_user("ci-1", "user-2");
        assert!(matches!(result, Err(StorageError::NotFound(_))));

        cleanup(&store);
    }

    #[test]
    fn find_by_user_and_product_matches_pair() {
        let store = test_store();
        let repo = CartRepository::new(&store);

        repo.create(&test_item("ci-1", "user-1", "prod-1")).unwrap();
        repo.create(&test_item("ci-2", "user-1", "prod-2")).unwrap();
        repo.create(&test_item("ci-3", "user-2", "prod-1")).unwrap();

        let found = repo
            .find_by_user_and_product("user-1", "prod-1")
            .unwrap()
            .expect("item exists");
        assert_eq!(found.id, "ci-1");

        let missing = repo.find_by_user_and_product("user-2", "prod-2").unwrap();
        assert!(missing.is_none());

        cleanup(&store);
    }

    #[test]
    fn list_by_user_filters_correctly() {
        let store = test_store();
        let repo = CartRepository::new(&store);

        repo.create(&test_item("ci-1", "user-1", "prod-1")).unwrap();
        repo.create(&test_item("ci-2", "user-1", "prod-2")).unwrap();
        repo.create(&test_item("ci-3", "user-2", "prod-1")).unwrap();

        let items = repo.list_by_user("user-1").unwrap();
        assert_eq!(items.len(), 2);

        let empty = repo.list_by_user("user-3").unwrap();
        assert!(empty.is_empty());

        cleanup(&store);
    }

    #[test]
    fn update_changes_quantity() {
        let store = test_store();
        let repo = CartRepository::new(&store);

        let mut item = test_item("ci-1", "user-1", "prod-1");
        repo.create(&item).unwrap();

        item.quantity = 3;
        repo.update(&item).unwrap();

        assert_eq!(repo.get("ci-1").unwrap().quantity, 3);

        cleanup(&store);
    }

    #[test]
    fn delete_removes_item() {
        let store = test_store();
        let repo = CartRepository::new(&store);

        repo.create(&test_item("ci-1", "user-1", "prod-1")).unwrap();
        repo.delete("ci-1").unwrap();

        assert!(!repo.exists("ci-1"));
        assert!(matches!(repo.delete("ci-1"), Err(StorageError::NotFound(_))));

        cleanup(&store);
    }
}
