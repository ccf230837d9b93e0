// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Document Storage Module
//!
//! Persistent storage as one JSON file per record under the data root
//! (`DATA_DIR`, `/data` by default). Writes are atomic via temp-file
//! rename; there is no database server to provision.
//!
//! ## Storage Layout
//!
//! ```text
//! /data/
//!   users/
//!     {user_id}.json        # Account record (bcrypt password hash inside)
//!   products/
//!     {product_id}.json     # Catalog entry
//!   cart_items/
//!     {cart_item_id}.json   # One line item; at most one per (user, product)
//! ```

pub mod document_fs;
pub mod paths;
pub mod repository;

pub use document_fs::{DocumentStore, StorageError, StorageResult};
pub use paths::StoragePaths;
pub use repository::{
    CartRepository, ProductRepository, StoredCartItem, StoredProduct, StoredUser, UserRepository,
};
