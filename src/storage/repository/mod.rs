// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to the document store.
//!
//! Each repository provides CRUD operations for a specific entity type,
//! using the DocumentStore for all file operations.

pub mod cart;
pub mod products;
pub mod users;

pub use cart::{CartRepository, StoredCartItem};
pub use products::{ProductRepository, StoredProduct};
pub use users::{StoredUser, UserRepository};
