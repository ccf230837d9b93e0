// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Product catalog repository.
//!
//! Each product is a single document under `/data/products/{product_id}.json`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::{DocumentStore, StorageError, StorageResult};

/// Catalog product record stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredProduct {
    /// Unique product identifier (UUID)
    pub id: String,
    /// Product name
    pub name: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Unit price, non-negative
    pub price: f64,
    /// Units in stock
    pub stock: u32,
    /// When the product was created
    pub created_at: DateTime<Utc>,
    /// When the product was last modified
    pub updated_at: DateTime<Utc>,
}

/// Repository for catalog operations on the document store.
pub struct ProductRepository<'a> {
    storage: &'a DocumentStore,
}

impl<'a> ProductRepository<'a> {
    /// Create a new ProductRepository.
    pub fn new(storage: &'a DocumentStore) -> Self {
        Self { storage }
    }

    /// Check if a product exists.
    pub fn exists(&self, product_id: &str) -> bool {
        self.storage.exists(self.storage.paths().product(product_id))
    }

    /// Get a product by ID.
    pub fn get(&self, product_id: &str) -> StorageResult<StoredProduct> {
        let path = self.storage.paths().product(product_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("Product {product_id}")));
        }
        self.storage.read_json(path)
    }

    /// Create a new product.
    pub fn create(&self, product: &StoredProduct) -> StorageResult<()> {
        if self.exists(&product.id) {
            return Err(StorageError::AlreadyExists(format!(
                "Product {}",
                product.id
            )));
        }

        self.storage
            .write_json(self.storage.paths().product(&product.id), product)
    }

    /// Overwrite an existing product record.
    pub fn update(&self, product: &StoredProduct) -> StorageResult<()> {
        if !self.exists(&product.id) {
            return Err(StorageError::NotFound(format!("Product {}", product.id)));
        }

        self.storage
            .write_json(self.storage.paths().product(&product.id), product)
    }

    /// Delete a product.
    pub fn delete(&self, product_id: &str) -> StorageResult<()> {
        if !self.exists(product_id) {
            return Err(StorageError::NotFound(format!("Product {product_id}")));
        }

        self.storage.delete(self.storage.paths().product(product_id))
    }

    /// List the whole catalog.
    ///
    /// Unreadable documents are skipped rather than failing the listing.
    pub fn list_all(&self) -> StorageResult<Vec<StoredProduct>> {
        let product_ids = self
            .storage
            .list_files(self.storage.paths().products_dir(), "json")?;

        let mut products = Vec::new();
        for product_id in &product_ids {
            if let Ok(product) = self.get(product_id) {
                products.push(product);
            }
        }

        Ok(products)
    }
}
