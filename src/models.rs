// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response structures for the REST API. All types derive
//! `Serialize`/`Deserialize` and `ToSchema` for JSON handling and OpenAPI
//! documentation.
//!
//! Timestamps go over the wire as `createdAt`/`updatedAt` while the stored
//! records use snake_case; the explicit `From<Stored*>` impls below are the
//! only place that translation happens. Password hashes never appear in any
//! response type.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::storage::{StoredCartItem, StoredProduct, StoredUser};

// =============================================================================
// User Models
// =============================================================================

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignUpRequest {
    /// Display name.
    pub name: String,
    /// Login email, unique across accounts.
    pub email: String,
    /// Plaintext password; hashed before storage.
    pub password: String,
    /// Date of birth (`YYYY-MM-DD`).
    pub dob: NaiveDate,
}

/// Request to sign in to an existing account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Public view of an account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub dob: NaiveDate,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<StoredUser> for UserResponse {
    fn from(user: StoredUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            dob: user.dob,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Response to registration and sign-in: the account plus a token pair.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

// =============================================================================
// Product Models
// =============================================================================

/// Request to add a product to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    /// Unit price, must be non-negative.
    pub price: f64,
    /// Units in stock.
    pub stock: u32,
}

/// Partial update of a product; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<u32>,
}

/// Public view of a catalog product.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: u32,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<StoredProduct> for ProductResponse {
    fn from(product: StoredProduct) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

// =============================================================================
// Cart Models
// =============================================================================

/// Request to add one unit of a product to the cart.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddCartItemRequest {
    pub product_id: String,
}

/// Public view of a cart line item.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartItemResponse {
    pub id: String,
    pub user_id: String,
    pub product_id: String,
    pub quantity: u32,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<StoredCartItem> for CartItemResponse {
    fn from(item: StoredCartItem) -> Self {
        Self {
            id: item.id,
            user_id: item.user_id,
            product_id: item.product_id,
            quantity: item.quantity,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

// =============================================================================
// Shared Models
// =============================================================================

/// Plain confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
