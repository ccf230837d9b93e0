// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Product catalog endpoints.
//!
//! Catalog management is open: none of these endpoints require a bearer
//! token. Partial updates only touch the fields present in the request.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::{
    error::{ApiError, AppJson},
    models::{CreateProductRequest, MessageResponse, ProductResponse, UpdateProductRequest},
    state::AppState,
    storage::{ProductRepository, StorageError, StoredProduct},
};

/// Maximum accepted product name length.
const MAX_NAME_LENGTH: usize = 255;

fn validate_name(name: &str) -> Result<(), ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::validation("Product name must not be empty"));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(ApiError::validation(format!(
            "Product name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), ApiError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ApiError::validation("Price must be a non-negative number"));
    }
    Ok(())
}

fn product_not_found(e: StorageError) -> ApiError {
    match e {
        StorageError::NotFound(_) => ApiError::not_found("Product not found"),
        other => other.into(),
    }
}

/// Add a product to the catalog.
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid input"),
        (status = 422, description = "Malformed request body"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    validate_name(&request.name)?;
    validate_price(request.price)?;

    let now = Utc::now();
    let product = StoredProduct {
        id: uuid::Uuid::new_v4().to_string(),
        name: request.name.trim().to_string(),
        description: request.description,
        price: request.price,
        stock: request.stock,
        created_at: now,
        updated_at: now,
    };

    {
        let store = state.store.write().await;
        ProductRepository::new(&store).create(&product)?;
    }

    tracing::info!(product_id = %product.id, "product created");

    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

/// List the whole catalog.
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses(
        (status = 200, description = "All products", body = [ProductResponse]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = {
        let store = state.store.read().await;
        ProductRepository::new(&store).list_all()?
    };

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

/// Update a product. Fields absent from the body keep their current value.
#[utoipa::path(
    put,
    path = "/api/products/{product_id}",
    tag = "Products",
    params(
        ("product_id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ProductResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Product not found"),
        (status = 422, description = "Malformed request body"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    AppJson(request): AppJson<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    if let Some(ref name) = request.name {
        validate_name(name)?;
    }
    if let Some(price) = request.price {
        validate_price(price)?;
    }

    let store = state.store.write().await;
    let repo = ProductRepository::new(&store);

    let mut product = repo.get(&product_id).map_err(product_not_found)?;

    if let Some(name) = request.name {
        product.name = name.trim().to_string();
    }
    if let Some(description) = request.description {
        product.description = Some(description);
    }
    if let Some(price) = request.price {
        product.price = price;
    }
    if let Some(stock) = request.stock {
        product.stock = stock;
    }
    product.updated_at = Utc::now();

    repo.update(&product)?;

    tracing::info!(product_id = %product.id, "product updated");

    Ok(Json(ProductResponse::from(product)))
}

/// Remove a product from the catalog.
#[utoipa::path(
    delete,
    path = "/api/products/{product_id}",
    tag = "Products",
    params(
        ("product_id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    {
        let store = state.store.write().await;
        let repo = ProductRepository::new(&store);

        if !repo.exists(&product_id) {
            return Err(ApiError::not_found("Product not found"));
        }
        repo.delete(&product_id)?;
    }

    tracing::info!(product_id = %product_id, "product deleted");

    Ok(Json(MessageResponse {
        message: "Product deleted successfully".to_string(),
    }))
}
