// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shopping cart endpoints.
//!
//! Every handler resolves the bearer token through [`crate::auth::AuthGate`]
//! before touching the store, so a caller can only ever see or mutate their
//! own cart. The gate takes its own read lock on the store; handlers must
//! call it before acquiring theirs.
//!
//! A cart line item is unique per (user, product) pair. Adding an existing
//! product increments its quantity; reducing decrements and deletes the line
//! once the quantity reaches zero.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use crate::{
    auth::BearerToken,
    error::{ApiError, AppJson},
    models::{AddCartItemRequest, CartItemResponse, MessageResponse},
    state::AppState,
    storage::{CartRepository, ProductRepository, StorageError, StoredCartItem},
};

fn cart_item_not_found(e: StorageError) -> ApiError {
    match e {
        StorageError::NotFound(_) => ApiError::not_found("Cart item not found"),
        other => other.into(),
    }
}

/// Add one unit of a product to the cart.
///
/// If the product is already in the cart its quantity goes up by one,
/// otherwise a new line item is created. The existence check and the
/// increment run under a single write lock.
#[utoipa::path(
    post,
    path = "/api/users/{user_id}/cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    params(
        ("user_id" = String, Path, description = "Cart owner")
    ),
    request_body = AddCartItemRequest,
    responses(
        (status = 201, description = "Cart item created or incremented", body = CartItemResponse),
        (status = 401, description = "Missing, invalid or expired token"),
        (status = 403, description = "Token belongs to a different user"),
        (status = 404, description = "Product not found"),
        (status = 422, description = "Malformed request body"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn add_cart_item(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    bearer: BearerToken,
    AppJson(request): AppJson<AddCartItemRequest>,
) -> Result<(StatusCode, Json<CartItemResponse>), ApiError> {
    let user = state.gate.authenticate(bearer.token(), &user_id).await?;

    let store = state.store.write().await;

    if !ProductRepository::new(&store).exists(&request.product_id) {
        return Err(ApiError::not_found("Product not found"));
    }

    let repo = CartRepository::new(&store);
    let item = match repo.find_by_user_and_product(&user.id, &request.product_id)? {
        Some(mut item) => {
            item.quantity += 1;
            item.updated_at = Utc::now();
            repo.update(&item)?;
            item
        }
        None => {
            let now = Utc::now();
            let item = StoredCartItem {
                id: uuid::Uuid::new_v4().to_string(),
                user_id: user.id.clone(),
                product_id: request.product_id.clone(),
                quantity: 1,
                created_at: now,
                updated_at: now,
            };
            repo.create(&item)?;
            item
        }
    };

    tracing::info!(
        user_id = %user.id,
        product_id = %request.product_id,
        quantity = item.quantity,
        "cart item added"
    );

    Ok((StatusCode::CREATED, Json(CartItemResponse::from(item))))
}

/// List the caller's cart.
///
/// An empty cart is reported as 404 rather than an empty list.
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    params(
        ("user_id" = String, Path, description = "Cart owner")
    ),
    responses(
        (status = 200, description = "Cart contents", body = [CartItemResponse]),
        (status = 401, description = "Missing, invalid or expired token"),
        (status = 403, description = "Token belongs to a different user"),
        (status = 404, description = "Cart is empty"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_cart_items(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    bearer: BearerToken,
) -> Result<Json<Vec<CartItemResponse>>, ApiError> {
    let user = state.gate.authenticate(bearer.token(), &user_id).await?;

    let items = {
        let store = state.store.read().await;
        CartRepository::new(&store).list_by_user(&user.id)?
    };

    if items.is_empty() {
        return Err(ApiError::not_found("No items in the cart."));
    }

    Ok(Json(items.into_iter().map(CartItemResponse::from).collect()))
}

/// Remove a cart line item outright, whatever its quantity.
#[utoipa::path(
    delete,
    path = "/api/users/{user_id}/cart/{cart_item_id}",
    tag = "Cart",
    security(("bearer_auth" = [])),
    params(
        ("user_id" = String, Path, description = "Cart owner"),
        ("cart_item_id" = String, Path, description = "Cart item ID")
    ),
    responses(
        (status = 200, description = "Cart item removed", body = MessageResponse),
        (status = 401, description = "Missing, invalid or expired token"),
        (status = 403, description = "Token belongs to a different user"),
        (status = 404, description = "Cart item not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn remove_cart_item(
    State(state): State<AppState>,
    Path((user_id, cart_item_id)): Path<(String, String)>,
    bearer: BearerToken,
) -> Result<Json<MessageResponse>, ApiError> {
    let user = state.gate.authenticate(bearer.token(), &user_id).await?;

    {
        let store = state.store.write().await;
        let repo = CartRepository::new(&store);

        repo.get_for_user(&cart_item_id, &user.id)
            .map_err(cart_item_not_found)?;
        repo.delete(&cart_item_id)?;
    }

    tracing::info!(user_id = %user.id, cart_item_id = %cart_item_id, "cart item removed");

    Ok(Json(MessageResponse {
        message: "Cart item removed successfully".to_string(),
    }))
}

/// Reduce the quantity of a product in the cart by one.
///
/// Returns the updated line item, or a removal message once the quantity
/// reaches zero. The second path segment is the product ID; the route is
/// registered with the same parameter name as the delete route above, so
/// this handler extracts the segments positionally.
#[utoipa::path(
    patch,
    path = "/api/users/{user_id}/cart/{product_id}/reduce",
    tag = "Cart",
    security(("bearer_auth" = [])),
    params(
        ("user_id" = String, Path, description = "Cart owner"),
        ("product_id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Quantity reduced or item removed", body = CartItemResponse),
        (status = 401, description = "Missing, invalid or expired token"),
        (status = 403, description = "Token belongs to a different user"),
        (status = 404, description = "Cart item not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn reduce_cart_item(
    State(state): State<AppState>,
    Path((user_id, product_id)): Path<(String, String)>,
    bearer: BearerToken,
) -> Result<Response, ApiError> {
    let user = state.gate.authenticate(bearer.token(), &user_id).await?;

    let store = state.store.write().await;
    let repo = CartRepository::new(&store);

    let mut item = repo
        .find_by_user_and_product(&user.id, &product_id)?
        .ok_or_else(|| ApiError::not_found("Cart item not found"))?;

    item.quantity -= 1;

    if item.quantity == 0 {
        repo.delete(&item.id)?;
        tracing::info!(
            user_id = %user.id,
            product_id = %product_id,
            "cart item removed after reaching zero"
        );
        return Ok(Json(MessageResponse {
            message: "Cart item removed successfully because quantity reached 0".to_string(),
        })
        .into_response());
    }

    item.updated_at = Utc::now();
    repo.update(&item)?;

    tracing::info!(
        user_id = %user.id,
        product_id = %product_id,
        quantity = item.quantity,
        "cart item quantity reduced"
    );

    Ok(Json(CartItemResponse::from(item)).into_response())
}
