// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        AddCartItemRequest, AuthResponse, CartItemResponse, CreateProductRequest, MessageResponse,
        ProductResponse, SignInRequest, SignUpRequest, UpdateProductRequest, UserResponse,
    },
    state::AppState,
};

pub mod cart;
pub mod health;
pub mod products;
pub mod users;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/users", post(users::sign_up))
        .route("/users/sign_in", post(users::sign_in))
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/{product_id}",
            put(products::update_product).delete(products::delete_product),
        )
        .route(
            "/users/{user_id}/cart",
            get(cart::get_cart_items).post(cart::add_cart_item),
        )
        // Both cart item routes share the {cart_item_id} parameter name:
        // matchit requires one name per position, and the reduce handler
        // reads the segment positionally as a product ID.
        .route(
            "/users/{user_id}/cart/{cart_item_id}",
            delete(cart::remove_cart_item),
        )
        .route(
            "/users/{user_id}/cart/{cart_item_id}/reduce",
            patch(cart::reduce_cart_item),
        )
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CorsLayer::permissive()),
        )
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        users::sign_up,
        users::sign_in,
        products::create_product,
        products::list_products,
        products::update_product,
        products::delete_product,
        cart::add_cart_item,
        cart::get_cart_items,
        cart::remove_cart_item,
        cart::reduce_cart_item,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            SignUpRequest,
            SignInRequest,
            UserResponse,
            AuthResponse,
            CreateProductRequest,
            UpdateProductRequest,
            ProductResponse,
            AddCartItemRequest,
            CartItemResponse,
            MessageResponse,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Account registration and sign-in"),
        (name = "Products", description = "Product catalog management"),
        (name = "Cart", description = "Shopping cart operations"),
        (name = "Health", description = "Service health probes")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthSettings;
    use crate::storage::{DocumentStore, StoragePaths};
    use tempfile::TempDir;

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let dir = TempDir::new().unwrap();
        let mut store = DocumentStore::new(StoragePaths::new(dir.path()));
        store.initialize().unwrap();
        let state = AppState::new(store, AuthSettings::new("router-test-secret".to_string()));

        let app = router(state);
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }

    #[test]
    fn openapi_document_includes_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/api/users"));
        assert!(paths.contains_key("/api/users/sign_in"));
        assert!(paths.contains_key("/api/products"));
        assert!(paths.contains_key("/api/products/{product_id}"));
        assert!(paths.contains_key("/api/users/{user_id}/cart"));
        assert!(paths.contains_key("/api/users/{user_id}/cart/{cart_item_id}"));
        assert!(paths.contains_key("/api/users/{user_id}/cart/{product_id}/reduce"));
        assert!(paths.contains_key("/health"));
    }
}
