// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account registration and sign-in endpoints.
//!
//! Both endpoints return the account together with a fresh access/refresh
//! token pair, so a client can authenticate follow-up requests immediately.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use crate::{
    auth::password::{hash_password, verify_password},
    error::{ApiError, AppJson},
    models::{AuthResponse, SignInRequest, SignUpRequest, UserResponse},
    state::AppState,
    storage::{StorageError, StoredUser, UserRepository},
};

/// Maximum accepted display name length.
const MAX_NAME_LENGTH: usize = 100;

fn validate_sign_up(request: &SignUpRequest) -> Result<(), ApiError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::validation("Name must not be empty"));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(ApiError::validation(format!(
            "Name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }

    validate_email(&request.email)?;

    if request.password.is_empty() {
        return Err(ApiError::validation("Password must not be empty"));
    }

    Ok(())
}

fn validate_email(email: &str) -> Result<(), ApiError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ApiError::validation("Invalid email address")),
    }
}

/// Register a new account.
///
/// The password is hashed with bcrypt before anything touches disk; the
/// plaintext is dropped at the end of this handler.
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid input or email already registered"),
        (status = 422, description = "Malformed request body"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn sign_up(
    State(state): State<AppState>,
    AppJson(request): AppJson<SignUpRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    validate_sign_up(&request)?;

    // Hashing takes ~100ms at the default cost; do it before taking the lock.
    let password_hash = hash_password(&request.password)
        .map_err(|e| ApiError::internal(format!("Password hashing failed: {e}")))?;

    let now = Utc::now();
    let user = StoredUser {
        id: uuid::Uuid::new_v4().to_string(),
        name: request.name.trim().to_string(),
        email: request.email.clone(),
        password: password_hash,
        dob: request.dob,
        created_at: now,
        updated_at: now,
    };

    {
        let store = state.store.write().await;
        let repo = UserRepository::new(&store);
        repo.create(&user).map_err(|e| match e {
            StorageError::AlreadyExists(_) => ApiError::duplicate("Email already registered"),
            other => other.into(),
        })?;
    }

    let access_token = state.tokens.issue_access_token(&user.id)?;
    let refresh_token = state.tokens.issue_refresh_token(&user.id)?;

    tracing::info!(user_id = %user.id, "account registered");

    let response = AuthResponse {
        user: UserResponse::from(user),
        access_token,
        refresh_token,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Sign in with email and password.
///
/// An unknown email and a wrong password produce the same 401 response, so
/// the endpoint cannot be used to probe which emails are registered.
#[utoipa::path(
    post,
    path = "/api/users/sign_in",
    tag = "Users",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 422, description = "Malformed request body"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn sign_in(
    State(state): State<AppState>,
    AppJson(request): AppJson<SignInRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = {
        let store = state.store.read().await;
        let repo = UserRepository::new(&store);
        repo.find_by_email(&request.email)?
    };

    let user = user.ok_or(ApiError::InvalidCredentials)?;

    if !verify_password(&request.password, &user.password) {
        return Err(ApiError::InvalidCredentials);
    }

    let access_token = state.tokens.issue_access_token(&user.id)?;
    let refresh_token = state.tokens.issue_refresh_token(&user.id)?;

    tracing::info!(user_id = %user.id, "account signed in");

    let response = AuthResponse {
        user: UserResponse::from(user),
        access_token,
        refresh_token,
    };

    Ok(Json(response))
}
