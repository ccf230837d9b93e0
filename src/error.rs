// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Central error type for the HTTP API.
//!
//! Every failure a handler can produce is one of these kinds; the
//! `IntoResponse` impl is the single place where kinds turn into HTTP
//! statuses and `{"message": ...}` bodies. Internal details are logged,
//! never sent to clients.

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::AuthError;
use crate::storage::StorageError;

#[derive(Debug)]
pub enum ApiError {
    /// Input failed a domain validation rule
    Validation(String),
    /// Request body could not be parsed into the expected shape
    Unprocessable(String),
    /// Uniqueness constraint violated
    Duplicate(String),
    /// Entity does not exist
    NotFound(String),
    /// No usable credentials on the request
    NotAuthenticated,
    /// Email/password pair did not match an account
    InvalidCredentials,
    /// Bearer token failed verification
    InvalidToken,
    /// Bearer token is past its expiry
    TokenExpired,
    /// Authenticated caller is not the resource owner
    NotAuthorized,
    /// Unexpected failure; detail is logged, clients see a generic message
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::Unprocessable(message.into())
    }

    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Duplicate(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::NotAuthenticated
            | ApiError::InvalidCredentials
            | ApiError::InvalidToken
            | ApiError::TokenExpired => StatusCode::UNAUTHORIZED,
            ApiError::NotAuthorized => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> String {
        match self {
            ApiError::Validation(msg)
            | ApiError::Unprocessable(msg)
            | ApiError::Duplicate(msg)
            | ApiError::NotFound(msg) => msg.clone(),
            ApiError::NotAuthenticated => "Not authenticated".to_string(),
            ApiError::InvalidCredentials => "Invalid credentials".to_string(),
            ApiError::InvalidToken => "Invalid token".to_string(),
            ApiError::TokenExpired => "Token has expired".to_string(),
            ApiError::NotAuthorized => "Not Authorized".to_string(),
            ApiError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref detail) = self {
            tracing::error!(%detail, "internal server error");
        }

        let body = Json(ErrorBody {
            message: self.client_message(),
        });
        (self.status(), body).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound(entity) => ApiError::NotFound(entity),
            StorageError::AlreadyExists(entity) => ApiError::Duplicate(entity),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingAuthHeader | AuthError::InvalidAuthHeader => {
                ApiError::NotAuthenticated
            }
            AuthError::InvalidToken => ApiError::InvalidToken,
            AuthError::TokenExpired => ApiError::TokenExpired,
            AuthError::UserNotFound => ApiError::NotFound("User not found".to_string()),
            AuthError::NotAuthorized => ApiError::NotAuthorized,
            AuthError::Internal(detail) => ApiError::Internal(detail),
        }
    }
}

/// JSON body extractor whose rejection speaks the API's error format.
///
/// The stock `Json` rejection is plain text; wrapping it keeps malformed
/// bodies inside the `{"message": ...}` contract.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(ApiError::unprocessable(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn status_table_matches_error_kinds() {
        assert_eq!(ApiError::validation("v").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::unprocessable("u").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ApiError::duplicate("d").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::not_found("n").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::TokenExpired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::NotAuthorized.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn into_response_returns_message_body() {
        let response = ApiError::not_found("Product not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"message":"Product not found"}"#);
    }

    #[tokio::test]
    async fn internal_detail_never_reaches_the_client() {
        let response = ApiError::internal("disk exploded at /data").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"message":"An internal server error occurred"}"#);
    }

    #[test]
    fn storage_errors_map_to_api_kinds() {
        let nf: ApiError = StorageError::NotFound("User abc".to_string()).into();
        assert!(matches!(nf, ApiError::NotFound(_)));

        let dup: ApiError = StorageError::AlreadyExists("Email x".to_string()).into();
        assert!(matches!(dup, ApiError::Duplicate(_)));

        let internal: ApiError = StorageError::NotInitialized.into();
        assert!(matches!(internal, ApiError::Internal(_)));
    }

    #[test]
    fn auth_errors_map_to_api_kinds() {
        assert!(matches!(
            ApiError::from(AuthError::MissingAuthHeader),
            ApiError::NotAuthenticated
        ));
        assert!(matches!(
            ApiError::from(AuthError::TokenExpired),
            ApiError::TokenExpired
        ));
        assert!(matches!(
            ApiError::from(AuthError::UserNotFound),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(AuthError::NotAuthorized),
            ApiError::NotAuthorized
        ));
    }
}
