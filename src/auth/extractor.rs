// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for the bearer token.
//!
//! Pulls the raw token out of the `Authorization` header; verification
//! happens later in the gate, which also needs the path's user id:
//!
//! ```rust,ignore
//! async fn my_handler(Path(user_id): Path<String>, bearer: BearerToken) -> ... {
//!     let user = state.gate.authenticate(bearer.token(), &user_id).await?;
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::AuthError;
use crate::error::ApiError;

/// Raw bearer token from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn token(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?;

        Ok(BearerToken(token.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_header(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/test");
        if let Some(value) = value {
            builder = builder.header("Authorization", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn missing_header_is_rejected() {
        let mut parts = parts_with_header(None);
        let result = BearerToken::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(ApiError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_rejected() {
        let mut parts = parts_with_header(Some("Basic dXNlcjpwYXNz"));
        let result = BearerToken::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(ApiError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn bearer_token_is_extracted() {
        let mut parts = parts_with_header(Some("Bearer abc.def.ghi"));
        let bearer = BearerToken::from_request_parts(&mut parts, &())
            .await
            .expect("token extracts");
        assert_eq!(bearer.token(), "abc.def.ghi");
    }
}
