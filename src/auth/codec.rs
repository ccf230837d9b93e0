// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signed token encoding and decoding.
//!
//! Tokens are HS256 JWTs over a shared secret. The codec owns the keys and
//! lifetimes; nothing else in the crate touches the signing secret.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::{AuthError, Claims};
use crate::config::AuthSettings;

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Encoder/decoder for access and refresh tokens.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenCodec {
    pub fn new(settings: AuthSettings) -> Self {
        Self {
            encoding: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding: DecodingKey::from_secret(settings.secret.as_bytes()),
            access_ttl: settings.access_ttl,
            refresh_ttl: settings.refresh_ttl,
        }
    }

    /// Issue a short-lived access token for a user.
    pub fn issue_access_token(&self, user_id: &str) -> Result<String, AuthError> {
        self.issue(user_id, self.access_ttl)
    }

    /// Issue a long-lived refresh token for a user.
    pub fn issue_refresh_token(&self, user_id: &str) -> Result<String, AuthError> {
        self.issue(user_id, self.refresh_ttl)
    }

    fn issue(&self, user_id: &str, ttl: Duration) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: Some(user_id.to_string()),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// Verify a token's signature and expiry, returning its claims.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = CLOCK_SKEW_LEEWAY;
        validation.validate_aud = false;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_codec() -> TokenCodec {
        TokenCodec::new(AuthSettings::new("test-secret"))
    }

    #[test]
    fn issued_access_token_round_trips() {
        let codec = test_codec();
        let token = codec.issue_access_token("user-123").unwrap();

        let claims = codec.decode(&token).expect("token decodes");
        assert_eq!(claims.sub.as_deref(), Some("user-123"));
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn refresh_token_outlives_access_token() {
        let codec = test_codec();
        let access = codec.issue_access_token("user-123").unwrap();
        let refresh = codec.issue_refresh_token("user-123").unwrap();

        let access_claims = codec.decode(&access).unwrap();
        let refresh_claims = codec.decode(&refresh).unwrap();
        assert!(refresh_claims.exp > access_claims.exp);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let codec = test_codec();
        let other = TokenCodec::new(AuthSettings::new("other-secret"));

        let token = other.issue_access_token("user-123").unwrap();
        let result = codec.decode(&token);
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn garbage_is_rejected() {
        let codec = test_codec();
        assert!(matches!(
            codec.decode("not-a-token"),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            codec.decode("a.b.c"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let codec = test_codec();
        let now = Utc::now();
        let claims = Claims {
            sub: Some("user-123".to_string()),
            iat: (now - Duration::days(2)).timestamp(),
            exp: (now - Duration::days(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(codec.decode(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

        let codec = test_codec();
        let token = codec.issue_access_token("user-123").unwrap();

        // Swap the subject inside the payload without re-signing.
        let mut parts: Vec<&str> = token.split('.').collect();
        let payload = URL_SAFE_NO_PAD.decode(parts[1]).unwrap();
        let tampered = String::from_utf8(payload)
            .unwrap()
            .replace("user-123", "user-456");
        let tampered_b64 = URL_SAFE_NO_PAD.encode(tampered.as_bytes());
        parts[1] = &tampered_b64;
        let forged = parts.join(".");

        assert!(matches!(codec.decode(&forged), Err(AuthError::InvalidToken)));
    }
}
