// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup and injected
//! into the components that need it. Nothing reads environment variables
//! after boot.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATA_DIR` | Root directory for the document store | `/data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `JWT_SECRET_KEY` | HMAC secret for signing tokens | Required |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;
use std::path::PathBuf;

use chrono::Duration;

use crate::storage::paths::DATA_ROOT;

/// Environment variable name for the document store root.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Environment variable name for the token signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET_KEY";

/// Lifetime of access tokens.
pub const ACCESS_TOKEN_TTL_DAYS: i64 = 1;

/// Lifetime of refresh tokens.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingVar(&'static str),

    #[error("{var} must not be empty")]
    EmptyVar { var: &'static str },
}

/// Token issuance settings handed to the token codec at construction.
#[derive(Clone)]
pub struct AuthSettings {
    /// Shared HMAC secret. Treated as opaque bytes; never logged.
    pub secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl AuthSettings {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_ttl: Duration::days(ACCESS_TOKEN_TTL_DAYS),
            refresh_ttl: Duration::days(REFRESH_TOKEN_TTL_DAYS),
        }
    }
}

/// Immutable application configuration.
#[derive(Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub auth: AuthSettings,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Optional variables fall back to their defaults; the signing secret
    /// is mandatory.
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = env::var(DATA_DIR_ENV).unwrap_or_else(|_| DATA_ROOT.to_string());
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080);

        let secret =
            env::var(JWT_SECRET_ENV).map_err(|_| ConfigError::MissingVar(JWT_SECRET_ENV))?;
        if secret.is_empty() {
            return Err(ConfigError::EmptyVar {
                var: JWT_SECRET_ENV,
            });
        }

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            host,
            port,
            auth: AuthSettings::new(secret),
        })
    }
}
