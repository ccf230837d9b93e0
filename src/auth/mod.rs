// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Bearer token authentication for the storefront API.
//!
//! ## Auth Flow
//!
//! 1. Client registers or signs in and receives an access token and a
//!    refresh token (HS256 JWTs, `sub` = user id).
//! 2. Client sends `Authorization: Bearer <token>` on cart requests.
//! 3. The gate verifies the signature and expiry, resolves `sub` to a
//!    stored account, and checks it against the user id in the path.
//!
//! ## Security
//!
//! - Tokens are signed with a shared secret from `JWT_SECRET_KEY`
//! - Passwords are stored as bcrypt hashes only
//! - Clock skew tolerance on decode is 60 seconds

pub mod claims;
pub mod codec;
pub mod error;
pub mod extractor;
pub mod gate;
pub mod password;

pub use claims::Claims;
pub use codec::TokenCodec;
pub use error::AuthError;
pub use extractor::BearerToken;
pub use gate::AuthGate;
