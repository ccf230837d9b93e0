// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Commerce Server - E-Commerce Backend Service
//!
//! This crate provides a small e-commerce backend: account registration and
//! sign-in with JWT bearer tokens, an open product catalog, and per-user
//! shopping carts, all persisted as JSON documents on the local filesystem.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token issuance, verification and the authorization gate
//! - `storage` - Document store and repositories
//! - `models` - Wire-level request and response types

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
