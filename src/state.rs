// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::{AuthGate, TokenCodec};
use crate::config::AuthSettings;
use crate::storage::DocumentStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<DocumentStore>>,
    pub tokens: Arc<TokenCodec>,
    pub gate: AuthGate,
}

impl AppState {
    /// Builds the shared state. The gate holds the same store handle as the
    /// handlers, so an account deleted mid-session fails authentication on
    /// its next request.
    pub fn new(store: DocumentStore, auth: AuthSettings) -> Self {
        let store = Arc::new(RwLock::new(store));
        let tokens = Arc::new(TokenCodec::new(auth));
        let gate = AuthGate::new(Arc::clone(&tokens), Arc::clone(&store));

        Self {
            store,
            tokens,
            gate,
        }
    }
}
