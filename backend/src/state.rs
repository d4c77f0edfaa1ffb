//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! Everything here is built once at startup, cheap to clone (`Arc` or
//! `Copy`), and read-only while requests are served.

use crate::auth::{JwtService, PasswordService};
use crate::config::AppConfig;
use crate::repositories::{MemoryStore, Store};
use secrecy::ExposeSecret;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Storage backend
    pub store: Arc<dyn Store>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
    /// Password hasher for new digests
    pub passwords: PasswordService,
}

impl AppState {
    /// Create a new application state
    ///
    /// Derives the JWT keys from the configured secret, so call this once.
    pub fn new(store: Arc<dyn Store>, config: AppConfig) -> Self {
        let jwt = JwtService::new(config.jwt.secret.expose_secret(), config.jwt.token_expiry_secs);
        let passwords = PasswordService::from_config(&config.password);

        Self {
            store,
            config: Arc::new(config),
            jwt,
            passwords,
        }
    }

    /// State backed by a fresh in-memory store
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(Arc::new(MemoryStore::new()), config)
    }

    /// Get a reference to the store
    #[inline]
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the JWT service
    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    /// Get a reference to the password service
    #[inline]
    pub fn passwords(&self) -> &PasswordService {
        &self.passwords
    }
}
