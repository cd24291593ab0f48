//! Reads the bearer token from persisted storage.
//!
//! The token is re-read on every call and never cached, so a login or
//! logout in another process is picked up by the next request.

use crate::ports::key_value_store::KeyValueStore;
use std::sync::Arc;
use strata_domain::{AUTH_STORAGE_KEY, AuthToken};
use tracing::debug;

#[derive(Clone)]
pub struct TokenAccessor {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl TokenAccessor {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, AUTH_STORAGE_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Current token, or `None` if absent or unreadable.
    ///
    /// Never fails: a broken store degrades to anonymous requests and the
    /// server decides whether they are allowed.
    pub fn current(&self) -> Option<AuthToken> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                debug!("Auth storage unreadable, sending anonymously: {}", e);
                return None;
            }
        };

        let token = AuthToken::from_persisted(&raw);
        if token.is_none() {
            debug!("Auth storage entry has no usable token, sending anonymously");
        }
        token
    }
}
