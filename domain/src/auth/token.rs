//! Bearer token and the persisted auth state that carries it.

use super::user::User;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage key under which the auth state is persisted.
pub const AUTH_STORAGE_KEY: &str = "auth-storage";

/// A bearer token. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Returns `None` for an empty or whitespace-only token.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// Extract `state.token` from a persisted auth entry.
    ///
    /// Anything unexpected (bad JSON, missing or non-string field, empty
    /// token) yields `None`; callers then proceed without authentication.
    pub fn from_persisted(raw: &str) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_str(raw).ok()?;
        let token = value.get("state")?.get("token")?.as_str()?;
        Self::new(token)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// The `state` object of the persisted auth entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub token: Option<AuthToken>,
    pub user: Option<User>,
    #[serde(default)]
    pub is_authenticated: bool,
}

/// Persisted auth entry: `{"state": {...}, "version": 0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedAuth {
    pub state: AuthState,
    #[serde(default)]
    pub version: u32,
}

impl PersistedAuth {
    pub fn signed_in(token: AuthToken, user: User) -> Self {
        Self {
            state: AuthState {
                token: Some(token),
                user: Some(user),
                is_authenticated: true,
            },
            version: 0,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn to_json(&self) -> String {
        // Serializing plain strings and bools cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}
