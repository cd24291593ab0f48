//! Authentication domain: bearer tokens, persisted auth state, users.

pub mod token;
pub mod user;
