//! Request client core
//!
//! The pieces [`ApiClient`](executor::ApiClient) composes: token lookup,
//! per-call timeout, in-flight sharing of identical GETs, and error
//! normalization.

pub mod dedup;
pub mod error_normalizer;
pub mod executor;
pub mod timeout;
pub mod token_accessor;
