//! Use cases
//!
//! One use case per backend service. Each depends only on [`ApiClient`]
//! (and the auth use case on the key-value store) and decides its own
//! fallback policy when a call fails.
//!
//! [`ApiClient`]: crate::client::executor::ApiClient

pub mod auth;
pub mod dashboard;
pub mod ideation;
pub mod llm_config;
pub mod notifications;
pub mod roadmaps;
pub mod scenarios;
pub mod search;
pub mod startup;

#[cfg(test)]
pub(crate) mod test_support;
