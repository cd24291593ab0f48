//! Application layer for strata-client
//!
//! This crate contains the request client core, port definitions, and the
//! use cases built on top of the client. It depends only on the domain layer.

pub mod client;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use client::{
    dedup::RequestDeduplicator,
    executor::ApiClient,
    timeout::{DEFAULT_TIMEOUT, TimeoutController},
    token_accessor::TokenAccessor,
};
pub use ports::{
    key_value_store::{KeyValueStore, MemoryKeyValueStore, StorageError},
    request_logger::{NoRequestLogger, RequestEvent, RequestLogger, RequestOutcome},
    transport::{HttpTransport, TransportError},
};
pub use use_cases::{
    auth::{AuthError, AuthUseCase},
    dashboard::DashboardUseCase,
    ideation::IdeationUseCase,
    llm_config::LlmConfigUseCase,
    notifications::NotificationsUseCase,
    roadmaps::RoadmapsUseCase,
    scenarios::ScenariosUseCase,
    search::SearchUseCase,
    startup::StartupUseCase,
};
