//! Domain layer for strata-client
//!
//! This crate contains the value objects the API client works with and the
//! business records it fetches. It has no dependencies on infrastructure or
//! presentation concerns, and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Requests
//!
//! - **ApiRequest**: a call relative to the configured base URL
//! - **DedupKey**: `METHOD:path:body`, groups identical concurrent GETs
//! - **ApiError**: the single normalized error every failure maps to
//!
//! ## Derived data
//!
//! Dashboard metrics, search matching and fallback notifications are pure
//! functions over fetched records, so they live here rather than in the
//! use cases that fetch them.

pub mod auth;
pub mod config;
pub mod core;
pub mod finance;
pub mod http;
pub mod ideation;
pub mod llm;
pub mod notification;
pub mod roadmap;
pub mod scenario;
pub mod search;
pub mod startup;

// Re-export commonly used types
pub use auth::{
    token::{AUTH_STORAGE_KEY, AuthState, AuthToken, PersistedAuth},
    user::{LoginResponse, ProfileResponse, RegisterRequest, RegisterResponse, Session, User},
};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::error::{ApiError, TIMEOUT_MESSAGE};
pub use finance::{
    dashboard::{CashFlowPoint, ChangeType, DashboardData, Metric},
    records::{FinancialRecord, RunwaySnapshot},
};
pub use http::{
    headers::RequestHeaders,
    method::HttpMethod,
    request::{
        ApiRequest, CONTENT_TYPE_FORM, CONTENT_TYPE_JSON, DedupKey, OutboundRequest, RequestBody,
    },
    response::TransportResponse,
};
pub use ideation::{Idea, MarketOpportunity, StrategySuggestion, SuggestStrategyRequest};
pub use llm::{LlmConfig, LlmProvider, MessageResponse, TestLlmRequest, TestLlmResponse, UpdateLlmConfig};
pub use notification::{Notification, NotificationList, NotificationType};
pub use roadmap::{
    GenerateRoadmapRequest, GeneratedRoadmap, Roadmap, RoadmapError, RoadmapList, RoadmapPhase,
    RoadmapTask, RoadmapTemplate, RoadmapTemplateList,
};
pub use scenario::{
    Baseline, CreateScenarioInput, Modifications, Scenario, ScenarioKind, ScenarioList,
    ScenarioTemplate, SimulationRequest, SimulationResponse, TemplateList,
};
pub use search::{SearchResult, SearchResultType};
pub use startup::{
    AccountDeletion, CreateStartupInput, DataExport, StartupProfile, StartupStage,
    UpdateSettingsInput, UpdateStartupInput, UserSettings,
};
