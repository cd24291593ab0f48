//! Presentation layer for strata-client
//!
//! This crate contains CLI definitions and console output formatters.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{
    Cli, Command, LlmCommand, NotificationCommand, OutputArg, RoadmapCommand, ScenarioCommand,
    StartupCommand,
};
pub use output::console::ConsoleFormatter;
