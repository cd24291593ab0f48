//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use strata_domain::{OutputFormat, ScenarioKind, StartupStage};

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// Colored, human-readable summary
    Pretty,
    /// Pretty-printed JSON
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Pretty => OutputFormat::Pretty,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for strata
#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(author, version, about = "Command-line client for the Strata-AI financial planning API")]
#[command(long_about = r#"
Strata talks to the Strata-AI REST API: sign in, inspect runway and cash
flow, simulate what-if scenarios, generate ideas and execution roadmaps,
and manage the startup profile and LLM provider settings.

Every call carries the stored bearer token, identical concurrent GETs share
one request, and each request is bounded by a timeout (30s by default).

Configuration files are loaded from (in priority order):
1. STRATA_API_URL / STRATA_<SECTION>__<KEY> environment variables
2. --config <path>      Explicit config file
3. ./strata.toml        Project-level config
4. ~/.config/strata/config.toml   Global config

Example:
  strata login founder@example.com --password hunter2
  strata dashboard
  strata scenarios simulate "Hire two engineers" --type hire --expense-change 20000
  strata roadmaps generate "Launch agency tier"
  strata get /financials/runway -o json
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format (overrides `output.format` in config)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputArg>,

    /// API base URL (overrides config and STRATA_API_URL)
    #[arg(long, value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Append one JSON line per API call to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub request_log: Option<PathBuf>,

    /// Keep the session in memory only (nothing is read from or written to disk)
    #[arg(long, global = true)]
    pub no_persist: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long, global = true)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send a raw GET request
    Get {
        /// Path relative to the base URL, e.g. /financials/runway
        path: String,
        /// Extra header, e.g. -H "X-Trace: 1" (repeatable)
        #[arg(short = 'H', long = "header", value_name = "NAME: VALUE", value_parser = parse_header)]
        headers: Vec<(String, String)>,
    },
    /// Send a raw POST request
    Post {
        path: String,
        /// JSON body
        #[arg(short, long, value_name = "JSON", conflicts_with = "form")]
        data: Option<String>,
        /// Form field sent as application/x-www-form-urlencoded (repeatable)
        #[arg(short, long, value_name = "KEY=VALUE", value_parser = parse_field)]
        form: Vec<(String, String)>,
        #[arg(short = 'H', long = "header", value_name = "NAME: VALUE", value_parser = parse_header)]
        headers: Vec<(String, String)>,
    },
    /// Send a raw PUT request
    Put {
        path: String,
        /// JSON body
        #[arg(short, long, value_name = "JSON")]
        data: Option<String>,
        #[arg(short = 'H', long = "header", value_name = "NAME: VALUE", value_parser = parse_header)]
        headers: Vec<(String, String)>,
    },
    /// Send a raw DELETE request
    Delete {
        path: String,
        #[arg(short = 'H', long = "header", value_name = "NAME: VALUE", value_parser = parse_header)]
        headers: Vec<(String, String)>,
    },
    /// Sign in and store the session
    Login {
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an account, then sign in
    Register {
        email: String,
        #[arg(short, long)]
        password: String,
        /// Display name
        #[arg(short, long, value_name = "NAME")]
        name: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Runway, key metrics and the recent cash flow
    Dashboard,
    /// What-if scenarios
    #[command(subcommand)]
    Scenarios(ScenarioCommand),
    /// LLM provider configuration
    #[command(subcommand)]
    Llm(LlmCommand),
    /// Search scenarios, roadmaps, reports and pages
    Search { query: String },
    /// Alerts about runway, burn and available scenarios
    #[command(subcommand)]
    Notifications(NotificationCommand),
    /// Execution roadmaps generated from a strategy
    #[command(subcommand)]
    Roadmaps(RoadmapCommand),
    /// Ask the AI service for strategy ideas
    Ideas {
        /// What the startup does and what it is trying to achieve
        context: String,
    },
    /// Startup profile, settings and account data
    #[command(subcommand)]
    Startup(StartupCommand),
}

#[derive(Subcommand, Debug)]
pub enum ScenarioCommand {
    /// List saved scenarios
    List,
    /// List scenario templates
    Templates,
    /// Simulate a scenario against the current baseline
    Simulate {
        name: String,
        /// hire, marketing, pricing, investment or custom
        #[arg(short = 't', long = "type", default_value = "custom")]
        kind: ScenarioKind,
        /// Monthly expense change
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        expense_change: f64,
        /// Monthly revenue change
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        revenue_change: f64,
        /// One-off cash change
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        one_time_cash: f64,
    },
}

#[derive(Subcommand, Debug)]
pub enum LlmCommand {
    /// Show the current provider and model
    Config,
    /// Change provider, model or API key
    Update {
        #[arg(long)]
        provider: String,
        #[arg(long)]
        model: String,
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Send a test prompt (defaults to the configured provider)
    Test {
        #[arg(long)]
        provider: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        prompt: Option<String>,
    },
    /// List available providers
    Providers,
    /// Remove the stored API key of a provider
    DeleteKey { provider: String },
}

#[derive(Subcommand, Debug)]
pub enum NotificationCommand {
    /// List notifications, newest first
    List,
    /// Mark one notification as read
    Read { id: String },
    /// Mark every notification as read
    ReadAll,
}

#[derive(Subcommand, Debug)]
pub enum RoadmapCommand {
    /// Generate a phased roadmap for a strategy
    Generate {
        title: String,
        /// Strategy description (a generic one is derived from the title)
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List roadmap templates
    Templates,
}

#[derive(Subcommand, Debug)]
pub enum StartupCommand {
    /// Show the startup profile
    Profile,
    /// Create the startup profile
    Create {
        name: String,
        #[arg(long)]
        industry: String,
        /// idea, mvp, growth or scale
        #[arg(long)]
        stage: StartupStage,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        team_size: Option<u32>,
        #[arg(long)]
        cash_balance: Option<f64>,
        #[arg(long)]
        monthly_revenue: Option<f64>,
        #[arg(long)]
        monthly_expenses: Option<f64>,
    },
    /// Change fields of the startup profile
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        industry: Option<String>,
        #[arg(long)]
        stage: Option<StartupStage>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        team_size: Option<u32>,
    },
    /// Show account settings
    Settings,
    /// Change account settings
    UpdateSettings {
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        currency: Option<String>,
        /// Runway months that trigger a warning
        #[arg(long)]
        warning_threshold: Option<f64>,
        /// Runway months that trigger a critical alert
        #[arg(long)]
        critical_threshold: Option<f64>,
    },
    /// Export every record of the account as JSON
    Export,
    /// Permanently delete the account
    DeleteAccount {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

/// Parse `Name: value` into a header pair.
pub fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected NAME: VALUE, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("header name is empty in '{}'", raw));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Parse `key=value` into a form field. The value may be empty.
pub fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    if key.is_empty() {
        return Err(format!("field name is empty in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}
