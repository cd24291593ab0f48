//! CLI entrypoint for strata
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use chrono::Utc;
use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use strata_application::{
    ApiClient, AuthUseCase, DashboardUseCase, IdeationUseCase, KeyValueStore, LlmConfigUseCase,
    MemoryKeyValueStore, NotificationsUseCase, RoadmapsUseCase, ScenariosUseCase, SearchUseCase,
    StartupUseCase,
};
use strata_domain::{
    ApiRequest, CreateScenarioInput, CreateStartupInput, HttpMethod, Modifications, OutputFormat,
    RequestBody, TestLlmRequest, UpdateLlmConfig, UpdateSettingsInput, UpdateStartupInput,
};
use strata_infrastructure::{
    ConfigLoader, FileConfig, FileKeyValueStore, JsonlRequestLogger, ReqwestTransport,
};
use strata_presentation::{
    Cli, Command, ConsoleFormatter, LlmCommand, NotificationCommand, RoadmapCommand,
    ScenarioCommand, StartupCommand,
};
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Held until exit so buffered log lines are flushed
    let _log_guard = init_tracing(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    info!("Starting strata");

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_without_files()
    } else {
        ConfigLoader::load(cli.config.as_deref())
    }
    .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

    if let Some(url) = &cli.base_url {
        config.api.base_url = url.clone();
    }

    let issues = config.validate();
    for issue in issues.iter().filter(|i| !i.is_error()) {
        warn!("{}", issue.message);
    }
    if let Some(issue) = issues.iter().find(|i| i.is_error()) {
        bail!("Invalid configuration: {}", issue.message);
    }

    if !config.output.color {
        colored::control::set_override(false);
    }
    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();

    // === Dependency Injection ===
    let store = build_store(&config, cli.no_persist);
    let transport = Arc::new(ReqwestTransport::new()?);
    let mut client = ApiClient::new(config.api.base_url.clone(), transport, store.clone())
        .with_timeout(config.api.timeout());

    let request_log = cli
        .request_log
        .as_deref()
        .or_else(|| config.request_log());
    if let Some(path) = request_log
        && let Some(logger) = JsonlRequestLogger::new(path)
    {
        debug!("Request log: {}", logger.path().display());
        client = client.with_request_logger(Arc::new(logger));
    }

    debug!(
        "API base URL: {} (timeout {:?})",
        client.base_url(),
        client.timeout()
    );

    run(cli.command, client, store, format).await
}

fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // Initialize logging based on verbosity level; RUST_LOG wins when set
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .with_context(|| format!("--log-file must name a file: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

fn build_store(config: &FileConfig, no_persist: bool) -> Arc<dyn KeyValueStore> {
    if no_persist {
        return Arc::new(MemoryKeyValueStore::new());
    }
    match config.storage_path() {
        Some(path) => {
            debug!("Storage file: {}", path.display());
            Arc::new(FileKeyValueStore::new(path))
        }
        None => {
            warn!("No data directory available, session will not be persisted");
            Arc::new(MemoryKeyValueStore::new())
        }
    }
}

async fn run(
    command: Command,
    client: ApiClient,
    store: Arc<dyn KeyValueStore>,
    format: OutputFormat,
) -> Result<()> {
    match command {
        Command::Get { path, headers } => {
            let request = with_headers(ApiRequest::get(path), headers);
            print_value(&client.send(request).await?, format);
        }
        Command::Post {
            path,
            data,
            form,
            headers,
        } => {
            let request = if !form.is_empty() {
                let fields: Vec<(&str, &str)> = form
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect();
                ApiRequest::post_form(path, &fields)?
            } else {
                ApiRequest::new(HttpMethod::Post, path, json_body(data.as_deref())?)
            };
            print_value(&client.send(with_headers(request, headers)).await?, format);
        }
        Command::Put {
            path,
            data,
            headers,
        } => {
            let request = ApiRequest::new(HttpMethod::Put, path, json_body(data.as_deref())?);
            print_value(&client.send(with_headers(request, headers)).await?, format);
        }
        Command::Delete { path, headers } => {
            let request = with_headers(ApiRequest::delete(path), headers);
            print_value(&client.send(request).await?, format);
        }
        Command::Login { email, password } => {
            let session = AuthUseCase::new(client, store)
                .login(&email, &password)
                .await?;
            print(&session.user, format, || {
                ConsoleFormatter::format_session(&session)
            });
        }
        Command::Register {
            email,
            password,
            name,
        } => {
            let session = AuthUseCase::new(client, store)
                .register(&name, &email, &password)
                .await?;
            print(&session.user, format, || {
                ConsoleFormatter::format_session(&session)
            });
        }
        Command::Logout => {
            AuthUseCase::new(client, store).logout()?;
            println!("Signed out.");
        }
        Command::Whoami => match AuthUseCase::new(client, store).current_session() {
            Some(session) => print(&session.user, format, || {
                ConsoleFormatter::format_user(&session.user)
            }),
            None => bail!("Not signed in. Run `strata login <email> --password <password>`."),
        },
        Command::Dashboard => {
            let data = DashboardUseCase::new(client).load().await;
            print(&data, format, || ConsoleFormatter::format_dashboard(&data));
        }
        Command::Scenarios(command) => run_scenarios(command, client, format).await?,
        Command::Llm(command) => run_llm(command, client, format).await?,
        Command::Search { query } => {
            let results = SearchUseCase::new(client).search(&query).await;
            print(&results, format, || ConsoleFormatter::format_search(&results));
        }
        Command::Notifications(command) => {
            let notifications = NotificationsUseCase::new(client);
            match command {
                NotificationCommand::List => {
                    let list = notifications.list().await;
                    print(&list, format, || {
                        ConsoleFormatter::format_notifications(&list, Utc::now())
                    });
                }
                NotificationCommand::Read { id } => notifications.mark_read(&id).await,
                NotificationCommand::ReadAll => notifications.mark_all_read().await,
            }
        }
        Command::Roadmaps(command) => {
            let roadmaps = RoadmapsUseCase::new(client);
            match command {
                RoadmapCommand::Generate { title, description } => {
                    let roadmap = roadmaps.generate(&title, description.as_deref()).await;
                    print(&roadmap, format, || ConsoleFormatter::format_roadmap(&roadmap));
                }
                RoadmapCommand::Templates => {
                    let templates = roadmaps.templates().await;
                    print(&templates, format, || {
                        ConsoleFormatter::format_roadmap_templates(&templates)
                    });
                }
            }
        }
        Command::Ideas { context } => {
            let ideas = IdeationUseCase::new(client).generate_ideas(&context).await?;
            print(&ideas, format, || ConsoleFormatter::format_ideas(&ideas));
        }
        Command::Startup(command) => run_startup(command, client, format).await?,
    }
    Ok(())
}

async fn run_startup(
    command: StartupCommand,
    client: ApiClient,
    format: OutputFormat,
) -> Result<()> {
    let startup = StartupUseCase::new(client);
    match command {
        StartupCommand::Profile => {
            let profile = startup.profile().await?;
            print(&profile, format, || {
                ConsoleFormatter::format_startup_profile(profile.as_ref())
            });
        }
        StartupCommand::Create {
            name,
            industry,
            stage,
            description,
            team_size,
            cash_balance,
            monthly_revenue,
            monthly_expenses,
        } => {
            let input = CreateStartupInput {
                name,
                industry,
                stage,
                description,
                team_size,
                founder_background: None,
                key_roles: None,
                initial_cash_balance: cash_balance,
                initial_monthly_revenue: monthly_revenue,
                initial_monthly_expenses: monthly_expenses,
                goals: None,
                target_runway_months: None,
            };
            let profile = startup.create_profile(&input).await?;
            print(&profile, format, || {
                ConsoleFormatter::format_startup_profile(Some(&profile))
            });
        }
        StartupCommand::Update {
            name,
            industry,
            stage,
            description,
            team_size,
        } => {
            let input = UpdateStartupInput {
                name,
                industry,
                stage,
                description,
                team_size,
                ..Default::default()
            };
            if input.is_empty() {
                bail!("Nothing to update. Pass at least one field, e.g. --team-size 4.");
            }
            let profile = startup.update_profile(&input).await?;
            print(&profile, format, || {
                ConsoleFormatter::format_startup_profile(Some(&profile))
            });
        }
        StartupCommand::Settings => {
            let settings = startup.settings().await?;
            print(&settings, format, || ConsoleFormatter::format_settings(&settings));
        }
        StartupCommand::UpdateSettings {
            full_name,
            currency,
            warning_threshold,
            critical_threshold,
        } => {
            let input = UpdateSettingsInput {
                full_name,
                runway_warning_threshold: warning_threshold,
                runway_critical_threshold: critical_threshold,
                currency,
            };
            let settings = startup.update_settings(&input).await?;
            print(&settings, format, || ConsoleFormatter::format_settings(&settings));
        }
        StartupCommand::Export => {
            let export = startup.export().await?;
            print(&export, format, || ConsoleFormatter::format_export(&export));
        }
        StartupCommand::DeleteAccount { yes } => {
            if !yes {
                bail!("Deleting the account cannot be undone. Re-run with --yes to confirm.");
            }
            let deletion = startup.delete_account().await?;
            print(&deletion, format, || {
                ConsoleFormatter::format_account_deletion(&deletion)
            });
        }
    }
    Ok(())
}

async fn run_scenarios(
    command: ScenarioCommand,
    client: ApiClient,
    format: OutputFormat,
) -> Result<()> {
    let scenarios = ScenariosUseCase::new(client);
    match command {
        ScenarioCommand::List => {
            let list = scenarios.list().await?;
            print(&list, format, || {
                ConsoleFormatter::format_scenarios(&list.scenarios)
            });
        }
        ScenarioCommand::Templates => {
            let templates = scenarios.templates().await;
            print(&templates, format, || {
                ConsoleFormatter::format_templates(&templates)
            });
        }
        ScenarioCommand::Simulate {
            name,
            kind,
            expense_change,
            revenue_change,
            one_time_cash,
        } => {
            let input = CreateScenarioInput {
                name,
                kind,
                modifications: Modifications {
                    expense_change,
                    revenue_change,
                    one_time_cash_change: one_time_cash,
                },
            };
            let scenario = scenarios.simulate(&input).await?;
            print(&scenario, format, || {
                ConsoleFormatter::format_scenario(&scenario)
            });
        }
    }
    Ok(())
}

async fn run_llm(command: LlmCommand, client: ApiClient, format: OutputFormat) -> Result<()> {
    let llm = LlmConfigUseCase::new(client);
    match command {
        LlmCommand::Config => {
            let config = llm.config().await?;
            print(&config, format, || ConsoleFormatter::format_llm_config(&config));
        }
        LlmCommand::Update {
            provider,
            model,
            api_key,
        } => {
            let update = UpdateLlmConfig {
                provider,
                model,
                api_key,
            };
            let config = llm.update(&update).await?;
            print(&config, format, || ConsoleFormatter::format_llm_config(&config));
        }
        LlmCommand::Test {
            provider,
            model,
            api_key,
            prompt,
        } => {
            let request = TestLlmRequest {
                provider,
                model,
                api_key,
                prompt,
            };
            let request = (request != TestLlmRequest::default()).then_some(request);
            let result = llm.test(request.as_ref()).await?;
            print(&result, format, || ConsoleFormatter::format_llm_test(&result));
        }
        LlmCommand::Providers => {
            let providers = llm.providers().await?;
            print(&providers, format, || {
                ConsoleFormatter::format_providers(&providers)
            });
        }
        LlmCommand::DeleteKey { provider } => {
            let response = llm.delete_api_key(&provider).await?;
            print(&response, format, || ConsoleFormatter::format_message(&response));
        }
    }
    Ok(())
}

fn with_headers(request: ApiRequest, headers: Vec<(String, String)>) -> ApiRequest {
    headers
        .into_iter()
        .fold(request, |request, (name, value)| request.with_header(name, value))
}

fn json_body(data: Option<&str>) -> Result<RequestBody> {
    let Some(data) = data else {
        return Ok(RequestBody::Empty);
    };
    let value: Value = serde_json::from_str(data).context("--data is not valid JSON")?;
    Ok(RequestBody::json(&value)?)
}

fn print<T: Serialize + ?Sized>(value: &T, format: OutputFormat, pretty: impl FnOnce() -> String) {
    let output = match format {
        OutputFormat::Json => ConsoleFormatter::format_json(value),
        OutputFormat::Pretty => pretty(),
    };
    println!("{}", output);
}

fn print_value(value: &Value, format: OutputFormat) {
    print(value, format, || ConsoleFormatter::format_value(value));
}
