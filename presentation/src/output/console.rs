//! Console output formatter for API results

use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use serde::Serialize;
use serde_json::Value;
use strata_domain::notification::format_time_ago;
use strata_domain::{
    AccountDeletion, ChangeType, DashboardData, DataExport, Idea, LlmConfig, LlmProvider,
    MarketOpportunity, MessageResponse, NotificationList, NotificationType, Roadmap,
    RoadmapTemplate, Scenario, ScenarioTemplate, SearchResult, Session, StartupProfile,
    TestLlmResponse, User, UserSettings,
};

/// Formats command results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format any serializable value as pretty JSON
    pub fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Raw API responses are JSON already; pretty output only adds color
    /// to the top-level keys of an object.
    pub fn format_value(value: &Value) -> String {
        match value {
            Value::Object(map) if map.is_empty() => "(empty response)".dimmed().to_string(),
            Value::Object(map) => map
                .iter()
                .map(|(key, value)| {
                    let rendered = match value {
                        Value::String(s) => s.clone(),
                        other => Self::format_json(other),
                    };
                    format!("{} {}", format!("{}:", key).cyan().bold(), rendered)
                })
                .collect::<Vec<_>>()
                .join("\n"),
            other => Self::format_json(other),
        }
    }

    pub fn format_session(session: &Session) -> String {
        format!(
            "{} {}\n{}",
            "Signed in as".green().bold(),
            session.user.full_name.bold(),
            Self::format_user(&session.user)
        )
    }

    pub fn format_user(user: &User) -> String {
        let onboarding = if user.onboarding_completed {
            "complete".green()
        } else {
            "pending".yellow()
        };
        format!(
            "  {} {}\n  {} {}\n  {} {}",
            "Email:".cyan(),
            user.email,
            "Id:".cyan(),
            user.id,
            "Onboarding:".cyan(),
            onboarding
        )
    }

    pub fn format_dashboard(data: &DashboardData) -> String {
        let mut output = Self::header("Dashboard");
        output.push('\n');

        for metric in &data.metrics {
            output.push_str(&format!(
                "{:<16} {:>14}  {}\n",
                metric.label.bold(),
                metric.value,
                Self::change(&metric.change, metric.change_type)
            ));
        }

        if !data.cash_flow.is_empty() {
            output.push_str(&Self::section_header("Cash Flow"));
            let max = data
                .cash_flow
                .iter()
                .map(|p| p.balance.abs())
                .fold(0.0_f64, f64::max);
            for point in &data.cash_flow {
                output.push_str(&format!(
                    "{:<4} {:>14}  {}\n",
                    point.month,
                    format!("{:.0}", point.balance),
                    Self::bar(point.balance, max)
                ));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    pub fn format_scenarios(scenarios: &[Scenario]) -> String {
        if scenarios.is_empty() {
            return "No scenarios yet.".dimmed().to_string();
        }
        scenarios
            .iter()
            .map(Self::format_scenario)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn format_scenario(scenario: &Scenario) -> String {
        let delta = scenario.result.runway_delta;
        let delta = if delta > 0.0 {
            format!("+{:.1} months", delta).green()
        } else if delta < 0.0 {
            format!("{:.1} months", delta).red()
        } else {
            "no change".dimmed()
        };
        format!(
            "{} {} {}\n  {} {:.1} months ({})",
            "──".yellow(),
            scenario.name.bold(),
            format!("[{}]", scenario.kind).dimmed(),
            "Runway:".cyan(),
            scenario.result.new_runway_months,
            delta
        )
    }

    pub fn format_templates(templates: &[ScenarioTemplate]) -> String {
        if templates.is_empty() {
            return "No templates available.".dimmed().to_string();
        }
        templates
            .iter()
            .map(|t| {
                let mut line = format!("{} {}\n  {}", t.id.cyan(), t.name.bold(), t.description);
                if !t.example_use.is_empty() {
                    line.push_str(&format!("\n  {} {}", "e.g.".dimmed(), t.example_use));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn format_llm_config(config: &LlmConfig) -> String {
        let connected = if config.is_connected {
            "connected".green()
        } else {
            "not connected".red()
        };
        let key = if config.api_key_set {
            "set".green()
        } else {
            "not set".yellow()
        };
        format!(
            "{} {} / {} ({})\n{} {}",
            "Provider:".cyan().bold(),
            config.provider,
            config.model,
            connected,
            "API key:".cyan().bold(),
            key
        )
    }

    pub fn format_providers(providers: &[LlmProvider]) -> String {
        providers
            .iter()
            .map(|p| {
                let status = if p.is_configured {
                    "configured".green()
                } else if p.requires_api_key {
                    format!("needs {}", p.api_key_env_var).yellow()
                } else {
                    "available".normal()
                };
                let mut line = format!("{} {} ({})", p.id.cyan(), p.name.bold(), status);
                if !p.models.is_empty() {
                    line.push_str(&format!("\n  {}", p.models.join(", ").dimmed()));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn format_llm_test(result: &TestLlmResponse) -> String {
        let mut output = if result.success {
            format!("{} {}", "OK".green().bold(), result.message)
        } else {
            format!("{} {}", "FAILED".red().bold(), result.message)
        };
        if let Some(latency) = result.latency_ms {
            output.push_str(&format!(" {}", format!("({:.0}ms)", latency).dimmed()));
        }
        if let Some(response) = &result.response {
            output.push_str(&format!("\n\n{}", Self::indent(response, "  ")));
        }
        output
    }

    pub fn format_message(response: &MessageResponse) -> String {
        if response.message.is_empty() {
            "Done.".green().to_string()
        } else {
            response.message.green().to_string()
        }
    }

    pub fn format_search(results: &[SearchResult]) -> String {
        if results.is_empty() {
            return "No results.".dimmed().to_string();
        }
        results
            .iter()
            .map(|r| {
                format!(
                    "{:<10} {}  {}\n           {}",
                    format!("{:?}", r.kind).to_lowercase().dimmed(),
                    r.title.bold(),
                    r.link.cyan(),
                    r.description
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn format_notifications(list: &NotificationList, now: DateTime<Utc>) -> String {
        if list.notifications.is_empty() {
            return "No notifications.".dimmed().to_string();
        }
        let mut output = format!("{} {}\n", list.unread_count.to_string().bold(), "unread".cyan());
        for n in &list.notifications {
            let marker = if n.read { " " } else { "●" };
            output.push_str(&format!(
                "\n{} {} {}  {}\n  {}\n",
                marker.cyan(),
                Self::kind_badge(n.kind),
                n.title.bold(),
                format_time_ago(n.created_at, now).dimmed(),
                n.message
            ));
        }
        output
    }

    pub fn format_roadmap(roadmap: &Roadmap) -> String {
        let mut output = Self::header(&roadmap.title);
        output.push('\n');
        if let Some(description) = &roadmap.description {
            output.push_str(&format!("{}\n", description));
        }
        output.push_str(&format!(
            "{} {} weeks, {} complete\n",
            "Duration:".cyan(),
            roadmap.total_duration_weeks,
            format!("{:.0}%", roadmap.progress).bold()
        ));

        for phase in &roadmap.phases {
            output.push_str(&Self::section_header(&format!(
                "{} ({} weeks)",
                phase.name, phase.duration_weeks
            )));
            if !phase.description.is_empty() {
                output.push_str(&format!("{}\n", phase.description.dimmed()));
            }
            for task in &phase.tasks {
                let check = if task.is_completed {
                    "[x]".green()
                } else {
                    "[ ]".normal()
                };
                output.push_str(&format!("{} {} {}\n", check, task.title, task.id.dimmed()));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    pub fn format_roadmap_templates(templates: &[RoadmapTemplate]) -> String {
        if templates.is_empty() {
            return "No templates available.".dimmed().to_string();
        }
        templates
            .iter()
            .map(|t| {
                format!(
                    "{} {}\n  {}\n  {}",
                    t.id.cyan(),
                    t.title.bold(),
                    t.description,
                    format!(
                        "team of {}, about {} weeks",
                        t.suggested_team_size, t.typical_duration_weeks
                    )
                    .dimmed()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn format_ideas(ideas: &[Idea]) -> String {
        if ideas.is_empty() {
            return "No ideas returned.".dimmed().to_string();
        }
        ideas
            .iter()
            .map(|idea| {
                let opportunity = match idea.market_opportunity {
                    MarketOpportunity::High => "high opportunity".green(),
                    MarketOpportunity::Medium => "medium opportunity".yellow(),
                    MarketOpportunity::Low => "low opportunity".red(),
                };
                format!(
                    "{} {}\n  {} {} ({})\n  {}",
                    "──".yellow(),
                    idea.title.bold(),
                    "Feasibility:".cyan(),
                    idea.feasibility,
                    opportunity,
                    idea.description
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn format_startup_profile(profile: Option<&StartupProfile>) -> String {
        let Some(profile) = profile else {
            return "No startup profile yet. Run `strata startup create`."
                .dimmed()
                .to_string();
        };
        let mut output = format!(
            "{} {}\n  {} {}\n  {} {}\n  {} {}\n  {} {} / {} months",
            profile.name.bold(),
            format!("[{}]", profile.stage).dimmed(),
            "Industry:".cyan(),
            profile.industry,
            "Team:".cyan(),
            profile.team_size,
            "Currency:".cyan(),
            profile.currency,
            "Runway alerts:".cyan(),
            profile.runway_warning_threshold,
            profile.runway_critical_threshold
        );
        if let Some(description) = &profile.description {
            output.push_str(&format!("\n\n{}", Self::indent(description, "  ")));
        }
        output
    }

    pub fn format_settings(settings: &UserSettings) -> String {
        format!(
            "  {} {}\n  {} {}\n  {} {}\n  {} {} / {} months\n  {} {} / {}",
            "Email:".cyan(),
            settings.email,
            "Name:".cyan(),
            settings.full_name.as_deref().unwrap_or("-"),
            "Currency:".cyan(),
            settings.currency,
            "Runway alerts:".cyan(),
            settings.runway_warning_threshold,
            settings.runway_critical_threshold,
            "LLM:".cyan(),
            settings.llm_provider,
            settings.llm_model
        )
    }

    pub fn format_export(export: &DataExport) -> String {
        format!(
            "{} {} records exported {}",
            "OK".green().bold(),
            export.record_count,
            format!("({})", export.export_date).dimmed()
        )
    }

    pub fn format_account_deletion(deletion: &AccountDeletion) -> String {
        format!(
            "{} {}",
            deletion.message.green(),
            format!("({})", deletion.deleted_at).dimmed()
        )
    }

    fn kind_badge(kind: NotificationType) -> ColoredString {
        match kind {
            NotificationType::Warning => "[warning]".yellow(),
            NotificationType::Error => "[error]".red(),
            NotificationType::Success => "[success]".green(),
            NotificationType::Info => "[info]".blue(),
        }
    }

    fn change(change: &str, change_type: ChangeType) -> ColoredString {
        match change_type {
            ChangeType::Positive => change.green(),
            ChangeType::Negative => change.red(),
            ChangeType::Neutral => change.dimmed(),
        }
    }

    fn bar(value: f64, max: f64) -> ColoredString {
        const WIDTH: f64 = 30.0;
        let len = if max > 0.0 {
            ((value.abs() / max) * WIDTH).round() as usize
        } else {
            0
        };
        let bar = "█".repeat(len);
        if value < 0.0 { bar.red() } else { bar.green() }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(48);
        format!("{}\n{:^48}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(32))
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(48).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use strata_domain::{AuthToken, Metric, Notification, SearchResultType};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_empty_object_is_called_out() {
        plain();
        assert_eq!(
            ConsoleFormatter::format_value(&serde_json::json!({})),
            "(empty response)"
        );
    }

    #[test]
    fn test_format_value_lists_top_level_keys() {
        plain();
        let output = ConsoleFormatter::format_value(&serde_json::json!({
            "status": "Healthy",
            "runway_months": 14.5
        }));
        assert!(output.contains("status: Healthy"));
        assert!(output.contains("runway_months: 14.5"));
    }

    #[test]
    fn test_format_dashboard_shows_metrics_and_cash_flow() {
        plain();
        let data = DashboardData {
            runway_months: 12.0,
            metrics: vec![Metric {
                id: "balance".to_string(),
                label: "Cash Balance".to_string(),
                value: "$120,000".to_string(),
                change: "+5.0%".to_string(),
                change_type: ChangeType::Positive,
            }],
            cash_flow: vec![strata_domain::CashFlowPoint {
                month: "Mar".to_string(),
                balance: 120_000.0,
            }],
        };

        let output = ConsoleFormatter::format_dashboard(&data);
        assert!(output.contains("Cash Balance"));
        assert!(output.contains("$120,000"));
        assert!(output.contains("+5.0%"));
        assert!(output.contains("Mar"));
    }

    #[test]
    fn test_format_session() {
        plain();
        let session = Session {
            user: User::fallback("founder@strata.ai"),
            token: AuthToken::new("tok").unwrap(),
        };
        let output = ConsoleFormatter::format_session(&session);
        assert!(output.starts_with("Signed in as founder"));
        assert!(output.contains("Onboarding: pending"));
    }

    #[test]
    fn test_format_notifications_uses_relative_time() {
        plain();
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let list = NotificationList {
            notifications: vec![Notification {
                id: "n1".to_string(),
                title: "Runway Warning".to_string(),
                message: "Less than 6 months".to_string(),
                kind: NotificationType::Warning,
                read: false,
                created_at: now - chrono::Duration::hours(2),
                link: None,
            }],
            unread_count: 1,
        };

        let output = ConsoleFormatter::format_notifications(&list, now);
        assert!(output.contains("1 unread"));
        assert!(output.contains("[warning] Runway Warning"));
        assert!(output.contains("2 hours ago"));
    }

    #[test]
    fn test_format_search_empty_and_kind() {
        plain();
        assert_eq!(ConsoleFormatter::format_search(&[]), "No results.");

        let output = ConsoleFormatter::format_search(&[SearchResult {
            id: "reports".to_string(),
            kind: SearchResultType::Report,
            title: "Financial Reports".to_string(),
            description: "Export".to_string(),
            link: "/reports".to_string(),
        }]);
        assert!(output.starts_with("report"));
        assert!(output.contains("/reports"));
    }

    #[test]
    fn test_format_roadmap_marks_completed_tasks() {
        plain();
        let mut roadmap = Roadmap::fallback("rdmp_1".to_string(), "Agency tier");
        roadmap.toggle_task("p1", "t2").unwrap();

        let output = ConsoleFormatter::format_roadmap(&roadmap);
        assert!(output.contains("Agency tier Execution Plan"));
        assert!(output.contains("12 weeks, 6% complete"));
        assert!(output.contains("Phase 1: Research & Validation (3 weeks)"));
        assert!(output.contains("[x] Competitor Analysis t2"));
        assert!(output.contains("[ ] Market Research t1"));
    }

    #[test]
    fn test_format_ideas_shows_opportunity() {
        plain();
        let output = ConsoleFormatter::format_ideas(&[Idea {
            id: "idea_1_0".to_string(),
            title: "Usage pricing".to_string(),
            description: "Bill per seat".to_string(),
            feasibility: 8.0,
            market_opportunity: MarketOpportunity::High,
        }]);
        assert!(output.contains("Usage pricing"));
        assert!(output.contains("Feasibility: 8 (high opportunity)"));
        assert_eq!(ConsoleFormatter::format_ideas(&[]), "No ideas returned.");
    }

    #[test]
    fn test_format_missing_startup_profile() {
        plain();
        assert!(ConsoleFormatter::format_startup_profile(None).starts_with("No startup profile"));
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
