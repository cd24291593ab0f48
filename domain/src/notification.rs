//! Notifications and the local fallback that derives them from financials.

use crate::finance::records::RunwaySnapshot;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Runway below this many months raises a warning.
pub const RUNWAY_WARNING_MONTHS: f64 = 6.0;
/// Runway below this many months raises a critical alert.
pub const RUNWAY_CRITICAL_MONTHS: f64 = 3.0;
/// Monthly burn above this amount is flagged.
pub const HIGH_BURN_RATE: f64 = 50_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Warning,
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub link: Option<String>,
}

impl Notification {
    fn new(
        id: &str,
        title: &str,
        message: impl Into<String>,
        kind: NotificationType,
        read: bool,
        created_at: DateTime<Utc>,
        link: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            message: message.into(),
            kind,
            read,
            created_at,
            link: Some(link.to_string()),
        }
    }
}

/// `GET /notifications` envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationList {
    #[serde(default)]
    pub notifications: Vec<Notification>,
    #[serde(default)]
    pub unread_count: usize,
}

/// Derive notifications locally when the notifications endpoint is missing.
///
/// `runway` is `None` when financial data could not be loaded, which yields
/// the onboarding welcome message instead of runway alerts. The result is
/// sorted newest first.
pub fn derive_notifications(
    runway: Option<&RunwaySnapshot>,
    scenario_count: usize,
    now: DateTime<Utc>,
) -> Vec<Notification> {
    let mut notifications = Vec::new();

    match runway {
        Some(runway) => {
            let months = runway.runway_months;
            if months > 0.0 && months < RUNWAY_WARNING_MONTHS {
                notifications.push(Notification::new(
                    "runway-warning",
                    "Runway Alert",
                    format!(
                        "Your runway is {:.1} months. Consider reducing expenses or raising capital.",
                        months
                    ),
                    NotificationType::Warning,
                    false,
                    now,
                    "/",
                ));
            }
            if months > 0.0 && months < RUNWAY_CRITICAL_MONTHS {
                notifications.push(Notification::new(
                    "runway-critical",
                    "Critical Runway Warning",
                    format!(
                        "Your runway is critically low at {:.1} months. Immediate action required.",
                        months
                    ),
                    NotificationType::Error,
                    false,
                    now,
                    "/scenarios",
                ));
            }
            if runway.monthly_burn_rate > HIGH_BURN_RATE {
                notifications.push(Notification::new(
                    "burn-rate-high",
                    "High Burn Rate",
                    format!(
                        "Your monthly burn rate is {}. Review expenses in Analytics.",
                        crate::finance::format::format_currency(runway.monthly_burn_rate)
                    ),
                    NotificationType::Info,
                    false,
                    now - Duration::days(1),
                    "/",
                ));
            }
            if runway.monthly_burn_rate < 0.0 {
                notifications.push(Notification::new(
                    "positive-cashflow",
                    "Positive Cash Flow",
                    "Congratulations! Your startup is generating positive cash flow.",
                    NotificationType::Success,
                    true,
                    now - Duration::days(2),
                    "/",
                ));
            }
        }
        None => notifications.push(Notification::new(
            "welcome",
            "Welcome to Strata AI",
            "Get started by importing your financial data in Settings.",
            NotificationType::Info,
            false,
            now,
            "/settings",
        )),
    }

    if scenario_count > 0 {
        notifications.push(Notification::new(
            "scenarios-available",
            "Scenarios Ready",
            format!("You have {} scenario(s) to review.", scenario_count),
            NotificationType::Info,
            true,
            now - Duration::days(3),
            "/scenarios",
        ));
    }

    // Stable sort keeps insertion order for equal timestamps.
    notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    notifications
}

/// Relative age of a timestamp: "Just now", "5 minutes ago", "1 day ago"...
/// Anything a week or older is shown as a date.
pub fn format_time_ago(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - created_at;
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{} minute{} ago", minutes, plural(minutes))
    } else if hours < 24 {
        format!("{} hour{} ago", hours, plural(hours))
    } else if days < 7 {
        format!("{} day{} ago", days, plural(days))
    } else {
        created_at.format("%Y-%m-%d").to_string()
    }
}

fn plural(n: i64) -> &'static str {
    if n > 1 { "s" } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn runway(months: f64, burn: f64) -> RunwaySnapshot {
        RunwaySnapshot {
            current_month: "2024-06".to_string(),
            cash_balance: 100_000.0,
            monthly_burn_rate: burn,
            runway_months: months,
            status: "Warning".to_string(),
        }
    }

    fn ids(notifications: &[Notification]) -> Vec<&str> {
        notifications.iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_critical_runway_raises_both_alerts() {
        let list = derive_notifications(Some(&runway(2.5, 60_000.0)), 0, now());
        assert_eq!(
            ids(&list),
            vec!["runway-warning", "runway-critical", "burn-rate-high"]
        );
        assert_eq!(list[1].kind, NotificationType::Error);
        assert!(list[0].message.contains("2.5 months"));
        assert!(list[2].message.contains("$60,000"));
    }

    #[test]
    fn test_positive_cash_flow_and_scenarios_sorted_newest_first() {
        let list = derive_notifications(Some(&runway(0.0, -1_000.0)), 3, now());
        assert_eq!(ids(&list), vec!["positive-cashflow", "scenarios-available"]);
        assert!(list[0].read);
        assert_eq!(list[1].message, "You have 3 scenario(s) to review.");
        assert_eq!(list[1].created_at, now() - Duration::days(3));
    }

    #[test]
    fn test_missing_financials_yields_welcome() {
        let list = derive_notifications(None, 0, now());
        assert_eq!(ids(&list), vec!["welcome"]);
        assert_eq!(list[0].link.as_deref(), Some("/settings"));
    }

    #[test]
    fn test_healthy_runway_yields_nothing() {
        assert!(derive_notifications(Some(&runway(18.0, 20_000.0)), 0, now()).is_empty());
    }

    #[test]
    fn test_format_time_ago() {
        let now = now();
        assert_eq!(format_time_ago(now, now), "Just now");
        assert_eq!(format_time_ago(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(format_time_ago(now - Duration::minutes(45), now), "45 minutes ago");
        assert_eq!(format_time_ago(now - Duration::hours(2), now), "2 hours ago");
        assert_eq!(format_time_ago(now - Duration::days(1), now), "1 day ago");
        assert_eq!(format_time_ago(now - Duration::days(6), now), "6 days ago");
        assert_eq!(format_time_ago(now - Duration::days(10), now), "2024-06-05");
    }
}
