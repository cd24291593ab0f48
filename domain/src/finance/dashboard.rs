//! Dashboard metrics derived from runway and monthly records.

use super::format::{format_currency, format_month_name, format_percent_change};
use super::records::{FinancialRecord, PROFITABLE_RUNWAY_THRESHOLD, RunwaySnapshot, cap_runway};
use serde::{Deserialize, Serialize};

/// Number of trailing months shown in the cash flow series.
pub const CASH_FLOW_MONTHS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub id: String,
    pub label: String,
    pub value: String,
    pub change: String,
    pub change_type: ChangeType,
}

impl Metric {
    fn new(
        id: &str,
        label: &str,
        value: impl Into<String>,
        change: impl Into<String>,
        change_type: ChangeType,
    ) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            value: value.into(),
            change: change.into(),
            change_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowPoint {
    pub month: String,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub runway_months: f64,
    pub metrics: Vec<Metric>,
    pub cash_flow: Vec<CashFlowPoint>,
}

impl DashboardData {
    /// Placeholder shown when financial data cannot be loaded.
    pub fn empty() -> Self {
        Self {
            runway_months: 0.0,
            metrics: vec![
                Metric::new("balance", "Cash Balance", "$0", "0%", ChangeType::Neutral),
                Metric::new("burn", "Net Monthly Burn", "$0", "0%", ChangeType::Neutral),
                Metric::new("revenue", "Monthly Revenue", "$0", "0%", ChangeType::Neutral),
                Metric::new(
                    "runway",
                    "Runway Status",
                    "No Data",
                    "Add financial data",
                    ChangeType::Neutral,
                ),
            ],
            cash_flow: Vec::new(),
        }
    }

    /// Build the dashboard from the runway snapshot and the monthly records.
    ///
    /// Records may arrive in any order; they are sorted by month first.
    pub fn build(runway: &RunwaySnapshot, mut records: Vec<FinancialRecord>) -> Self {
        records.sort_by(|a, b| a.month.cmp(&b.month));

        let latest = records.last();
        let previous = records.len().checked_sub(2).and_then(|i| records.get(i));

        let changes = match (latest, previous) {
            (Some(latest), Some(previous)) => Some(MonthOverMonth::between(latest, previous)),
            _ => None,
        };
        let render = |pick: fn(&MonthOverMonth) -> f64| {
            changes
                .as_ref()
                .map(|c| format_percent_change(pick(c)))
                .unwrap_or_else(|| "0%".to_string())
        };

        let previous_balance = previous.map(|r| r.cash_balance).unwrap_or(0.0);
        let balance_type = if runway.cash_balance >= previous_balance {
            ChangeType::Positive
        } else {
            ChangeType::Negative
        };

        // Negative burn means the company is cash-flow positive.
        let burn_type = if runway.monthly_burn_rate <= 0.0 {
            ChangeType::Positive
        } else {
            ChangeType::Negative
        };

        let revenue_type = match &changes {
            Some(c) if c.revenue >= 0.0 => ChangeType::Positive,
            Some(_) => ChangeType::Negative,
            None => ChangeType::Neutral,
        };

        let runway_type = match runway.status.as_str() {
            "Healthy" => ChangeType::Positive,
            "Warning" => ChangeType::Neutral,
            _ => ChangeType::Negative,
        };
        let runway_change = if runway.runway_months > PROFITABLE_RUNWAY_THRESHOLD {
            "∞ months".to_string()
        } else {
            format!("{:.1} months", runway.runway_months)
        };

        let metrics = vec![
            Metric::new(
                "balance",
                "Cash Balance",
                format_currency(runway.cash_balance),
                render(|c| c.balance),
                balance_type,
            ),
            Metric::new(
                "burn",
                "Net Monthly Burn",
                format_currency(runway.monthly_burn_rate.abs()),
                render(|c| c.burn),
                burn_type,
            ),
            Metric::new(
                "revenue",
                "Monthly Revenue",
                format_currency(latest.map(|r| r.total_revenue).unwrap_or(0.0)),
                render(|c| c.revenue),
                revenue_type,
            ),
            Metric::new(
                "runway",
                "Runway Status",
                runway.status.clone(),
                runway_change,
                runway_type,
            ),
        ];

        let skip = records.len().saturating_sub(CASH_FLOW_MONTHS);
        let cash_flow = records
            .iter()
            .skip(skip)
            .map(|record| CashFlowPoint {
                month: format_month_name(&record.month),
                balance: record.cash_balance,
            })
            .collect();

        Self {
            runway_months: cap_runway(runway.runway_months),
            metrics,
            cash_flow,
        }
    }

    pub fn metric(&self, id: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.id == id)
    }
}

/// Percentage changes between the two most recent months.
struct MonthOverMonth {
    balance: f64,
    burn: f64,
    revenue: f64,
}

impl MonthOverMonth {
    fn between(latest: &FinancialRecord, previous: &FinancialRecord) -> Self {
        Self {
            balance: percent_change(
                latest.cash_balance,
                previous.cash_balance,
                nonzero_or_one(previous.cash_balance),
            ),
            burn: percent_change(
                latest.net_burn,
                previous.net_burn,
                nonzero_or_one(previous.net_burn).abs(),
            ),
            revenue: percent_change(
                latest.total_revenue,
                previous.total_revenue,
                nonzero_or_one(previous.total_revenue),
            ),
        }
    }
}

fn nonzero_or_one(value: f64) -> f64 {
    if value == 0.0 { 1.0 } else { value }
}

fn percent_change(latest: f64, previous: f64, divisor: f64) -> f64 {
    (latest - previous) / divisor * 100.0
}
