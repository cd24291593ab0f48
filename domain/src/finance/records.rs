//! Financial payloads returned by the `/financials` endpoints

use serde::{Deserialize, Serialize};

/// `GET /financials/runway` (also the baseline used by notifications).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunwaySnapshot {
    #[serde(default)]
    pub current_month: String,
    pub cash_balance: f64,
    pub monthly_burn_rate: f64,
    pub runway_months: f64,
    pub status: String,
}

/// One month of financial data from `GET /financials/export`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub id: String,
    /// `YYYY-MM`
    pub month: String,
    #[serde(default)]
    pub revenue_recurring: f64,
    #[serde(default)]
    pub revenue_one_time: f64,
    #[serde(default)]
    pub expenses_salaries: f64,
    #[serde(default)]
    pub expenses_marketing: f64,
    #[serde(default)]
    pub expenses_infrastructure: f64,
    #[serde(default)]
    pub expenses_other: f64,
    pub cash_balance: f64,
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub net_burn: f64,
}

/// Runway above this many months is treated as "profitable".
pub const PROFITABLE_RUNWAY_THRESHOLD: f64 = 100.0;

/// Display value used for a profitable runway.
pub const PROFITABLE_RUNWAY_CAP: f64 = 999.0;

/// Cap an effectively infinite runway to the display sentinel.
pub fn cap_runway(months: f64) -> f64 {
    if months > PROFITABLE_RUNWAY_THRESHOLD {
        PROFITABLE_RUNWAY_CAP
    } else {
        months
    }
}
