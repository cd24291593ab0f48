//! What-if scenarios: simulation requests, results and templates.

use crate::finance::records::cap_runway;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of business decision a scenario models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    Hire,
    Marketing,
    Pricing,
    Investment,
    Custom,
}

impl ScenarioKind {
    /// Scenario type identifier understood by `/scenarios/simulate`.
    pub fn api_type(&self) -> &'static str {
        match self {
            ScenarioKind::Hire => "hire_employee",
            ScenarioKind::Marketing => "change_marketing",
            ScenarioKind::Pricing => "change_pricing",
            ScenarioKind::Investment => "receive_investment",
            ScenarioKind::Custom => "custom",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioKind::Hire => "hire",
            ScenarioKind::Marketing => "marketing",
            ScenarioKind::Pricing => "pricing",
            ScenarioKind::Investment => "investment",
            ScenarioKind::Custom => "custom",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hire" => Ok(ScenarioKind::Hire),
            "marketing" => Ok(ScenarioKind::Marketing),
            "pricing" => Ok(ScenarioKind::Pricing),
            "investment" => Ok(ScenarioKind::Investment),
            "custom" => Ok(ScenarioKind::Custom),
            other => Err(format!("Unknown scenario type: {}", other)),
        }
    }
}

/// Monthly and one-off changes applied by a scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifications {
    #[serde(default)]
    pub expense_change: f64,
    #[serde(default)]
    pub revenue_change: f64,
    #[serde(default)]
    pub one_time_cash_change: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateScenarioInput {
    pub name: String,
    pub kind: ScenarioKind,
    pub modifications: Modifications,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOutcome {
    pub new_runway_months: f64,
    pub runway_delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub modifications: Modifications,
    #[serde(default)]
    pub result: ScenarioOutcome,
}

/// `GET /scenarios` envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioList {
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

/// `GET /scenarios/baseline`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub cash_balance: f64,
    pub monthly_revenue: f64,
    pub monthly_expenses: f64,
    #[serde(default)]
    pub burn_rate: f64,
    #[serde(default)]
    pub runway_months: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationParameters {
    pub salary: f64,
    pub count: u32,
    pub custom_expense_change: f64,
    pub custom_revenue_change: f64,
    pub custom_cash_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationBaseline {
    pub monthly_revenue: f64,
    pub monthly_expenses: f64,
    pub cash_balance: f64,
}

/// `POST /scenarios/simulate` request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRequest {
    pub scenario_type: String,
    pub name: String,
    pub parameters: SimulationParameters,
    pub baseline: SimulationBaseline,
}

impl SimulationRequest {
    pub fn from_input(input: &CreateScenarioInput, baseline: &Baseline) -> Self {
        let mods = &input.modifications;
        Self {
            scenario_type: input.kind.api_type().to_string(),
            name: input.name.clone(),
            parameters: SimulationParameters {
                salary: mods.expense_change,
                count: 1,
                custom_expense_change: mods.expense_change,
                custom_revenue_change: mods.revenue_change,
                custom_cash_change: mods.one_time_cash_change,
            },
            baseline: SimulationBaseline {
                monthly_revenue: baseline.monthly_revenue,
                monthly_expenses: baseline.monthly_expenses,
                cash_balance: baseline.cash_balance,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FinancialState {
    pub cash_balance: f64,
    pub monthly_revenue: f64,
    pub monthly_expenses: f64,
    pub burn_rate: f64,
    pub runway_months: f64,
    pub risk_level: String,
}

/// `POST /scenarios/simulate` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationResponse {
    pub scenario_name: String,
    pub scenario_type: String,
    pub baseline: FinancialState,
    pub projected: FinancialState,
    pub runway_change: f64,
    pub burn_rate_change: f64,
    pub risk_change: String,
    pub summary: String,
    pub recommendation: String,
}

impl Scenario {
    /// Build the scenario record for a simulation that has just completed.
    pub fn from_simulation(
        id: String,
        created_at: String,
        input: &CreateScenarioInput,
        response: &SimulationResponse,
    ) -> Self {
        Self {
            id,
            name: input.name.clone(),
            kind: input.kind.to_string(),
            created_at,
            modifications: input.modifications.clone(),
            result: ScenarioOutcome {
                new_runway_months: cap_runway(response.projected.runway_months),
                runway_delta: response.runway_change,
            },
        }
    }
}

/// `GET /scenarios/templates` item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub parameters: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub example_use: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateList {
    #[serde(default)]
    pub templates: Vec<ScenarioTemplate>,
}
