//! Startup profile, account settings and data export.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartupStage {
    Idea,
    Mvp,
    Growth,
    Scale,
}

impl StartupStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            StartupStage::Idea => "idea",
            StartupStage::Mvp => "mvp",
            StartupStage::Growth => "growth",
            StartupStage::Scale => "scale",
        }
    }
}

impl fmt::Display for StartupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StartupStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "idea" => Ok(StartupStage::Idea),
            "mvp" => Ok(StartupStage::Mvp),
            "growth" => Ok(StartupStage::Growth),
            "scale" => Ok(StartupStage::Scale),
            other => Err(format!("Unknown startup stage: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartupProfile {
    pub id: String,
    pub name: String,
    pub industry: String,
    pub stage: StartupStage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub team_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub founder_background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_roles: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_cash_balance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_monthly_revenue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_monthly_expenses: Option<f64>,

    pub currency: String,
    /// Months of runway below which a warning is raised
    pub runway_warning_threshold: f64,
    pub runway_critical_threshold: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_runway_months: Option<f64>,

    #[serde(default)]
    pub onboarding_completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// `POST /startup/profile` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateStartupInput {
    pub name: String,
    pub industry: String,
    pub stage: StartupStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founder_background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_roles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_cash_balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_monthly_revenue: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_monthly_expenses: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_runway_months: Option<f64>,
}

/// `PUT /startup/profile` body. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateStartupInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<StartupStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founder_background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_roles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_cash_balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_monthly_revenue: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_monthly_expenses: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_runway_months: Option<f64>,
}

impl UpdateStartupInput {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startup_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    pub currency: String,
    pub runway_warning_threshold: f64,
    pub runway_critical_threshold: f64,
    pub llm_provider: String,
    pub llm_model: String,
}

/// `PUT /startup/settings` body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateSettingsInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runway_warning_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runway_critical_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// Everything `GET /startup/export` returns about the account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataExport {
    pub user: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startup_profile: Option<Map<String, Value>>,
    #[serde(default)]
    pub financial_records: Vec<Map<String, Value>>,
    pub export_date: String,
    #[serde(default)]
    pub record_count: u64,
}

/// `DELETE /startup/account` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountDeletion {
    #[serde(default)]
    pub message: String,
    pub deleted_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_deserializes_without_optionals() {
        let profile: StartupProfile = serde_json::from_value(json!({
            "id": "s1", "name": "Strata", "industry": "fintech", "stage": "mvp",
            "team_size": 3, "currency": "USD",
            "runway_warning_threshold": 6, "runway_critical_threshold": 3,
            "onboarding_completed": true,
            "created_at": "2024-06-01T00:00:00Z", "updated_at": "2024-06-02T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(profile.stage, StartupStage::Mvp);
        assert_eq!(profile.key_roles, None);
        assert_eq!(profile.runway_warning_threshold, 6.0);
    }

    #[test]
    fn test_update_sends_only_set_fields() {
        let update = UpdateStartupInput {
            team_size: Some(5),
            stage: Some(StartupStage::Growth),
            ..Default::default()
        };
        assert!(!update.is_empty());
        assert!(UpdateStartupInput::default().is_empty());
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"stage": "growth", "team_size": 5})
        );
    }

    #[test]
    fn test_stage_parses_case_insensitively() {
        assert_eq!("Scale".parse::<StartupStage>(), Ok(StartupStage::Scale));
        assert!("seed".parse::<StartupStage>().is_err());
    }
}
