//! Scenario use case: templates, listing, and what-if simulation.

use crate::client::executor::ApiClient;
use chrono::{SecondsFormat, Utc};
use strata_domain::{
    ApiError, Baseline, CreateScenarioInput, Scenario, ScenarioList, ScenarioTemplate,
    SimulationRequest, SimulationResponse, TemplateList,
};
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct ScenariosUseCase {
    client: ApiClient,
}

impl ScenariosUseCase {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Available templates. Empty when the endpoint fails.
    pub async fn templates(&self) -> Vec<ScenarioTemplate> {
        match self.client.get::<TemplateList>("/scenarios/templates").await {
            Ok(list) => list.templates,
            Err(e) => {
                warn!("Failed to fetch scenario templates: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn list(&self) -> Result<ScenarioList, ApiError> {
        self.client.get("/scenarios").await
    }

    /// Simulate a scenario against the current baseline.
    pub async fn simulate(&self, input: &CreateScenarioInput) -> Result<Scenario, ApiError> {
        let baseline: Baseline = self.client.get("/scenarios/baseline").await?;
        let request = SimulationRequest::from_input(input, &baseline);
        debug!(
            "Simulating '{}' as {} against cash balance {}",
            input.name, request.scenario_type, baseline.cash_balance
        );

        let response: SimulationResponse =
            self.client.post("/scenarios/simulate", &request).await?;
        info!("Simulation '{}': {}", input.name, response.summary);

        let now = Utc::now();
        Ok(Scenario::from_simulation(
            format!("scn_{}", now.timestamp_millis()),
            now.to_rfc3339_opts(SecondsFormat::Millis, true),
            input,
            &response,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{RouteTransport, client};
    use serde_json::Value;
    use std::sync::Arc;
    use strata_domain::{HttpMethod, Modifications, ScenarioKind};

    const BASELINE: &str = r#"{"cash_balance":500000,"monthly_revenue":40000,"monthly_expenses":60000,"burn_rate":20000,"runway_months":25}"#;

    fn simulation(projected_runway: f64) -> String {
        format!(
            r#"{{
                "scenario_name":"Hire engineer","scenario_type":"hire_employee",
                "baseline":{{"cash_balance":500000,"monthly_revenue":40000,"monthly_expenses":60000,"burn_rate":20000,"runway_months":25,"risk_level":"low"}},
                "projected":{{"cash_balance":500000,"monthly_revenue":40000,"monthly_expenses":70000,"burn_rate":30000,"runway_months":{},"risk_level":"medium"}},
                "runway_change":-8.3,"burn_rate_change":10000,"risk_change":"increased",
                "summary":"Runway drops","recommendation":"Proceed carefully"
            }}"#,
            projected_runway
        )
    }

    fn hire_input() -> CreateScenarioInput {
        CreateScenarioInput {
            name: "Hire engineer".to_string(),
            kind: ScenarioKind::Hire,
            modifications: Modifications {
                expense_change: 10000.0,
                revenue_change: 0.0,
                one_time_cash_change: -5000.0,
            },
        }
    }

    #[tokio::test]
    async fn test_simulate_posts_mapped_request() {
        let transport = Arc::new(
            RouteTransport::new()
                .route(HttpMethod::Get, "/scenarios/baseline", 200, BASELINE)
                .route(HttpMethod::Post, "/scenarios/simulate", 200, &simulation(16.7)),
        );
        let scenarios = ScenariosUseCase::new(client(&transport));

        let scenario = scenarios.simulate(&hire_input()).await.unwrap();

        assert!(scenario.id.starts_with("scn_"));
        assert_eq!(scenario.kind, "hire");
        assert_eq!(scenario.result.new_runway_months, 16.7);
        assert_eq!(scenario.result.runway_delta, -8.3);

        let sent = transport
            .request_to(HttpMethod::Post, "/scenarios/simulate")
            .unwrap();
        let body: Value = serde_json::from_slice(&sent.body.unwrap()).unwrap();
        assert_eq!(body["scenario_type"], "hire_employee");
        assert_eq!(body["parameters"]["salary"], 10000.0);
        assert_eq!(body["parameters"]["custom_cash_change"], -5000.0);
        assert_eq!(body["baseline"]["monthly_expenses"], 60000.0);
    }

    #[tokio::test]
    async fn test_simulate_caps_profitable_runway() {
        let transport = Arc::new(
            RouteTransport::new()
                .route(HttpMethod::Get, "/scenarios/baseline", 200, BASELINE)
                .route(HttpMethod::Post, "/scenarios/simulate", 200, &simulation(250.0)),
        );
        let scenarios = ScenariosUseCase::new(client(&transport));

        let scenario = scenarios.simulate(&hire_input()).await.unwrap();

        assert_eq!(scenario.result.new_runway_months, 999.0);
    }

    #[tokio::test]
    async fn test_simulate_propagates_baseline_error() {
        let transport = Arc::new(RouteTransport::new().route(
            HttpMethod::Get,
            "/scenarios/baseline",
            400,
            r#"{"detail":"No financial data"}"#,
        ));
        let scenarios = ScenariosUseCase::new(client(&transport));

        let err = scenarios.simulate(&hire_input()).await.unwrap_err();

        assert_eq!(err.message(), "No financial data");
        assert_eq!(transport.paths(), vec!["GET /scenarios/baseline"]);
    }

    #[tokio::test]
    async fn test_templates_fall_back_to_empty() {
        let ok = Arc::new(RouteTransport::new().route(
            HttpMethod::Get,
            "/scenarios/templates",
            200,
            r#"{"templates":[{"id":"hire","name":"Hire","description":"Add headcount"}]}"#,
        ));
        let templates = ScenariosUseCase::new(client(&ok)).templates().await;
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].name, "Hire");

        let failing = Arc::new(RouteTransport::new());
        assert!(ScenariosUseCase::new(client(&failing))
            .templates()
            .await
            .is_empty());
    }
}
