//! Dashboard use case.

use crate::client::executor::ApiClient;
use strata_domain::{ApiError, DashboardData, FinancialRecord, RunwaySnapshot};
use tracing::{info, warn};

#[derive(Clone)]
pub struct DashboardUseCase {
    client: ApiClient,
}

impl DashboardUseCase {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Load the dashboard, or the empty placeholder if any fetch fails.
    pub async fn load(&self) -> DashboardData {
        match self.try_load().await {
            Ok(data) => {
                info!("Dashboard loaded ({} months of history)", data.cash_flow.len());
                data
            }
            Err(e) => {
                warn!("Failed to load dashboard data: {}", e);
                DashboardData::empty()
            }
        }
    }

    /// Load the dashboard, surfacing the first fetch error.
    pub async fn try_load(&self) -> Result<DashboardData, ApiError> {
        let runway: RunwaySnapshot = self.client.get("/financials/runway").await?;
        let records: Vec<FinancialRecord> = self.client.get("/financials/export").await?;
        Ok(DashboardData::build(&runway, records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{RouteTransport, client};
    use std::sync::Arc;
    use strata_domain::{ChangeType, HttpMethod};

    const RUNWAY: &str = r#"{"current_month":"2024-03","cash_balance":120000,"monthly_burn_rate":20000,"runway_months":6.0,"status":"Warning"}"#;

    fn record(month: &str, balance: f64, burn: f64, revenue: f64) -> String {
        format!(
            r#"{{"id":"{m}","month":"{m}","cash_balance":{balance},"net_burn":{burn},"total_revenue":{revenue},"total_expenses":0}}"#,
            m = month
        )
    }

    #[tokio::test]
    async fn test_load_builds_metrics_from_both_endpoints() {
        let records = format!(
            "[{},{}]",
            record("2024-03", 120000.0, 20000.0, 11000.0),
            record("2024-02", 100000.0, 25000.0, 10000.0)
        );
        let transport = Arc::new(
            RouteTransport::new()
                .route(HttpMethod::Get, "/financials/runway", 200, RUNWAY)
                .route(HttpMethod::Get, "/financials/export", 200, &records),
        );
        let dashboard = DashboardUseCase::new(client(&transport));

        let data = dashboard.load().await;

        assert_eq!(data.runway_months, 6.0);
        let balance = data.metric("balance").unwrap();
        assert_eq!(balance.value, "$120,000");
        assert_eq!(balance.change, "+20.0%");
        assert_eq!(data.metric("revenue").unwrap().change, "+10.0%");
        assert_eq!(data.metric("runway").unwrap().change_type, ChangeType::Neutral);
        let months: Vec<&str> = data.cash_flow.iter().map(|p| p.month.as_str()).collect();
        assert_eq!(months, vec!["Feb", "Mar"]);
    }

    #[tokio::test]
    async fn test_load_falls_back_to_empty_on_error() {
        let transport = Arc::new(RouteTransport::new().route(
            HttpMethod::Get,
            "/financials/runway",
            200,
            RUNWAY,
        ));
        let dashboard = DashboardUseCase::new(client(&transport));

        assert_eq!(dashboard.load().await, DashboardData::empty());
        assert_eq!(dashboard.try_load().await.unwrap_err().status(), Some(404));
    }
}
