//! Global search use case.

use crate::client::executor::ApiClient;
use strata_domain::search::{normalize_query, search};
use strata_domain::{RoadmapList, ScenarioList, SearchResult};
use tracing::debug;

#[derive(Clone)]
pub struct SearchUseCase {
    client: ApiClient,
}

impl SearchUseCase {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Search scenarios, roadmaps, reports and pages.
    ///
    /// Scenarios and roadmaps are fetched concurrently; a source that fails
    /// to load is left out rather than failing the search.
    pub async fn search(&self, query: &str) -> Vec<SearchResult> {
        let Some(term) = normalize_query(query) else {
            return Vec::new();
        };

        let (scenarios, roadmaps) = tokio::join!(
            self.client.get::<ScenarioList>("/scenarios"),
            self.client.get::<RoadmapList>("/roadmaps"),
        );
        let scenarios = scenarios
            .inspect_err(|e| debug!("Search skipping scenarios: {}", e))
            .map(|list| list.scenarios)
            .unwrap_or_default();
        let roadmaps = roadmaps
            .inspect_err(|e| debug!("Search skipping roadmaps: {}", e))
            .map(|list| list.roadmaps)
            .unwrap_or_default();

        search(&term, &scenarios, &roadmaps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{RouteTransport, client};
    use std::sync::Arc;
    use strata_domain::{HttpMethod, SearchResultType};

    const SCENARIOS: &str = r#"{"scenarios":[
        {"id":"s1","name":"Hire two engineers","type":"hire"},
        {"id":"s2","name":"Raise prices","type":"pricing"}
    ]}"#;
    const ROADMAPS: &str = r#"{"roadmaps":[
        {"id":"r1","title":"Engineering hiring plan","description":"Scale the team"}
    ]}"#;

    #[tokio::test]
    async fn test_matches_scenarios_and_roadmaps_in_order() {
        let transport = Arc::new(
            RouteTransport::new()
                .route(HttpMethod::Get, "/scenarios", 200, SCENARIOS)
                .route(HttpMethod::Get, "/roadmaps", 200, ROADMAPS),
        );
        let search = SearchUseCase::new(client(&transport));

        let results = search.search("  HIR ").await;

        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "r1"]);
        assert_eq!(results[0].kind, SearchResultType::Scenario);
        assert_eq!(results[1].kind, SearchResultType::Roadmap);
    }

    #[tokio::test]
    async fn test_failed_source_is_skipped() {
        let transport = Arc::new(
            RouteTransport::new()
                .route(HttpMethod::Get, "/scenarios", 500, "{}")
                .route(HttpMethod::Get, "/roadmaps", 200, ROADMAPS),
        );
        let search = SearchUseCase::new(client(&transport));

        let results = search.search("engineering").await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "r1");
    }

    #[tokio::test]
    async fn test_short_query_makes_no_requests() {
        let transport = Arc::new(RouteTransport::new());
        let search = SearchUseCase::new(client(&transport));

        assert!(search.search(" a ").await.is_empty());
        assert!(transport.requests().is_empty());
    }
}
