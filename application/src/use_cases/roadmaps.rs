//! Roadmap use case: generation from a strategy, templates, and task
//! progress.

use crate::client::executor::ApiClient;
use chrono::Utc;
use strata_domain::{
    GenerateRoadmapRequest, GeneratedRoadmap, Roadmap, RoadmapError, RoadmapTemplate,
    RoadmapTemplateList,
};
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct RoadmapsUseCase {
    client: ApiClient,
}

impl RoadmapsUseCase {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Generate an execution roadmap for a strategy.
    ///
    /// When the generator fails, a local four-phase plan is returned instead.
    pub async fn generate(&self, title: &str, description: Option<&str>) -> Roadmap {
        let request = GenerateRoadmapRequest::new(title, description);
        debug!("Generating roadmap for '{}'", title);

        match self
            .client
            .post::<GeneratedRoadmap, _>("/roadmaps/generate", &request)
            .await
        {
            Ok(generated) => {
                let roadmap = Roadmap::from(generated);
                info!(
                    "Roadmap '{}' generated with {} phases",
                    roadmap.title,
                    roadmap.phases.len()
                );
                roadmap
            }
            Err(e) => {
                warn!("Failed to generate roadmap, using local plan: {}", e);
                Roadmap::fallback(format!("rdmp_{}", Utc::now().timestamp_millis()), title)
            }
        }
    }

    /// Available templates. Empty when the endpoint fails.
    pub async fn templates(&self) -> Vec<RoadmapTemplate> {
        match self
            .client
            .get::<RoadmapTemplateList>("/roadmaps/templates")
            .await
        {
            Ok(list) => list.templates,
            Err(e) => {
                warn!("Failed to fetch roadmap templates: {}", e);
                Vec::new()
            }
        }
    }

    /// Flip a task's completion and return the roadmap with its new progress.
    pub fn toggle_task(
        &self,
        mut roadmap: Roadmap,
        phase_id: &str,
        task_id: &str,
    ) -> Result<Roadmap, RoadmapError> {
        roadmap.toggle_task(phase_id, task_id)?;
        debug!(
            "Toggled task {} in {}: roadmap {} at {}%",
            task_id, phase_id, roadmap.id, roadmap.progress
        );
        Ok(roadmap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{RouteTransport, client};
    use serde_json::Value;
    use std::sync::Arc;
    use strata_domain::HttpMethod;

    const GENERATED: &str = r#"{
        "id":"rm_42","title":"Agency tier","strategy_description":"Sell to agencies",
        "total_duration_weeks":6,"created_at":"2024-06-01T00:00:00Z",
        "success_criteria":[],
        "phases":[
            {"phase_number":1,"title":"Validate","description":"Talk to agencies","duration_weeks":2,
             "tasks":[{"id":"t1","title":"Interviews","description":"Ten calls","is_completed":false},
                      {"id":"t2","title":"Pricing page","description":"Draft","is_completed":false}],
             "kpis":[],"resources_needed":[],"dependencies":[],"risks":[]},
            {"phase_number":2,"title":"Build","description":"Ship it","duration_weeks":4,
             "tasks":[{"id":"t3","title":"Agency dashboard","description":"","is_completed":false},
                      {"id":"t4","title":"Billing","description":"","is_completed":false}]}
        ]
    }"#;

    fn generator() -> Arc<RouteTransport> {
        Arc::new(RouteTransport::new().route(
            HttpMethod::Post,
            "/roadmaps/generate",
            200,
            GENERATED,
        ))
    }

    #[tokio::test]
    async fn test_generate_posts_strategy_and_maps_phases() {
        let transport = generator();
        let roadmaps = RoadmapsUseCase::new(client(&transport));

        let roadmap = roadmaps.generate("Agency tier", None).await;

        assert_eq!(roadmap.id, "rm_42");
        assert_eq!(roadmap.description.as_deref(), Some("Sell to agencies"));
        assert_eq!(roadmap.progress, 0.0);
        assert_eq!(roadmap.phases[0].id, "phase_1");
        assert_eq!(roadmap.phases[1].name, "Build");
        assert_eq!(roadmap.phases[1].tasks[1].title, "Billing");

        let sent = transport
            .request_to(HttpMethod::Post, "/roadmaps/generate")
            .unwrap();
        let body: Value = serde_json::from_slice(&sent.body.unwrap()).unwrap();
        assert_eq!(body["strategy_title"], "Agency tier");
        assert!(
            body["strategy_description"]
                .as_str()
                .unwrap()
                .starts_with("Execute the strategy: Agency tier.")
        );
        assert_eq!(body["available_runway_months"], 12);
        assert_eq!(body["team_size"], 3);
        assert_eq!(body["priority"], "high");
    }

    #[tokio::test]
    async fn test_generate_falls_back_to_local_plan() {
        let transport = Arc::new(RouteTransport::new().route(
            HttpMethod::Post,
            "/roadmaps/generate",
            500,
            r#"{"detail":"LLM unavailable"}"#,
        ));
        let roadmaps = RoadmapsUseCase::new(client(&transport));

        let roadmap = roadmaps.generate("Agency tier", Some("Sell to agencies")).await;

        assert!(roadmap.id.starts_with("rdmp_"));
        assert_eq!(roadmap.title, "Agency tier Execution Plan");
        assert_eq!(roadmap.phases.len(), 4);
    }

    #[tokio::test]
    async fn test_templates_fall_back_to_empty() {
        let ok = Arc::new(RouteTransport::new().route(
            HttpMethod::Get,
            "/roadmaps/templates",
            200,
            r#"{"templates":[{"id":"saas","title":"SaaS launch","description":"B2B SaaS","suggested_team_size":4,"typical_duration_weeks":16}]}"#,
        ));
        let templates = RoadmapsUseCase::new(client(&ok)).templates().await;
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].suggested_team_size, 4);
        assert_eq!(templates[0].typical_duration_weeks, 16);

        let failing = Arc::new(RouteTransport::new());
        assert!(
            RoadmapsUseCase::new(client(&failing))
                .templates()
                .await
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_toggle_task_updates_progress_across_phases() {
        let transport = generator();
        let roadmaps = RoadmapsUseCase::new(client(&transport));
        let roadmap = roadmaps.generate("Agency tier", None).await;

        let roadmap = roadmaps.toggle_task(roadmap, "phase_2", "t3").unwrap();
        assert!(roadmap.phases[1].tasks[0].is_completed);
        assert_eq!(roadmap.progress, 25.0);

        let roadmap = roadmaps.toggle_task(roadmap, "phase_1", "t1").unwrap();
        assert_eq!(roadmap.progress, 50.0);

        let err = roadmaps.toggle_task(roadmap, "phase_1", "t3").unwrap_err();
        assert!(matches!(err, RoadmapError::TaskNotFound { .. }));
        assert_eq!(transport.paths(), vec!["POST /roadmaps/generate"]);
    }
}
