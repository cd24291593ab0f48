//! Ideation use case: strategy ideas from the AI service.

use crate::client::executor::ApiClient;
use chrono::Utc;
use serde_json::Value;
use strata_domain::{ApiError, Idea, StrategySuggestion, SuggestStrategyRequest};
use tracing::{debug, info};

const INVALID_RESPONSE: &str = "Invalid response from AI service";

#[derive(Clone)]
pub struct IdeationUseCase {
    client: ApiClient,
}

impl IdeationUseCase {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Ask the AI service for strategy ideas that fit `context`.
    ///
    /// A response without a `suggestions` array is a decode error.
    pub async fn generate_ideas(&self, context: &str) -> Result<Vec<Idea>, ApiError> {
        debug!("Requesting strategy ideas ({} chars of context)", context.len());
        let mut response: Value = self
            .client
            .post("/ai/suggest-strategy", &SuggestStrategyRequest { context })
            .await?;

        let suggestions = match response.get_mut("suggestions").map(Value::take) {
            Some(suggestions @ Value::Array(_)) => suggestions,
            _ => return Err(ApiError::decode(INVALID_RESPONSE)),
        };
        let suggestions: Vec<StrategySuggestion> = serde_json::from_value(suggestions)
            .map_err(|e| ApiError::decode(format!("{}: {}", INVALID_RESPONSE, e)))?;

        let batch = Utc::now().timestamp_millis();
        let ideas: Vec<Idea> = suggestions
            .into_iter()
            .enumerate()
            .map(|(index, suggestion)| Idea::from_suggestion(suggestion, batch, index))
            .collect();
        info!("AI ideas generated: {}", ideas.len());
        Ok(ideas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{RouteTransport, client};
    use std::sync::Arc;
    use strata_domain::{HttpMethod, MarketOpportunity};

    fn answering(status: u16, body: &str) -> Arc<RouteTransport> {
        Arc::new(RouteTransport::new().route(HttpMethod::Post, "/ai/suggest-strategy", status, body))
    }

    #[tokio::test]
    async fn test_generate_ideas_maps_suggestions() {
        let transport = answering(
            200,
            r#"{"suggestions":[
                {"title":"Usage pricing","description":"Bill per seat","impact_score":8,"difficulty":"Low"},
                {"title":"Partner channel","description":"Resellers","impact_score":6.5,"difficulty":"high"},
                {"title":"Freemium","description":"Free tier","impact_score":5,"difficulty":"unknown"}
            ]}"#,
        );
        let ideation = IdeationUseCase::new(client(&transport));

        let ideas = ideation.generate_ideas("B2B invoicing for agencies").await.unwrap();

        assert_eq!(ideas.len(), 3);
        assert!(ideas[0].id.starts_with("idea_"));
        assert!(ideas[2].id.ends_with("_2"));
        assert_eq!(ideas[0].feasibility, 8.0);
        assert_eq!(ideas[0].market_opportunity, MarketOpportunity::High);
        assert_eq!(ideas[1].market_opportunity, MarketOpportunity::Low);
        assert_eq!(ideas[2].market_opportunity, MarketOpportunity::Medium);

        let sent = transport
            .request_to(HttpMethod::Post, "/ai/suggest-strategy")
            .unwrap();
        let body: Value = serde_json::from_slice(&sent.body.unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"context": "B2B invoicing for agencies"}));
    }

    #[tokio::test]
    async fn test_missing_suggestions_is_invalid_response() {
        for body in [r#"{"ideas":[]}"#, r#"{"suggestions":"none"}"#, ""] {
            let transport = answering(200, body);
            let err = IdeationUseCase::new(client(&transport))
                .generate_ideas("anything")
                .await
                .unwrap_err();

            assert!(matches!(err, ApiError::Decode(_)));
            assert_eq!(err.message(), "Invalid response from AI service");
        }
    }

    #[tokio::test]
    async fn test_empty_suggestions_is_no_ideas() {
        let transport = answering(200, r#"{"suggestions":[]}"#);
        let ideas = IdeationUseCase::new(client(&transport))
            .generate_ideas("anything")
            .await
            .unwrap();
        assert!(ideas.is_empty());
    }

    #[tokio::test]
    async fn test_service_error_propagates() {
        let transport = answering(503, r#"{"detail":"No LLM configured"}"#);
        let err = IdeationUseCase::new(client(&transport))
            .generate_ideas("anything")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.message(), "No LLM configured");
    }
}
