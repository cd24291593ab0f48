//! LLM provider configuration (`/llm/*`).

use crate::client::executor::ApiClient;
use strata_domain::{
    ApiError, LlmConfig, LlmProvider, MessageResponse, TestLlmRequest, TestLlmResponse,
    UpdateLlmConfig,
};

#[derive(Clone)]
pub struct LlmConfigUseCase {
    client: ApiClient,
}

impl LlmConfigUseCase {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn config(&self) -> Result<LlmConfig, ApiError> {
        self.client.get("/llm/config").await
    }

    pub async fn update(&self, update: &UpdateLlmConfig) -> Result<LlmConfig, ApiError> {
        self.client.put("/llm/config", update).await
    }

    /// Test a provider connection. `None` tests the configured provider.
    pub async fn test(&self, request: Option<&TestLlmRequest>) -> Result<TestLlmResponse, ApiError> {
        let default = TestLlmRequest::default();
        self.client
            .post("/llm/test", request.unwrap_or(&default))
            .await
    }

    pub async fn providers(&self) -> Result<Vec<LlmProvider>, ApiError> {
        self.client.get("/llm/providers").await
    }

    pub async fn delete_api_key(&self, provider: &str) -> Result<MessageResponse, ApiError> {
        self.client
            .delete(&format!("/llm/api-key/{}", provider))
            .await
    }
}
