//! Route-table transport shared by the use case tests.

use crate::client::executor::ApiClient;
use crate::ports::key_value_store::{KeyValueStore, MemoryKeyValueStore};
use crate::ports::transport::{HttpTransport, TransportError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use strata_domain::{HttpMethod, OutboundRequest, TransportResponse};

pub(crate) const BASE_URL: &str = "http://api.test/api/v1";

/// Answers by `(method, path)`; unknown routes get a 404 with a detail body.
#[derive(Default)]
pub(crate) struct RouteTransport {
    routes: Mutex<HashMap<(HttpMethod, String), TransportResponse>>,
    requests: Mutex<Vec<OutboundRequest>>,
}

impl RouteTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn route(self, method: HttpMethod, path: &str, status: u16, body: &str) -> Self {
        self.routes.lock().unwrap().insert(
            (method, path.to_string()),
            TransportResponse::json(status, body),
        );
        self
    }

    pub(crate) fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn paths(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| format!("{} {}", r.method, strip_base(&r.url)))
            .collect()
    }

    pub(crate) fn request_to(&self, method: HttpMethod, path: &str) -> Option<OutboundRequest> {
        self.requests()
            .into_iter()
            .find(|r| r.method == method && strip_base(&r.url) == path)
    }
}

fn strip_base(url: &str) -> &str {
    url.strip_prefix(BASE_URL).unwrap_or(url)
}

#[async_trait]
impl HttpTransport for RouteTransport {
    async fn send(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError> {
        let key = (request.method, strip_base(&request.url).to_string());
        self.requests.lock().unwrap().push(request);
        Ok(self
            .routes
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| TransportResponse::json(404, r#"{"detail":"Not Found"}"#)))
    }
}

pub(crate) fn client_with_store(
    transport: &Arc<RouteTransport>,
    store: Arc<dyn KeyValueStore>,
) -> ApiClient {
    ApiClient::new(BASE_URL, transport.clone(), store)
}

pub(crate) fn client(transport: &Arc<RouteTransport>) -> ApiClient {
    client_with_store(transport, Arc::new(MemoryKeyValueStore::new()))
}
