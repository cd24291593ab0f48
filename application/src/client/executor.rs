//! Request executor
//!
//! [`ApiClient`] is the single entry point every use case goes through for
//! network access. One call:
//!
//! 1. resolves the path against the base URL
//! 2. computes headers (content type, encoding, bearer token, caller overrides)
//! 3. for GET, joins an identical in-flight call or registers a new one
//! 4. races the transport against its own timeout
//! 5. maps the outcome to a JSON value or exactly one [`ApiError`]

use crate::client::dedup::RequestDeduplicator;
use crate::client::error_normalizer::normalize;
use crate::client::timeout::TimeoutController;
use crate::client::token_accessor::TokenAccessor;
use crate::ports::key_value_store::KeyValueStore;
use crate::ports::request_logger::{NoRequestLogger, RequestEvent, RequestLogger, RequestOutcome};
use crate::ports::transport::{HttpTransport, TransportError};
use futures::FutureExt;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use strata_domain::{
    ApiError, ApiRequest, HttpMethod, OutboundRequest, RequestBody, RequestHeaders,
    TransportResponse,
};
use tokio::time::Instant;
use tracing::{debug, warn};

/// Sent on JSON calls so the server may compress the response.
pub const ACCEPT_ENCODING: &str = "gzip, deflate, br";

/// HTTP client for the Strata API.
///
/// Cheap to clone: clones share the transport, the store, and the
/// in-flight registry.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    tokens: TokenAccessor,
    timeout: TimeoutController,
    dedup: RequestDeduplicator,
    request_logger: Arc<dyn RequestLogger>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            tokens: TokenAccessor::new(store),
            timeout: TimeoutController::default(),
            dedup: RequestDeduplicator::new(),
            request_logger: Arc::new(NoRequestLogger),
        }
    }

    pub fn with_timeout(mut self, duration: Duration) -> Self {
        self.timeout = TimeoutController::new(duration);
        self
    }

    pub fn with_request_logger(mut self, logger: Arc<dyn RequestLogger>) -> Self {
        self.request_logger = logger;
        self
    }

    pub fn with_deduplicator(mut self, dedup: RequestDeduplicator) -> Self {
        self.dedup = dedup;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout.duration()
    }

    pub fn deduplicator(&self) -> &RequestDeduplicator {
        &self.dedup
    }

    // ==================== Typed operations ====================

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(ApiRequest::get(path)).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = ApiRequest::post_json(path, body)?;
        self.execute(request).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = ApiRequest::put_json(path, body)?;
        self.execute(request).await
    }

    /// POST without a body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(ApiRequest::new(HttpMethod::Post, path, RequestBody::Empty))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(ApiRequest::delete(path)).await
    }

    /// POST an `application/x-www-form-urlencoded` body.
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let request = ApiRequest::post_form(path, fields)?;
        self.execute(request).await
    }

    /// Send a request and decode the JSON result into `T`.
    pub async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let value = self.send(request).await?;
        serde_json::from_value(value)
            .map_err(|e| ApiError::decode(format!("Unexpected response shape: {}", e)))
    }

    /// Send a request and return the raw JSON result.
    ///
    /// GETs share an identical call already in flight; every other method
    /// always goes to the network.
    pub async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        if !request.is_deduplicated() {
            return self.call(request, false).await;
        }

        let key = request.dedup_key();
        let client = self.clone();
        let registration = self.dedup.join_or_register(key.clone(), move |guard| {
            async move {
                let result = client.call(request, true).await;
                drop(guard);
                result
            }
            .boxed()
        });
        if registration.is_joined() {
            debug!("Joining in-flight request {}", key);
        }
        registration.into_call().await
    }

    // ==================== Underlying call ====================

    async fn call(&self, request: ApiRequest, deduplicated: bool) -> Result<Value, ApiError> {
        let method = request.method;
        let path = request.path.clone();
        let outbound = self.prepare(request);

        let started = Instant::now();
        let response = self.dispatch(outbound).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let status = response.as_ref().ok().map(|r| r.status);
        let result = response.and_then(interpret);

        match &result {
            Ok(_) => debug!(
                "{} {} -> {} in {}ms",
                method,
                path,
                status.unwrap_or_default(),
                elapsed_ms
            ),
            Err(e) => warn!("{} {} failed after {}ms: {}", method, path, elapsed_ms, e),
        }

        let outcome = match &result {
            Err(e) if e.status().is_none() => RequestOutcome::Failed {
                kind: e.kind(),
                message: e.message(),
            },
            _ => RequestOutcome::Response {
                status: status.unwrap_or_default(),
            },
        };
        self.request_logger.log(RequestEvent {
            method,
            path,
            outcome,
            elapsed_ms,
            deduplicated,
        });

        result
    }

    fn prepare(&self, request: ApiRequest) -> OutboundRequest {
        let url = request.url(&self.base_url);

        let mut headers = RequestHeaders::new();
        headers.set("Content-Type", request.body.content_type());
        if !request.body.is_form() {
            headers.set("Accept-Encoding", ACCEPT_ENCODING);
        }
        if let Some(token) = self.tokens.current() {
            headers.set("Authorization", token.bearer());
        }
        headers.merge(&request.headers);

        OutboundRequest {
            method: request.method,
            url,
            headers: headers.into_vec(),
            body: request.body.into_bytes(),
        }
    }

    /// Race the transport against a freshly armed timeout. The timer is
    /// disposed when this returns, whichever side won.
    async fn dispatch(&self, request: OutboundRequest) -> Result<TransportResponse, ApiError> {
        let timeout = self.timeout.arm();
        let signal = timeout.signal();

        tokio::select! {
            biased;
            response = self.transport.send(request) => {
                response.map_err(|e| match e {
                    TransportError::InvalidRequest(message) => ApiError::invalid_request(message),
                    other => ApiError::network(other.to_string()),
                })
            }
            _ = signal.cancelled() => Err(ApiError::Timeout),
        }
    }
}

fn interpret(response: TransportResponse) -> Result<Value, ApiError> {
    if !response.is_success() {
        return Err(normalize(response.status, &response.body));
    }
    if !response.is_json() || !response.has_body() {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(&response.body)
        .map_err(|e| ApiError::decode(format!("Invalid JSON response: {}", e)))
}
