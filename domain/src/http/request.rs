//! Request value objects
//!
//! [`ApiRequest`] is what callers hand to the client: a method, a path
//! relative to the base URL, a body and optional extra headers.
//! [`OutboundRequest`] is what the client hands to the transport once the
//! URL is resolved and headers are computed.

use super::method::HttpMethod;
use crate::core::error::ApiError;
use serde::Serialize;
use std::fmt;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Encoded request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    /// Serialized JSON text
    Json(String),
    /// `application/x-www-form-urlencoded` text
    Form(String),
}

impl RequestBody {
    pub fn json<B: Serialize + ?Sized>(body: &B) -> Result<Self, ApiError> {
        serde_json::to_string(body)
            .map(RequestBody::Json)
            .map_err(|e| ApiError::invalid_request(format!("Failed to encode JSON body: {}", e)))
    }

    pub fn form(fields: &[(&str, &str)]) -> Result<Self, ApiError> {
        serde_urlencoded::to_string(fields)
            .map(RequestBody::Form)
            .map_err(|e| ApiError::invalid_request(format!("Failed to encode form body: {}", e)))
    }

    pub fn is_form(&self) -> bool {
        matches!(self, RequestBody::Form(_))
    }

    /// Content type sent with this body. Empty bodies still declare JSON.
    pub fn content_type(&self) -> &'static str {
        match self {
            RequestBody::Form(_) => CONTENT_TYPE_FORM,
            RequestBody::Empty | RequestBody::Json(_) => CONTENT_TYPE_JSON,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RequestBody::Empty => "",
            RequestBody::Json(text) | RequestBody::Form(text) => text,
        }
    }

    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            RequestBody::Empty => None,
            RequestBody::Json(text) | RequestBody::Form(text) => Some(text.into_bytes()),
        }
    }
}

/// Key grouping identical concurrent requests: `METHOD:path:body`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey(String);

impl DedupKey {
    pub fn new(method: HttpMethod, path: &str, body: &RequestBody) -> Self {
        Self(format!("{}:{}:{}", method, path, body.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DedupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A call as issued by a caller of the API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: RequestBody,
    /// Caller headers; they override computed headers of the same name.
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>, body: RequestBody) -> Self {
        Self {
            method,
            path: path.into(),
            body,
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path, RequestBody::Empty)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path, RequestBody::Empty)
    }

    pub fn post_json<B: Serialize + ?Sized>(
        path: impl Into<String>,
        body: &B,
    ) -> Result<Self, ApiError> {
        Ok(Self::new(HttpMethod::Post, path, RequestBody::json(body)?))
    }

    pub fn put_json<B: Serialize + ?Sized>(
        path: impl Into<String>,
        body: &B,
    ) -> Result<Self, ApiError> {
        Ok(Self::new(HttpMethod::Put, path, RequestBody::json(body)?))
    }

    pub fn post_form(path: impl Into<String>, fields: &[(&str, &str)]) -> Result<Self, ApiError> {
        Ok(Self::new(HttpMethod::Post, path, RequestBody::form(fields)?))
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Whether this call goes through the deduplicator.
    ///
    /// The key ignores headers, so a call carrying its own `Authorization`
    /// never joins one made with the stored token.
    pub fn is_deduplicated(&self) -> bool {
        self.method.is_deduplicated() && !self.overrides_authorization()
    }

    fn overrides_authorization(&self) -> bool {
        self.headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case("authorization"))
    }

    pub fn dedup_key(&self) -> DedupKey {
        DedupKey::new(self.method, &self.path, &self.body)
    }

    /// Resolve the path against a base URL.
    ///
    /// A trailing slash on the base and a missing leading slash on the path
    /// are both tolerated.
    pub fn url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        if self.path.starts_with('/') {
            format!("{}{}", base, self.path)
        } else {
            format!("{}/{}", base, self.path)
        }
    }
}

/// A fully prepared call handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl OutboundRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dedup_key_format() {
        let get = ApiRequest::get("/scenarios");
        assert_eq!(get.dedup_key().as_str(), "GET:/scenarios:");

        let post = ApiRequest::post_json("/scenarios/simulate", &json!({"a": 1})).unwrap();
        assert_eq!(post.dedup_key().as_str(), "POST:/scenarios/simulate:{\"a\":1}");
    }

    #[test]
    fn test_dedup_key_differs_by_method() {
        let get = ApiRequest::get("/llm/config");
        let delete = ApiRequest::delete("/llm/config");
        assert_ne!(get.dedup_key(), delete.dedup_key());
    }

    #[test]
    fn test_form_body_is_urlencoded() {
        let request =
            ApiRequest::post_form("/auth/login", &[("username", "a@b.co"), ("password", "p w&")])
                .unwrap();
        assert_eq!(request.body.as_str(), "username=a%40b.co&password=p+w%26");
        assert_eq!(request.body.content_type(), CONTENT_TYPE_FORM);
        assert!(!request.is_deduplicated());
    }

    #[test]
    fn test_get_with_own_authorization_is_not_deduplicated() {
        assert!(ApiRequest::get("/startup/me").is_deduplicated());
        assert!(
            !ApiRequest::get("/startup/me")
                .with_header("authorization", "Bearer fresh")
                .is_deduplicated()
        );
        assert!(
            ApiRequest::get("/startup/me")
                .with_header("X-Trace", "1")
                .is_deduplicated()
        );
    }

    #[test]
    fn test_empty_body_declares_json() {
        assert_eq!(RequestBody::Empty.content_type(), CONTENT_TYPE_JSON);
        assert_eq!(RequestBody::Empty.into_bytes(), None);
    }

    #[test]
    fn test_url_joining() {
        let request = ApiRequest::get("/auth/login");
        assert_eq!(
            request.url("http://127.0.0.1:8000/api/v1"),
            "http://127.0.0.1:8000/api/v1/auth/login"
        );
        assert_eq!(
            request.url("http://127.0.0.1:8000/api/v1/"),
            "http://127.0.0.1:8000/api/v1/auth/login"
        );
        assert_eq!(
            ApiRequest::get("profile").url("https://api.example.com"),
            "https://api.example.com/profile"
        );
    }

    #[test]
    fn test_outbound_header_lookup() {
        let outbound = OutboundRequest {
            method: HttpMethod::Get,
            url: "http://x/profile".to_string(),
            headers: vec![("Authorization".to_string(), "Bearer abc".to_string())],
            body: None,
        };
        assert_eq!(outbound.header("authorization"), Some("Bearer abc"));
        assert_eq!(outbound.header("content-type"), None);
    }
}
