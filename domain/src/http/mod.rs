//! HTTP request and response value objects.
//!
//! - [`method::HttpMethod`]: the methods the client issues
//! - [`request::ApiRequest`]: a caller's call, relative to the base URL
//! - [`request::OutboundRequest`]: a prepared call handed to the transport
//! - [`request::DedupKey`]: groups identical concurrent GETs
//! - [`headers::RequestHeaders`]: case-insensitive header set
//! - [`response::TransportResponse`]: a fully read response

pub mod headers;
pub mod method;
pub mod request;
pub mod response;
