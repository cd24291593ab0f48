//! Core domain concepts shared across all subdomains.
//!
//! - [`error::ApiError`]: the normalized error every request failure maps to

pub mod error;
