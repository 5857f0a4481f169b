//! HTTP client module
//!
//! This module provides the request/response pair that callers interact
//! with, plus the transport adapter that drives the blocking engine.

pub mod request;
pub mod response;
mod transport;

pub use request::Request;
pub use response::Response;
