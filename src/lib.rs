//! curly - a convenience wrapper around a blocking HTTP client
//!
//! This crate wraps reqwest's blocking client with curl-flavored
//! configuration: named transport options, per-client headers, cookie
//! files, proxy rotation on connection failure, manual redirect
//! following with a bounded cycle count, and file downloads.
//!
//! ```no_run
//! use curly::Request;
//!
//! # fn main() -> curly::Result<()> {
//! let mut request = Request::new();
//! request.set_header("Accept", "text/html");
//! let response = request.get("example.com")?;
//! println!("{}", response.body_str()?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod utils;

pub use config::{HttpMethod, Proxy, TransportOption};
pub use error::{CurlyError, Result};
pub use http::{Request, Response};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
