#![warn(missing_docs)]
//! # overlay
//!
//! Response decoration layer for HTTP clients.
//!
//! [`OverlayClient`] wraps any [`Client`] implementation and hands out
//! responses wrapped in [`OverlayResponse`], which merges a caller-supplied
//! set of overrides — status code, headers, body — with the underlying
//! response's data on every read. The transport underneath is never touched:
//! requests delegate verbatim, errors propagate unchanged, and streamed
//! reads bypass the decoration entirely.
//!
//! ## Example
//!
//! ```ignore
//! use http::header::{HeaderName, HeaderValue, SERVER};
//! use overlay::{HeaderOverrides, OverlayClient};
//!
//! let overrides = HeaderOverrides::new()
//!     .set(
//!         HeaderName::from_static("x-powered-by"),
//!         HeaderValue::from_static("nothing"),
//!     )
//!     .unset(SERVER);
//! let client = OverlayClient::new(transport, overrides);
//! ```

mod client;
mod headers;
mod response;

pub use client::{OverlayClient, STATIC_ETAG};
pub use headers::HeaderOverrides;
pub use response::{OverlayResponse, OverlayResponseBuilder};

// Re-export the capability seams for convenience
pub use overlay_core::{
    Client, ClientError, Clock, RequestOptions, Response, ResponseError, SystemClock,
};
