//! The abstract response capability.

use async_trait::async_trait;
use http::{HeaderMap, StatusCode};
use serde_json::Value;

use crate::error::ResponseError;

/// Accessor contract for a single in-flight HTTP response.
///
/// Implementations are lazy: accessors may block on, and fail with, the
/// underlying transfer. The `throw_on_error` flag opts into raising
/// 3xx/4xx/5xx results as [`ResponseError`]s; with `false`, status-class
/// errors must not be raised and the available data is returned as-is.
/// Transport failures are the implementation's business and may surface
/// regardless of the flag.
#[async_trait]
pub trait Response: Send + Sync {
    /// HTTP status code of the response.
    ///
    /// Must not force evaluation of the body.
    fn status(&self) -> StatusCode;

    /// Response headers, one entry per received value.
    async fn headers(&self, throw_on_error: bool) -> Result<HeaderMap, ResponseError>;

    /// Raw response body.
    async fn text(&self, throw_on_error: bool) -> Result<String, ResponseError>;

    /// Response body decoded as JSON.
    async fn json(&self, throw_on_error: bool) -> Result<Value, ResponseError>;

    /// Cancel the underlying transfer.
    fn cancel(&self);

    /// Diagnostic info channel.
    ///
    /// `Some(key)` returns the value recorded under `key`; implementations
    /// may answer `Value::Null` for keys they do not track. `None` returns
    /// the full mapping as a `Value::Object`.
    async fn info(&self, key: Option<&str>) -> Result<Value, ResponseError>;
}
