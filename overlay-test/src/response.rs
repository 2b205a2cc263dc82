//! Canned response double.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use overlay_core::{Response, ResponseError};
use serde_json::{Map, Value, json};

/// A canned [`Response`] with configurable failure behavior.
///
/// Clones share the cancellation counter, so a test can keep a handle to a
/// response it queued into a client and assert on it afterwards.
///
/// - a configured transport failure surfaces on every header/body read,
///   regardless of `throw_on_error`;
/// - 3xx/4xx/5xx statuses surface as their error kind only when
///   `throw_on_error` is set.
#[derive(Debug, Clone)]
pub struct StubResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
    debug: String,
    info: Map<String, Value>,
    raw_info: Option<Value>,
    transport_failure: Option<String>,
    cancellations: Arc<AtomicUsize>,
}

impl StubResponse {
    /// Start building a stub; defaults to an empty `200 OK`.
    pub fn builder() -> StubResponseBuilder {
        StubResponseBuilder::default()
    }

    /// How many times [`Response::cancel`] was called on this stub or any
    /// of its clones.
    pub fn cancellations(&self) -> usize {
        self.cancellations.load(Ordering::SeqCst)
    }

    fn guard(&self, throw_on_error: bool) -> Result<(), ResponseError> {
        if let Some(message) = &self.transport_failure {
            return Err(ResponseError::Transport(message.clone().into()));
        }
        if throw_on_error
            && let Some(error) = ResponseError::from_status(self.status)
        {
            return Err(error);
        }
        Ok(())
    }

    fn full_info(&self) -> Map<String, Value> {
        let mut info = Map::new();
        info.insert("http_code".into(), json!(self.status.as_u16()));
        info.insert(
            "response_headers".into(),
            Value::Array(
                self.headers
                    .iter()
                    .map(|(name, value)| {
                        json!(format!(
                            "{name}: {}",
                            String::from_utf8_lossy(value.as_bytes())
                        ))
                    })
                    .collect(),
            ),
        );
        info.insert("debug".into(), json!(self.debug));
        for (key, value) in &self.info {
            info.insert(key.clone(), value.clone());
        }
        info
    }
}

#[async_trait]
impl Response for StubResponse {
    fn status(&self) -> StatusCode {
        self.status
    }

    async fn headers(&self, throw_on_error: bool) -> Result<HeaderMap, ResponseError> {
        self.guard(throw_on_error)?;
        Ok(self.headers.clone())
    }

    async fn text(&self, throw_on_error: bool) -> Result<String, ResponseError> {
        self.guard(throw_on_error)?;
        Ok(self.body.clone())
    }

    async fn json(&self, throw_on_error: bool) -> Result<Value, ResponseError> {
        let body = self.text(throw_on_error).await?;
        serde_json::from_str(&body).map_err(|error| ResponseError::Decoding(Box::new(error)))
    }

    fn cancel(&self) {
        self.cancellations.fetch_add(1, Ordering::SeqCst);
    }

    async fn info(&self, key: Option<&str>) -> Result<Value, ResponseError> {
        if let Some(raw) = &self.raw_info {
            return Ok(match key {
                Some(key) => raw.get(key).cloned().unwrap_or(Value::Null),
                None => raw.clone(),
            });
        }
        let full = self.full_info();
        Ok(match key {
            Some(key) => full.get(key).cloned().unwrap_or(Value::Null),
            None => Value::Object(full),
        })
    }
}

/// Builder for [`StubResponse`].
#[derive(Debug)]
pub struct StubResponseBuilder {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
    debug: String,
    info: Map<String, Value>,
    raw_info: Option<Value>,
    transport_failure: Option<String>,
}

impl Default for StubResponseBuilder {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: String::new(),
            debug: String::new(),
            info: Map::new(),
            raw_info: None,
            transport_failure: None,
        }
    }
}

impl StubResponseBuilder {
    /// Response status code.
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Append a header value (call repeatedly for multi-value names).
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Raw response body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Transfer trace reported under the `debug` info key.
    pub fn debug(mut self, debug: impl Into<String>) -> Self {
        self.debug = debug.into();
        self
    }

    /// Record an extra info entry, overriding the defaults for that key.
    pub fn info(mut self, key: impl Into<String>, value: Value) -> Self {
        self.info.insert(key.into(), value);
        self
    }

    /// Replace the entire info channel with a raw value, defaults included.
    pub fn raw_info(mut self, value: Value) -> Self {
        self.raw_info = Some(value);
        self
    }

    /// Fail every header/body read with a transport error.
    pub fn transport_failure(mut self, message: impl Into<String>) -> Self {
        self.transport_failure = Some(message.into());
        self
    }

    /// Finish the stub.
    pub fn build(self) -> StubResponse {
        StubResponse {
            status: self.status,
            headers: self.headers,
            body: self.body,
            debug: self.debug,
            info: self.info,
            raw_info: self.raw_info,
            transport_failure: self.transport_failure,
            cancellations: Arc::new(AtomicUsize::new(0)),
        }
    }
}
