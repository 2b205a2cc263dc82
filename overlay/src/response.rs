//! Proxy response that applies overrides on every read.

use async_trait::async_trait;
use http::{HeaderMap, StatusCode};
use overlay_core::{Response, ResponseError};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::headers::HeaderOverrides;

/// Marker prefix appended to the `debug` info channel.
const MODIFICATION_MARKER: &str = "* Modified response after reception: ";

/// A response wrapper that overrides status, headers, and body on read.
///
/// The wrapped response stays the source of truth for everything not
/// overridden, including its failure behavior. Overrides are fixed at
/// construction; a different configuration needs a new wrapper.
#[derive(Debug)]
pub struct OverlayResponse<R> {
    inner: R,
    status: Option<StatusCode>,
    overrides: HeaderOverrides,
    body: Option<String>,
}

impl<R> OverlayResponse<R> {
    /// Wrap `inner` without any overrides.
    pub fn new(inner: R) -> Self {
        Self::builder(inner).build()
    }

    /// Start building a wrapper around `inner`.
    pub fn builder(inner: R) -> OverlayResponseBuilder<R> {
        OverlayResponseBuilder {
            inner,
            status: None,
            overrides: HeaderOverrides::new(),
            body: None,
        }
    }

    /// Unwrap the underlying response, discarding the overrides.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// Override fields as they appear in the modification marker.
#[derive(Serialize)]
struct Modifications<'a> {
    #[serde(rename = "status-code")]
    status_code: Option<u16>,
    headers: &'a HeaderOverrides,
    content: Option<&'a str>,
}

impl<R> OverlayResponse<R>
where
    R: Response,
{
    /// Resolve a single info key, merging overrides with the inner channel.
    async fn keyed_info(&self, key: &str) -> Result<Value, ResponseError> {
        match key {
            "http_code" => match self.status {
                Some(status) => Ok(Value::from(status.as_u16())),
                None => self.inner.info(Some(key)).await,
            },
            "response_headers" => {
                let merged = self.headers(false).await?;
                let lines = merged
                    .iter()
                    .map(|(name, value)| {
                        Value::String(format!(
                            "{name}: {}",
                            String::from_utf8_lossy(value.as_bytes())
                        ))
                    })
                    .collect();
                Ok(Value::Array(lines))
            }
            "debug" => {
                let inner = match self.inner.info(Some(key)).await? {
                    Value::String(debug) => debug,
                    other => other.to_string(),
                };
                let modifications = serde_json::to_string(&Modifications {
                    status_code: self.status.map(|status| status.as_u16()),
                    headers: &self.overrides,
                    content: self.body.as_deref(),
                })
                .map_err(|error| ResponseError::Decoding(Box::new(error)))?;
                Ok(Value::String(format!(
                    "{inner}\r\n{MODIFICATION_MARKER}{modifications}\n"
                )))
            }
            _ => self.inner.info(Some(key)).await,
        }
    }
}

#[async_trait]
impl<R> Response for OverlayResponse<R>
where
    R: Response,
{
    fn status(&self) -> StatusCode {
        self.status.unwrap_or_else(|| self.inner.status())
    }

    async fn headers(&self, throw_on_error: bool) -> Result<HeaderMap, ResponseError> {
        let mut headers = self.inner.headers(throw_on_error).await?;
        self.overrides.apply(&mut headers);
        Ok(headers)
    }

    async fn text(&self, throw_on_error: bool) -> Result<String, ResponseError> {
        match &self.body {
            Some(body) => Ok(body.clone()),
            None => self.inner.text(throw_on_error).await,
        }
    }

    async fn json(&self, throw_on_error: bool) -> Result<Value, ResponseError> {
        match &self.body {
            Some(body) => {
                serde_json::from_str(body).map_err(|error| ResponseError::Decoding(Box::new(error)))
            }
            None => self.inner.json(throw_on_error).await,
        }
    }

    fn cancel(&self) {
        self.inner.cancel();
    }

    async fn info(&self, key: Option<&str>) -> Result<Value, ResponseError> {
        match key {
            Some(key) => self.keyed_info(key).await,
            None => {
                // Iterative merge over the inner key set; the keyed path
                // never re-enters this arm.
                let Value::Object(inner) = self.inner.info(None).await? else {
                    return Ok(Value::Object(Map::new()));
                };
                let mut merged = Map::with_capacity(inner.len());
                for key in inner.keys() {
                    merged.insert(key.clone(), self.keyed_info(key).await?);
                }
                Ok(Value::Object(merged))
            }
        }
    }
}

/// Builder for [`OverlayResponse`].
#[derive(Debug)]
pub struct OverlayResponseBuilder<R> {
    inner: R,
    status: Option<StatusCode>,
    overrides: HeaderOverrides,
    body: Option<String>,
}

impl<R> OverlayResponseBuilder<R> {
    /// Override the status code.
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Override headers with the given set.
    pub fn headers(mut self, overrides: HeaderOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Replace the raw body content.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Finish the wrapper.
    pub fn build(self) -> OverlayResponse<R> {
        OverlayResponse {
            inner: self.inner,
            status: self.status,
            overrides: self.overrides,
            body: self.body,
        }
    }
}
