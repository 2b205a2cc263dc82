//! Decorating client that wraps responses with a fixed header override set.

use std::time::Duration;

use async_trait::async_trait;
use http::header::{AGE, CACHE_CONTROL, ETAG, EXPIRES, PRAGMA};
use http::{HeaderValue, Method};
use overlay_core::{Client, ClientError, Clock, RequestOptions};
use tracing::debug;

use crate::headers::HeaderOverrides;
use crate::response::OverlayResponse;

/// Sentinel entity tag pinned by [`OverlayClient::cache_expires_in`].
pub const STATIC_ETAG: &str = "always-same-etag";

/// IMF-fixdate layout for the `expires` header.
const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// An HTTP client decorator that applies a fixed set of header overrides to
/// every response it returns.
///
/// Requests delegate to the inner client untouched; the returned response is
/// wrapped in an [`OverlayResponse`] carrying the client's override set.
/// Streamed reads are explicitly not enriched: overrides configured here do
/// not apply to [`Client::stream`].
#[derive(Debug, Clone)]
pub struct OverlayClient<C> {
    inner: C,
    overrides: HeaderOverrides,
}

impl<C> OverlayClient<C> {
    /// Decorate `inner` with the given header override set.
    pub fn new(inner: C, overrides: HeaderOverrides) -> Self {
        Self { inner, overrides }
    }

    /// Decorate `inner` with a canned cache-control profile.
    ///
    /// The profile pins `etag` to [`STATIC_ETAG`], sets
    /// `cache-control: public, max-age=<max_age>` and `age: 0`, computes
    /// `expires` as `clock.now() + max_age` seconds in IMF-fixdate format,
    /// and strips `pragma`.
    pub fn cache_expires_in(max_age: u32, inner: C, clock: &dyn Clock) -> Self {
        let expires = clock.now() + chrono::Duration::seconds(i64::from(max_age));
        let cache_control = HeaderValue::from_str(&format!("public, max-age={max_age}"))
            .expect("max-age directive is valid ASCII");
        let expires = HeaderValue::from_str(&expires.format(HTTP_DATE).to_string())
            .expect("IMF-fixdate is valid ASCII");

        let overrides = HeaderOverrides::new()
            .set(ETAG, HeaderValue::from_static(STATIC_ETAG))
            .set(CACHE_CONTROL, cache_control)
            .set(AGE, HeaderValue::from_static("0"))
            .set(EXPIRES, expires)
            .unset(PRAGMA);

        Self::new(inner, overrides)
    }

    /// The configured override set.
    pub fn overrides(&self) -> &HeaderOverrides {
        &self.overrides
    }
}

#[async_trait]
impl<C> Client for OverlayClient<C>
where
    C: Client,
{
    type Response = OverlayResponse<C::Response>;
    type ResponseStream = C::ResponseStream;

    async fn request(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<Self::Response, ClientError> {
        debug!(method = %method, url, options = ?options, "HTTP request sent");

        let response = self.inner.request(method, url, options).await?;
        Ok(OverlayResponse::builder(response)
            .headers(self.overrides.clone())
            .build())
    }

    fn stream(
        &self,
        responses: Vec<Self::Response>,
        timeout: Option<Duration>,
    ) -> Self::ResponseStream {
        // Streamed reads bypass the overlay entirely.
        let responses = responses
            .into_iter()
            .map(OverlayResponse::into_inner)
            .collect();
        self.inner.stream(responses, timeout)
    }

    fn with_options(&self, options: RequestOptions) -> Result<Self, ClientError> {
        Ok(Self {
            inner: self.inner.with_options(options)?,
            overrides: self.overrides.clone(),
        })
    }
}
