//! The abstract client capability.

use std::time::Duration;

use async_trait::async_trait;
use http::Method;

use crate::error::ClientError;
use crate::response::Response;

/// Opaque per-request option bag, interpreted by the transport.
pub type RequestOptions = serde_json::Map<String, serde_json::Value>;

/// Contract for an HTTP client a decorator can sit on top of.
#[async_trait]
pub trait Client: Send + Sync {
    /// Response type produced by this client.
    type Response: Response;

    /// Stream type returned by [`Client::stream`].
    ///
    /// Opaque to decorators; chunked reads are forwarded without
    /// modification.
    type ResponseStream;

    /// Dispatch a request and return its (possibly still in-flight)
    /// response.
    async fn request(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<Self::Response, ClientError>;

    /// Read the given responses as a chunked stream.
    fn stream(
        &self,
        responses: Vec<Self::Response>,
        timeout: Option<Duration>,
    ) -> Self::ResponseStream;

    /// Produce a sibling client with `options` folded into its base
    /// configuration.
    ///
    /// `self` is left untouched; how the options merge is the
    /// implementation's business.
    fn with_options(&self, options: RequestOptions) -> Result<Self, ClientError>
    where
        Self: Sized;
}
