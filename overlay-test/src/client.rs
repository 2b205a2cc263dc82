//! Scripted client double.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures::stream;
use http::Method;
use overlay_core::{Client, ClientError, RequestOptions};

use crate::response::StubResponse;

/// A request observed by a [`StubClient`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request method.
    pub method: Method,
    /// Request URL.
    pub url: String,
    /// Options passed alongside the request.
    pub options: RequestOptions,
}

/// A scripted [`Client`] that pops canned responses off a queue and records
/// everything it is asked to do.
///
/// Clones — including the siblings produced by [`Client::with_options`] —
/// share the response queue and the request/options logs, so a test can
/// assert against whichever handle it kept.
#[derive(Debug, Clone, Default)]
pub struct StubClient {
    responses: Arc<Mutex<VecDeque<StubResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    applied_options: Arc<Mutex<Vec<RequestOptions>>>,
    failure: Option<String>,
}

impl StubClient {
    /// Client with an empty response queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Client scripted with the given responses, served in order.
    pub fn with_responses(responses: impl IntoIterator<Item = StubResponse>) -> Self {
        let client = Self::new();
        client.responses.lock().unwrap().extend(responses);
        client
    }

    /// Client whose every request fails with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Enqueue another scripted response.
    pub fn push(&self, response: StubResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Every request observed so far, across all clones.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Every option bag passed to [`Client::with_options`], across all
    /// clones.
    pub fn applied_options(&self) -> Vec<RequestOptions> {
        self.applied_options.lock().unwrap().clone()
    }
}

#[async_trait]
impl Client for StubClient {
    type Response = StubResponse;
    type ResponseStream = stream::Iter<std::vec::IntoIter<StubResponse>>;

    async fn request(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<StubResponse, ClientError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            url: url.to_owned(),
            options,
        });
        if let Some(message) = &self.failure {
            return Err(ClientError::Other(message.clone().into()));
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ClientError::Other("no scripted response left".into()))
    }

    fn stream(
        &self,
        responses: Vec<StubResponse>,
        _timeout: Option<Duration>,
    ) -> Self::ResponseStream {
        stream::iter(responses)
    }

    fn with_options(&self, options: RequestOptions) -> Result<Self, ClientError> {
        self.applied_options.lock().unwrap().push(options);
        Ok(self.clone())
    }
}
