use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderName},
    Method, Request, StatusCode, Url,
};

use crate::{
    client::Client,
    result::Result,
    transport::{Reply, Transport},
};

/// What a [`RecordingTransport`] saw for one request.
#[derive(Debug, Clone)]
pub(crate) struct Sent {
    pub(crate) method: Method,
    pub(crate) url: Url,
    pub(crate) headers: HeaderMap,
    pub(crate) has_body: bool,
}

impl Sent {
    pub(crate) fn header(&self, name: HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Decoded query pairs, in the order they were sent.
    pub(crate) fn query(&self) -> Vec<(String, String)> {
        self.url.query_pairs().into_owned().collect()
    }
}

/// Transport that records every request and answers with a fixed status.
#[derive(Debug)]
pub(crate) struct RecordingTransport {
    status: StatusCode,
    sent: Mutex<Vec<Sent>>,
}

impl RecordingTransport {
    pub(crate) fn new() -> Arc<Self> {
        Self::with_status(StatusCode::OK)
    }

    pub(crate) fn with_status(status: StatusCode) -> Arc<Self> {
        Arc::new(RecordingTransport {
            status,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// The only request sent so far.
    ///
    /// # Panic
    ///
    /// Panics unless exactly one request was recorded.
    pub(crate) fn single(&self) -> Sent {
        let sent = self.sent();
        assert_eq!(sent.len(), 1, "expected exactly one request, got {sent:?}");
        sent[0].clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, request: Request) -> Result<Reply> {
        let url = request.url().clone();
        self.sent.lock().unwrap().push(Sent {
            method: request.method().clone(),
            url: url.clone(),
            headers: request.headers().clone(),
            has_body: request.body().is_some(),
        });
        Ok(Reply::new(self.status, url, HeaderMap::new(), b"[]".to_vec()))
    }
}

/// A client with no request spacing that sends through `transport`.
pub(crate) fn client_with(transport: &Arc<RecordingTransport>, force_get: bool) -> Client {
    let transport: Arc<dyn Transport> = Arc::clone(transport) as Arc<dyn Transport>;
    Client::builder("dot621-tests/1.0")
        .min_interval(Duration::ZERO)
        .force_get_when_unauthenticated(force_get)
        .transport(transport)
        .build()
        .unwrap()
}

/// Shorthand for comparing against [`Sent::query`].
pub(crate) fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}
