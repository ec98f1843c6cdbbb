use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::{header::HeaderMap, Client as ReqwestClient, Request, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::result::Result;

/// The HTTP layer a session sends its finished requests through.
///
/// [`reqwest::Client`] is the production implementation; anything else
/// (a recording fake, a proxying client) can be injected through
/// [`ClientBuilder::transport`](crate::client::ClientBuilder::transport).
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Sends `request` and collects the whole response.
    async fn execute(&self, request: Request) -> Result<Reply>;
}

#[async_trait]
impl Transport for ReqwestClient {
    async fn execute(&self, request: Request) -> Result<Reply> {
        let response = ReqwestClient::execute(self, request).await?;
        log::info!("response status: {}", response.status());

        let status = response.status();
        let url = response.url().clone();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(Reply {
            status,
            url,
            headers,
            body,
        })
    }
}

/// A response exactly as the server sent it.
///
/// The body is neither parsed nor validated; use [`Reply::json`] to decode
/// it into one of the [`models`](crate::models) or any other type.
#[derive(Debug, Clone)]
pub struct Reply {
    pub(crate) status: StatusCode,
    pub(crate) url: Url,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Vec<u8>,
}

impl Reply {
    /// Assembles a reply by hand, mostly useful for custom transports.
    pub fn new(status: StatusCode, url: Url, headers: HeaderMap, body: Vec<u8>) -> Self {
        Reply {
            status,
            url,
            headers,
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The URL the response was served from.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The body as UTF-8 text, with invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::error::Error::Json) if the body does not
    /// match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Into::into)
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Vote {
        up: i32,
        down: i32,
    }

    fn reply(body: &str) -> Reply {
        Reply::new(
            StatusCode::OK,
            Url::parse("https://e621.net/posts/1/votes.json").unwrap(),
            HeaderMap::new(),
            body.as_bytes().to_vec(),
        )
    }

    #[test]
    fn decodes_json_body() {
        let vote: Vote = reply(r#"{"up": 3, "down": -1}"#).json().unwrap();
        assert_eq!(vote, Vote { up: 3, down: -1 });
    }

    #[test]
    fn bad_json_is_not_a_transport_error() {
        let err = reply("<html>").json::<Vote>().unwrap_err();
        assert!(!err.is_transport());
    }

    #[test]
    fn text_is_lossy() {
        assert_eq!(reply("ok").text(), "ok");
    }
}
