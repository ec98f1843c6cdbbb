use reqwest::StatusCode;
use thiserror::Error;

use crate::transport::Reply;

#[derive(Debug, Error)]
pub enum Error {
    /// A write-class action was attempted without a complete credential pair.
    #[error("must be logged in to {0}")]
    NotAuthenticated(&'static str),

    /// A caller-supplied argument broke one of the documented invariants.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("{0}")]
    Reqwest(#[from] reqwest::Error),

    /// The server answered outside the 2xx range. Holds the whole reply;
    /// the body usually carries a `reason`.
    #[error("unexpected status code {}", .0.status())]
    UnexpectedStatus(Box<Reply>),

    #[error("the dispatcher is closed or the scheduled call was lost")]
    DispatcherClosed,

    #[error("{}", _0)]
    Json(#[from] serde_json::Error),

    #[error("{}", _0)]
    IO(#[from] std::io::Error),
}

impl Error {
    /// Returns true for failures surfaced by the HTTP layer
    /// (network errors and non-2xx statuses).
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Reqwest(_) | Error::UnexpectedStatus(_))
    }

    /// Status of a non-2xx reply.
    pub fn status(&self) -> Option<StatusCode> {
        self.reply().map(Reply::status)
    }

    /// The reply behind an [`Error::UnexpectedStatus`], body included.
    pub fn reply(&self) -> Option<&Reply> {
        match self {
            Error::UnexpectedStatus(reply) => Some(reply.as_ref()),
            _ => None,
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidParameter(msg.into())
    }
}
