use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use reqwest::{Client as ReqwestClient, Url};

use crate::{dispatch::Dispatcher, error::Error, result::Result, transport::Transport};

/// A complete `username` + `api_key` pair.
///
/// Both halves are always present and non-empty, so holding a
/// `Credentials` value means the session is able to authenticate.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    api_key: String,
}

impl Credentials {
    /// Builds a credential pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if either half is empty.
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let api_key = api_key.into();
        if username.is_empty() || api_key.is_empty() {
            return Err(Error::invalid(
                "both username and api_key must be provided and non-empty",
            ));
        }
        Ok(Credentials { username, api_key })
    }

    /// Builds a pair from two optional halves: both or neither.
    pub(crate) fn from_parts(
        username: Option<String>,
        api_key: Option<String>,
    ) -> Result<Option<Self>> {
        match (username, api_key) {
            (Some(username), Some(api_key)) => Credentials::new(username, api_key).map(Some),
            (None, None) => Ok(None),
            _ => Err(Error::invalid(
                "username and api_key must be supplied together",
            )),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Identity and plumbing shared by every resource client.
///
/// A `Session` lives behind an [`Arc`] owned by [`Client`](crate::Client);
/// resource clients hold clones of that `Arc`, so a login or logout is seen
/// by all of them immediately.
#[derive(Debug)]
pub struct Session {
    user_agent: String,
    base_url: Url,
    force_get_when_unauthenticated: bool,
    credentials: RwLock<Option<Credentials>>,
    dispatcher: Dispatcher,
    http: ReqwestClient,
    transport: Arc<dyn Transport>,
}

impl Session {
    pub(crate) fn new(
        user_agent: String,
        base_url: Url,
        force_get_when_unauthenticated: bool,
        credentials: Option<Credentials>,
        dispatcher: Dispatcher,
        http: ReqwestClient,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Session {
            user_agent,
            base_url,
            force_get_when_unauthenticated,
            credentials: RwLock::new(credentials),
            dispatcher,
            http,
            transport,
        }
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether unauthenticated requests are downgraded to `GET`.
    pub fn force_get_when_unauthenticated(&self) -> bool {
        self.force_get_when_unauthenticated
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub(crate) fn http(&self) -> &ReqwestClient {
        &self.http
    }

    pub(crate) fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// A snapshot of the current credential pair.
    pub fn credentials(&self) -> Option<Credentials> {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Replaces both halves of the credential pair at once.
    pub(crate) fn set_credentials(&self, credentials: Option<Credentials>) {
        let mut slot = self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = credentials;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_halves_are_rejected() {
        assert!(Credentials::new("", "key").is_err());
        assert!(Credentials::new("user", "").is_err());
        assert!(Credentials::new("user", "key").is_ok());
    }

    #[test]
    fn partial_pairs_are_rejected() {
        assert!(Credentials::from_parts(Some("u".into()), None).is_err());
        assert!(Credentials::from_parts(None, Some("k".into())).is_err());
        assert_eq!(Credentials::from_parts(None, None).unwrap(), None);
        let pair = Credentials::from_parts(Some("u".into()), Some("k".into()));
        let pair = pair.unwrap().unwrap();
        assert_eq!(pair.username(), "u");
        assert_eq!(pair.api_key(), "k");
    }

    #[test]
    fn debug_hides_api_key() {
        let pair = Credentials::new("someone", "hunter2").unwrap();
        let printed = format!("{pair:?}");
        assert!(printed.contains("someone"));
        assert!(!printed.contains("hunter2"));
    }
}
