use std::{sync::Arc, time::Duration};

use crate::{
    config::Config,
    dispatch::Dispatcher,
    error::Error,
    request::Model,
    resources::{notes::Notes, pools::Pools, posts::Posts, tag_aliases::TagAliases, tags::Tags},
    result::Result,
    session::{Credentials, Session},
    transport::Transport,
};
use reqwest::{Client as ReqwestClient, Url};

/// Entry point to the API.
///
/// Owns the [`Session`] and hands out the resource clients, which all
/// share it. Cloning a `Client` is cheap and shares the session too, so
/// every clone observes [`login`](Client::login) and
/// [`logout`](Client::logout) and goes through the same rate limiter.
#[derive(Debug, Clone)]
pub struct Client {
    session: Arc<Session>,
    notes: Notes,
    pools: Pools,
    posts: Posts,
    tag_aliases: TagAliases,
    tags: Tags,
}

impl Client {
    /// A client with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client could not be set up.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn new(user_agent: impl Into<String>) -> Result<Client> {
        Self::builder(user_agent).build()
    }

    pub fn builder(user_agent: impl Into<String>) -> ClientBuilder {
        ClientBuilder::from_config(Config::new(user_agent))
    }

    /// Builds a client from a deserialized [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the configuration is inconsistent
    /// (half a credential pair, zero concurrency, unusable base URL).
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn from_config(config: Config) -> Result<Client> {
        ClientBuilder::from_config(config).build()
    }

    fn from_session(session: Arc<Session>) -> Client {
        let model = Model::new(Arc::clone(&session));
        Client {
            notes: Notes::new(model.clone()),
            pools: Pools::new(model.clone()),
            posts: Posts::new(model.clone()),
            tag_aliases: TagAliases::new(model.clone()),
            tags: Tags::new(model),
            session,
        }
    }

    /// Stores a new credential pair, replacing both halves at once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if either half is empty; the
    /// previous credentials are kept in that case.
    pub fn login(&self, username: impl Into<String>, api_key: impl Into<String>) -> Result<()> {
        let credentials = Credentials::new(username, api_key)?;
        log::info!("logged in as {}", credentials.username());
        self.session.set_credentials(Some(credentials));
        Ok(())
    }

    /// Forgets the credential pair.
    pub fn logout(&self) {
        log::info!("logged out");
        self.session.set_credentials(None);
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        self.session.dispatcher()
    }

    /// The raw request builder, for endpoints the resource clients don't cover.
    pub fn model(&self) -> Model {
        Model::new(Arc::clone(&self.session))
    }

    pub fn notes(&self) -> &Notes {
        &self.notes
    }

    pub fn pools(&self) -> &Pools {
        &self.pools
    }

    pub fn posts(&self) -> &Posts {
        &self.posts
    }

    pub fn tag_aliases(&self) -> &TagAliases {
        &self.tag_aliases
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }
}

/// Configures and builds a [`Client`].
///
/// ```no_run
/// # async fn run() -> dot621::result::Result<()> {
/// use std::time::Duration;
///
/// let client = dot621::Client::builder("my-tool/1.0 (by someone)")
///     .min_interval(Duration::from_millis(500))
///     .credentials("someone", "api-key")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ClientBuilder {
    config: Config,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    pub fn from_config(config: Config) -> Self {
        ClientBuilder {
            config,
            transport: None,
        }
    }

    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn min_interval(mut self, min_interval: Duration) -> Self {
        self.config.min_interval = min_interval;
        self
    }

    #[must_use]
    pub fn max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.config.max_concurrent = max_concurrent;
        self
    }

    #[must_use]
    pub fn force_get_when_unauthenticated(mut self, force: bool) -> Self {
        self.config.force_get_when_unauthenticated = force;
        self
    }

    #[must_use]
    pub fn credentials(mut self, username: impl Into<String>, api_key: impl Into<String>) -> Self {
        self.config.username = Some(username.into());
        self.config.api_key = Some(api_key.into());
        self
    }

    /// Sends requests through `transport` instead of a fresh [`reqwest::Client`].
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Validates the settings, spawns the dispatcher and builds the client.
    ///
    /// # Errors
    ///
    /// See [`Client::from_config`]. Also fails if the HTTP client cannot be
    /// constructed.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn build(self) -> Result<Client> {
        let config = self.config;

        let base_url = parse_base_url(&config.base_url)?;
        let credentials = Credentials::from_parts(config.username, config.api_key)?;
        let dispatcher = Dispatcher::new(config.min_interval, config.max_concurrent)?;

        let http = ReqwestClient::builder().build()?;
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(http.clone()) as Arc<dyn Transport>);

        log::debug!(
            "client for {} ready: {:?} between requests, {} in flight",
            base_url,
            config.min_interval,
            config.max_concurrent
        );

        let session = Session::new(
            config.user_agent,
            base_url,
            config.force_get_when_unauthenticated,
            credentials,
            dispatcher,
            http,
            transport,
        );
        Ok(Client::from_session(Arc::new(session)))
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url =
        Url::parse(raw).map_err(|e| Error::invalid(format!("invalid base url {raw:?}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(Error::invalid(format!("{raw:?} cannot be used as a base url")));
    }
    // relative paths join onto the last segment otherwise
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
