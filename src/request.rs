use std::{borrow::Cow, fmt::Display, sync::Arc};

use reqwest::{
    header::USER_AGENT,
    multipart::{Form, Part},
    Method, Request, Url,
};

use crate::{error::Error, result::Result, session::Session, transport::Reply};

/// Serializes `parameters` as `key=value` pairs joined by `&`.
///
/// Pairs are emitted in iteration order and values are written verbatim:
/// nothing is sorted and nothing is percent-encoded, since the API accepts
/// raw spaces, slashes and brackets in its query strings.
///
/// ```
/// use dot621::request::build_query_string;
///
/// let query = build_query_string([("limit", "10"), ("search[name_matches]", "horse*")]);
/// assert_eq!(query, "limit=10&search[name_matches]=horse*");
/// ```
pub fn build_query_string<I, K, V>(parameters: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Display,
{
    parameters
        .into_iter()
        .map(|(key, value)| format!("{}={value}", key.as_ref()))
        .collect::<Vec<_>>()
        .join("&")
}

/// An ordered bag of query parameters.
///
/// Resource clients push only the keys a caller actually set; keys use the
/// API's bracket convention (`search[creator_id]`) and are opaque here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryArgs {
    pairs: Vec<(String, String)>,
}

impl QueryArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `key=value`.
    pub fn push(&mut self, key: impl Into<String>, value: impl Display) -> &mut Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    /// Appends `key=value` only when `value` is set.
    pub fn push_opt<V: Display>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// See [`build_query_string`].
    pub fn to_query_string(&self) -> String {
        build_query_string(self.iter())
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for QueryArgs {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut args = QueryArgs::new();
        for (key, value) in iter {
            args.push(key, value);
        }
        args
    }
}

/// A binary payload sent as `multipart/form-data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Multipart {
    field: String,
    file_name: String,
    bytes: Vec<u8>,
}

impl Multipart {
    pub fn new(field: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Multipart {
            field: field.into(),
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn into_form(self) -> Form {
        let part = Part::bytes(self.bytes).file_name(self.file_name);
        Form::new().part(self.field, part)
    }
}

/// Everything needed to issue one call: relative path, method, query and
/// an optional upload.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    path: String,
    method: Method,
    query: QueryArgs,
    multipart: Option<Multipart>,
    auth_action: Option<&'static str>,
}

impl RequestSpec {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        RequestSpec {
            path: path.into(),
            method,
            query: QueryArgs::new(),
            multipart: None,
            auth_action: None,
        }
    }

    /// Like [`RequestSpec::new`], taking the method by (case-insensitive) name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] unless `method` is one of
    /// `GET`, `POST`, `PUT`, `PATCH` or `DELETE`.
    pub fn with_method(method: &str, path: impl Into<String>) -> Result<Self> {
        Ok(Self::new(parse_method(method)?, path))
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    #[must_use]
    pub fn query(mut self, query: QueryArgs) -> Self {
        self.query = query;
        self
    }

    #[must_use]
    pub fn multipart(mut self, multipart: Multipart) -> Self {
        self.multipart = Some(multipart);
        self
    }

    /// Marks the call as write-class: it is refused before dispatch when the
    /// session holds no credentials. `action` names it in the error.
    #[must_use]
    pub fn requires_auth(mut self, action: &'static str) -> Self {
        self.auth_action = Some(action);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn query_args(&self) -> &QueryArgs {
        &self.query
    }

    pub fn multipart_payload(&self) -> Option<&Multipart> {
        self.multipart.as_ref()
    }
}

fn parse_method(method: &str) -> Result<Method> {
    match method.to_ascii_uppercase().as_str() {
        "GET" => Ok(Method::GET),
        "POST" => Ok(Method::POST),
        "PUT" => Ok(Method::PUT),
        "PATCH" => Ok(Method::PATCH),
        "DELETE" => Ok(Method::DELETE),
        other => Err(Error::invalid(format!("unsupported http method {other:?}"))),
    }
}

/// Percent-encodes tab, line feed and carriage return, which URL parsing
/// would otherwise strip. Everything else is left verbatim.
fn escape_controls(query: &str) -> Cow<'_, str> {
    if !query.contains(['\t', '\n', '\r']) {
        return Cow::Borrowed(query);
    }
    let mut escaped = String::with_capacity(query.len() + 8);
    for c in query.chars() {
        match c {
            '\t' => escaped.push_str("%09"),
            '\n' => escaped.push_str("%0A"),
            '\r' => escaped.push_str("%0D"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Turns [`RequestSpec`]s into authenticated, rate-limited calls.
///
/// Every resource client holds one of these; they all point at the same
/// [`Session`], so credential changes are seen everywhere at once.
#[derive(Debug, Clone)]
pub struct Model {
    session: Arc<Session>,
}

impl Model {
    pub(crate) fn new(session: Arc<Session>) -> Self {
        Model { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// True iff the session currently holds a full credential pair.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Fails with [`Error::NotAuthenticated`] when there are no credentials.
    pub fn require_auth(&self, action: &'static str) -> Result<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(Error::NotAuthenticated(action))
        }
    }

    /// Resolves the absolute URL `spec` will be sent to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the path cannot be joined onto
    /// the base URL or points at another host.
    pub fn resolve_url(&self, spec: &RequestSpec) -> Result<Url> {
        let base = self.session.base_url();
        // a leading slash would replace the base path
        let path = spec.path.trim_start_matches('/');
        let mut url = base
            .join(path)
            .map_err(|e| Error::invalid(format!("cannot resolve path {:?}: {e}", spec.path)))?;

        if url.scheme() != base.scheme() || url.host_str() != base.host_str() {
            return Err(Error::invalid(format!(
                "path {:?} must be relative to {base}",
                spec.path
            )));
        }

        if !spec.query.is_empty() {
            url.set_query(Some(&escape_controls(&spec.query.to_query_string())));
        }
        Ok(url)
    }

    fn prepare(&self, spec: RequestSpec) -> Result<Request> {
        // one snapshot decides both the auth check and the header
        let credentials = self.session.credentials();

        if let (Some(action), None) = (spec.auth_action, &credentials) {
            return Err(Error::NotAuthenticated(action));
        }

        let url = self.resolve_url(&spec)?;
        let method = if credentials.is_none() && self.session.force_get_when_unauthenticated() {
            Method::GET
        } else {
            spec.method
        };

        let mut builder = self
            .session
            .http()
            .request(method, url)
            .header(USER_AGENT, self.session.user_agent());

        if let Some(credentials) = &credentials {
            builder = builder.basic_auth(credentials.username(), Some(credentials.api_key()));
        }
        if let Some(multipart) = spec.multipart {
            builder = builder.multipart(multipart.into_form());
        }

        builder.build().map_err(Into::into)
    }

    /// Sends `spec` through the session's dispatcher.
    ///
    /// The reply comes back untouched apart from the status check.
    ///
    /// # Errors
    ///
    /// - [`Error::NotAuthenticated`] if `spec` requires credentials the session lacks;
    ///   nothing is queued in that case.
    /// - [`Error::InvalidParameter`] if the path does not resolve.
    /// - [`Error::Reqwest`] / [`Error::UnexpectedStatus`] for transport failures
    ///   and non-2xx replies. Nothing is retried.
    pub async fn submit(&self, spec: RequestSpec) -> Result<Reply> {
        let request = self.prepare(spec)?;
        log::debug!("queueing {} {}", request.method(), request.url());

        let transport = Arc::clone(self.session.transport());
        let reply = self
            .session
            .dispatcher()
            .schedule(move || async move {
                log::info!("request for {} dispatched", request.url());
                transport.execute(request).await
            })
            .await?;

        if !reply.status().is_success() {
            log::debug!("{} answered {}", reply.url(), reply.status());
            return Err(Error::UnexpectedStatus(Box::new(reply)));
        }
        Ok(reply)
    }
}
