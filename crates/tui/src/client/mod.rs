//! Access layer for the finance API.
//!
//! Every call takes the caller's [`Session`] explicitly; the client itself
//! holds no credentials. Responses are unwrapped from the
//! [`Envelope`](api_types::Envelope) and only `data` is handed back.

mod endpoints;
mod format;

use api_types::Envelope;
use reqwest::{
    Method, RequestBuilder, StatusCode, Url,
    header::{CONTENT_TYPE, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;

pub use endpoints::{DateRange, TransactionFilters};
pub use format::{format_currency, format_date, format_percentage};

/// Substring marking endpoints that must never carry a bearer token.
const AUTH_MARKER: &str = "/auth";
const FALLBACK_MESSAGE: &str = "An error occurred";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("No authentication token found")]
    MissingToken,
    #[error("{message}")]
    RequestFailed { status: StatusCode, message: String },
    #[error("Server unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid base_url: {0}")]
    InvalidBaseUrl(String),
}

/// Credentials for the current user, passed into every request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    /// Empty tokens are treated as absent.
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|token| !token.is_empty()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn sign_in(&mut self, token: String) {
        self.token = Some(token).filter(|token| !token.is_empty());
    }

    pub fn sign_out(&mut self) {
        self.token = None;
    }
}

/// A path relative to the API base plus optional query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    path: String,
    query: Vec<(String, String)>,
}

impl Endpoint {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// Appends the pair only when the value is non-empty.
    pub fn query_non_empty(self, key: &str, value: &str) -> Self {
        if value.is_empty() {
            self
        } else {
            self.query(key, value)
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn is_auth(&self) -> bool {
        self.path.contains(AUTH_MARKER)
    }
}

impl From<&str> for Endpoint {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for Endpoint {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        Url::parse(base_url).map_err(|err| ClientError::InvalidBaseUrl(err.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &Endpoint) -> String {
        format!(
            "{}/{}",
            self.base_url,
            endpoint.path().trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, endpoint: &Endpoint, token: Option<&str>) -> RequestBuilder {
        tracing::debug!(%method, path = endpoint.path(), "sending request");
        let mut req = self
            .http
            .request(method, self.url(endpoint))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if !endpoint.query_pairs().is_empty() {
            req = req.query(endpoint.query_pairs());
        }
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        req
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        session: &Session,
        endpoint: impl Into<Endpoint>,
    ) -> Result<T, ClientError> {
        let endpoint = endpoint.into();
        let token = required_token(session)?;
        let req = self.request(Method::GET, &endpoint, Some(token));
        send(req, &endpoint).await
    }

    /// Authentication endpoints are posted without a token; every other
    /// post carries one when the session has it.
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        session: &Session,
        endpoint: impl Into<Endpoint>,
        body: &B,
    ) -> Result<T, ClientError> {
        let endpoint = endpoint.into();
        let token = if endpoint.is_auth() {
            None
        } else {
            session.token()
        };
        let req = self.request(Method::POST, &endpoint, token).json(body);
        send(req, &endpoint).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        session: &Session,
        endpoint: impl Into<Endpoint>,
        body: &B,
    ) -> Result<T, ClientError> {
        let endpoint = endpoint.into();
        let token = required_token(session)?;
        let req = self.request(Method::PUT, &endpoint, Some(token)).json(body);
        send(req, &endpoint).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        session: &Session,
        endpoint: impl Into<Endpoint>,
    ) -> Result<T, ClientError> {
        let endpoint = endpoint.into();
        let token = required_token(session)?;
        let req = self.request(Method::DELETE, &endpoint, Some(token));
        send(req, &endpoint).await
    }
}

fn required_token(session: &Session) -> Result<&str, ClientError> {
    session.token().ok_or(ClientError::MissingToken)
}

async fn send<T: DeserializeOwned>(req: RequestBuilder, endpoint: &Endpoint) -> Result<T, ClientError> {
    let res = req.send().await.map_err(|err| {
        tracing::warn!(path = endpoint.path(), "request failed: {err}");
        ClientError::Transport(err)
    })?;
    let status = res.status();
    let body = res.bytes().await?;
    unwrap_envelope(status, &body).inspect_err(|err| {
        tracing::warn!(path = endpoint.path(), %status, "request failed: {err}");
    })
}

/// Returns the envelope's `data`, or the error the envelope describes.
fn unwrap_envelope<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, ClientError> {
    if !status.is_success() {
        return Err(ClientError::RequestFailed {
            status,
            message: failure_message(body),
        });
    }

    let envelope: Envelope<Value> = serde_json::from_slice(body)?;
    Ok(serde_json::from_value(envelope.data.unwrap_or(Value::Null))?)
}

/// `message`, then `error`, then the generic fallback. Empty strings count
/// as missing.
fn failure_message(body: &[u8]) -> String {
    serde_json::from_slice::<Envelope<Value>>(body)
        .ok()
        .and_then(|envelope| {
            envelope
                .message
                .filter(|message| !message.is_empty())
                .or(envelope.error.filter(|error| !error.is_empty()))
        })
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}
