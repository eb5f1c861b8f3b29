//! Authenticated JSON HTTP client
//!
//! Every resource client funnels its calls through [`HttpClient`], which
//! prefixes the configured base URL, sets the JSON content type, injects the
//! bearer token supplied by a [`TokenSource`] and maps non-2xx responses to
//! [`ClientError::Api`].

use std::sync::Arc;
use std::time::Duration;

use common::ClientConfig;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::error::{ClientError, ClientResult, FALLBACK_MESSAGE};

/// Supplier of the bearer token for outgoing requests
pub trait TokenSource: Send + Sync {
    /// Current token, if a session exists
    fn token(&self) -> Option<String>;
}

impl<F> TokenSource for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn token(&self) -> Option<String> {
        self()
    }
}

/// Token source for clients that never authenticate
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl TokenSource for Anonymous {
    fn token(&self) -> Option<String> {
        None
    }
}

/// HTTP client bound to one base URL and one token source
///
/// Cloning is cheap; clones share the connection pool and token source.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenSource>,
}

impl HttpClient {
    /// Create a client from the application configuration
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenSource>) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self::with_client(client, &config.base_url, tokens))
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_client(client: Client, base_url: &str, tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Base URL every path is appended to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Token that would be sent with the next request
    pub fn token(&self) -> Option<String> {
        self.tokens.token()
    }

    /// Whether the next request would carry a bearer token
    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    /// Generic GET request
    pub async fn get(&self, path: &str) -> ClientResult<Value> {
        self.request(Method::GET, path, Ok(None)).await
    }

    /// Generic POST request with a JSON body
    pub async fn post<B>(&self, path: &str, body: &B) -> ClientResult<Value>
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, encode(body)).await
    }

    /// POST request without a body
    pub async fn post_empty(&self, path: &str) -> ClientResult<Value> {
        self.request(Method::POST, path, Ok(None)).await
    }

    /// Generic PUT request with a JSON body
    pub async fn put<B>(&self, path: &str, body: &B) -> ClientResult<Value>
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, encode(body)).await
    }

    /// PUT request without a body
    pub async fn put_empty(&self, path: &str) -> ClientResult<Value> {
        self.request(Method::PUT, path, Ok(None)).await
    }

    /// Generic DELETE request
    pub async fn delete(&self, path: &str) -> ClientResult<Value> {
        self.request(Method::DELETE, path, Ok(None)).await
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: ClientResult<Option<Value>>,
    ) -> ClientResult<Value> {
        let result = self.send(method.clone(), path, body).await;

        if let Err(e) = &result {
            error!("{} {} error: {}", method, path, e);
        }

        result
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: ClientResult<Option<Value>>,
    ) -> ClientResult<Value> {
        let body = body?;
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = self.tokens.token() {
            request = request.bearer_auth(token);
        }

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<Value>(&bytes)
                .ok()
                .and_then(|body| body.get("message")?.as_str().map(str::to_string))
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());

            return Err(ClientError::Api { status, message });
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Encode a request body as JSON; failures are validation errors
fn encode<B>(body: &B) -> ClientResult<Option<Value>>
where
    B: Serialize + ?Sized,
{
    serde_json::to_value(body)
        .map(Some)
        .map_err(|e| ClientError::Validation(format!("Request body is not valid JSON: {}", e)))
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.has_token())
            .finish()
    }
}
