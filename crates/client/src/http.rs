use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionHandle;

/// HTTP client for the studio backend.
///
/// Cloning is cheap and clones share the connection pool and the session.
#[derive(Debug, Clone)]
pub struct StudioClient {
    http: reqwest::Client,
    base_url: Url,
    session: SessionHandle,
}

impl StudioClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self::with_http(http, config.base_url.clone()))
    }

    pub fn with_http(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            session: SessionHandle::new(),
        }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Start a request, attaching the bearer token of an active session.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(%method, path, "api request");
        let builder = self.http.request(method, self.url(path));
        match self.session.bearer_token() {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        }
    }

    /// Send and map any non-success status to a [`ClientError`].
    pub(crate) async fn send(&self, builder: RequestBuilder, path: &str) -> ClientResult<Response> {
        let response = builder.send().await.map_err(|e| {
            tracing::debug!(path, error = %e, "transport failure");
            ClientError::Network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(path, status = status.as_u16(), "api error response");
        Err(status_error(status, path, &body))
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        path: &str,
    ) -> ClientResult<T> {
        let response = self.send(builder, path).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Send and discard the body (DELETE answers with 200 or 204).
    pub(crate) async fn send_empty(&self, builder: RequestBuilder, path: &str) -> ClientResult<()> {
        self.send(builder, path).await.map(drop)
    }
}

fn status_error(status: StatusCode, path: &str, body: &str) -> ClientError {
    if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
        return ClientError::NotFound {
            path: path.to_string(),
        };
    }
    ClientError::Response {
        status: status.as_u16(),
        message: error_message(body),
    }
}

/// Pull a human-readable message out of an error body.
/// Understands `{"error": {"message": ..}}`, `{"error": ".."}` and `{"message": ..}`.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let message = match value.get("error") {
        Some(Value::Object(error)) => error.get("message"),
        Some(error @ Value::String(_)) => Some(error),
        _ => value.get("message"),
    };
    message.and_then(Value::as_str).map(str::to_string)
}
