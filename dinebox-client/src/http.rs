//! HTTP transport
//!
//! [`HttpClient`] is the seam between the typed API and the wire. The
//! network implementation talks to the real services via reqwest; the
//! oneshot implementation in [`crate::http_oneshot`] drives an axum router
//! in memory. Both decode bodies through the same functions here, so status
//! mapping and `errors[]` parsing behave identically.

use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use http::StatusCode;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::{ApiErrorBody, ApiErrorEntry, ErrorCode};

/// HTTP client trait
///
/// Paths are absolute (`/api/...`). A successful response with an empty body
/// decodes as JSON `null`, so callers that expect no payload ask for an
/// `Option`.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    fn token(&self) -> Option<&str>;
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout_duration())
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> ClientResult<T> {
        let request = match self.auth_header() {
            Some(auth) => request.header(reqwest::header::AUTHORIZATION, auth),
            None => request,
        };
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        decode_body(status, &body)
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        tracing::debug!(path, "GET");
        self.send(self.client.get(self.url(path))).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        tracing::debug!(path, "POST");
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        tracing::debug!(path, "PUT");
        self.send(self.client.put(self.url(path)).json(body)).await
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Decode a response body, mapping non-2xx statuses to [`ClientError`]
pub(crate) fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> ClientResult<T> {
    if !status.is_success() {
        let err = error_from_response(status, body);
        tracing::warn!(%status, error = %err, "request failed");
        return Err(err);
    }

    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"null".as_slice()
    } else {
        body
    };
    serde_json::from_slice(body)
        .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
}

/// Map a failed response onto [`ClientError`]
///
/// A body carrying a `MissingRequiredOptions` entry always becomes
/// [`ClientError::MissingOptions`], whatever the status.
pub(crate) fn error_from_response(status: StatusCode, body: &[u8]) -> ClientError {
    let parsed = serde_json::from_slice::<ApiErrorBody>(body).ok();
    if let Some(names) = parsed.as_ref().and_then(ApiErrorBody::missing_options) {
        return ClientError::MissingOptions(names);
    }

    let message = parsed
        .as_ref()
        .and_then(ApiErrorBody::first_message)
        .map(str::to_string)
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string());

    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::FORBIDDEN => ClientError::Forbidden(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ClientError::Validation(message)
        }
        _ => ClientError::Api {
            code: parsed
                .as_ref()
                .and_then(|b| b.errors.iter().find_map(ApiErrorEntry::error_code))
                .unwrap_or_else(|| ErrorCode::from_http_status(status)),
            message,
        },
    }
}

/// Map a 2xx envelope with `isSuccess = false` onto [`ClientError`]
pub(crate) fn error_from_envelope(message: Option<String>, errors: Vec<ApiErrorEntry>) -> ClientError {
    let body = ApiErrorBody { message, errors };
    if let Some(names) = body.missing_options() {
        return ClientError::MissingOptions(names);
    }
    ClientError::Api {
        code: body
            .errors
            .iter()
            .find_map(ApiErrorEntry::error_code)
            .unwrap_or(ErrorCode::Unknown),
        message: body.first_message().unwrap_or_default().to_string(),
    }
}
