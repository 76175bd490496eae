//! Shared HTTP client for the IntelliScan API.
//!
//! Provides a minimal client with configurable auth (Bearer token or
//! X-API-Key), generic GET/POST helpers, and domain methods (scan analysis,
//! report creation, report queries). The CLI uses this client directly, and
//! it implements the workflow's network-facing collaborator traits.

pub mod api;

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use intelliscan_core::{AppError, ClientConfig};

/// Authentication strategy for the API.
#[derive(Clone, Debug)]
pub enum Auth {
    /// `Authorization: Bearer {token}`
    Bearer(String),
    /// `X-API-Key: {key}`
    XApiKey(String),
}

/// API version prefix (e.g. "/api/v1"). Set INTELLISCAN_API_VERSION to match
/// the server.
pub fn api_prefix() -> String {
    let version = std::env::var("INTELLISCAN_API_VERSION").unwrap_or_else(|_| "v1".to_string());
    format!("/api/{}", version)
}

/// HTTP client for the IntelliScan API with configurable auth.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: Auth,
}

impl ApiClient {
    pub fn new(base_url: String, auth: Auth) -> Result<Self, AppError> {
        Self::with_timeout(base_url, auth, Duration::from_secs(60))
    }

    pub fn with_timeout(
        base_url: String,
        auth: Auth,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    /// Create a client from the environment: `INTELLISCAN_API_URL` and
    /// `INTELLISCAN_API_KEY` (or `API_KEY`). Uses X-API-Key auth.
    pub fn from_env() -> Result<Self, AppError> {
        let config = ClientConfig::from_env();

        let api_key = std::env::var("INTELLISCAN_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .map_err(|_| {
                AppError::Unauthorized("Missing API key. Set INTELLISCAN_API_KEY".to_string())
            })?;

        Self::with_timeout(
            config.api_base_url,
            Auth::XApiKey(api_key),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Auth::Bearer(token) => request.header("Authorization", format!("Bearer {}", token)),
            Auth::XApiKey(key) => request.header("X-API-Key", key.as_str()),
        }
    }

    /// Map a non-success response to the matching `AppError` variant, using
    /// the response body text as the message.
    async fn error_for_status(response: reqwest::Response) -> AppError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        match status {
            401 | 403 => AppError::Unauthorized(message),
            404 => AppError::NotFound(message),
            413 => AppError::PayloadTooLarge(message),
            _ => AppError::Service { status, message },
        }
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AppError> {
        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }
        response
            .json()
            .await
            .map_err(|e| AppError::Network(format!("Failed to parse response as JSON: {}", e)))
    }

    fn transport_error(err: reqwest::Error) -> AppError {
        AppError::Network(format!("Failed to send request: {}", err))
    }

    /// GET request with optional query parameters. Deserializes the JSON
    /// response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let url = self.build_url(path);
        let mut request = self.client.get(&url);
        request = self.apply_auth(request);

        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.map_err(Self::transport_error)?;
        Self::read_json(response).await
    }

    /// POST a JSON body and deserialize the response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let url = self.build_url(path);
        let request = self.client.post(&url).json(body);
        let request = self.apply_auth(request);

        let response = request.send().await.map_err(Self::transport_error)?;
        Self::read_json(response).await
    }

    /// POST a multipart form and deserialize the response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, AppError> {
        let url = self.build_url(path);
        let request = self.client.post(&url).multipart(form);
        let request = self.apply_auth(request);

        let response = request.send().await.map_err(Self::transport_error)?;
        Self::read_json(response).await
    }

    /// Raw client for custom requests. Caller must apply auth via build_url
    /// and headers.
    pub fn client(&self) -> &Client {
        &self.client
    }
}
