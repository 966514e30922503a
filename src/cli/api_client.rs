use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::env;

use crate::cli::error::{CliError, CliResult};

/// Environment variable naming the API server.
pub const API_URL_ENV: &str = "TRIVIA_API_URL";

/// Server used when neither a flag nor the environment names one.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Error body returned by the trivia API
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// API client for communicating with the trivia REST API
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// Priority for base URL:
    /// 1. Explicit `api_url` parameter
    /// 2. TRIVIA_API_URL environment variable
    /// 3. Default: http://localhost:5000
    pub fn new(api_url: Option<String>) -> Self {
        // reqwest is built without a default TLS provider
        let _ = rustls::crypto::ring::default_provider().install_default();

        let base_url = api_url
            .or_else(|| env::var(API_URL_ENV).ok().filter(|v| !v.is_empty()))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Get the base URL being used
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a GET request builder
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.get(&url)
    }

    /// Create a POST request builder
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.post(&url)
    }

    /// Create a DELETE request builder
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.delete(&url)
    }

    /// Handle API response with standardized error handling
    ///
    /// Returns the deserialized response body on success,
    /// or a CliError::Api carrying the server's message otherwise.
    pub async fn handle_response<T: DeserializeOwned>(response: Response) -> CliResult<T> {
        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| CliError::InvalidResponse {
                    message: e.to_string(),
                })
        } else {
            let status = response.status().as_u16();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.message)
                .unwrap_or(text);
            Err(CliError::Api { status, message })
        }
    }
}
