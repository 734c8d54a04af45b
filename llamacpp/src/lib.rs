//! Minimal HTTP client for a locally running llama.cpp server.
//!
//! This crate provides a focused client for the server's completion API:
//! - Non-streaming text completions with explicit sampling parameters
//! - A readiness probe against `/health`
//! - Maintenance helpers for the local model-artifact cache

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod cache;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const BASE_URL_ENV: &str = "LLAMA_SERVER_URL";

/// Errors that can occur when using the llama.cpp client.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// llama.cpp server client.
#[derive(Clone)]
pub struct Llama {
    client: reqwest::Client,
    base_url: String,
}

impl Llama {
    /// Create a new client talking to the given server base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .connect_timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from the `LLAMA_SERVER_URL` environment variable,
    /// falling back to `http://localhost:8080`.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// The base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a completion request and return the generated text.
    pub async fn complete(&self, request: Request) -> Result<String, Error> {
        let api_request = ApiRequest {
            prompt: request.prompt,
            n_predict: request.n_predict,
            temperature: request.sampling.temperature,
            top_k: request.sampling.top_k,
            top_p: request.sampling.top_p,
            stop: request.stop,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/completion", self.base_url))
            .headers(Self::build_headers())
            .json(&api_request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status,
                message: body,
            });
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))?;

        Ok(api_response.content)
    }

    /// Probe the server's `/health` endpoint.
    ///
    /// Returns `Ok(())` once the server reports itself ready to serve
    /// completions (the model has finished loading).
    pub async fn health(&self) -> Result<(), Error> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(Error::Api {
                status,
                message: body,
            })
        }
    }

    fn build_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }
}

// ============================================================================
// Public types
// ============================================================================

/// A completion request.
#[derive(Debug, Clone)]
pub struct Request {
    pub prompt: String,
    pub n_predict: usize,
    pub sampling: Sampling,
    pub stop: Vec<String>,
}

impl Request {
    /// Create a new request for the given prompt with default sampling.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            n_predict: 128,
            sampling: Sampling::default(),
            stop: Vec::new(),
        }
    }

    /// Cap the number of generated tokens.
    pub fn with_n_predict(mut self, n_predict: usize) -> Self {
        self.n_predict = n_predict;
        self
    }

    /// Set the sampling parameters.
    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Add a stop sequence.
    pub fn with_stop(mut self, stop: impl Into<String>) -> Self {
        self.stop.push(stop.into());
        self
    }
}

/// Sampling parameters for a completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
}

impl Default for Sampling {
    fn default() -> Self {
        // llama.cpp server defaults
        Self {
            temperature: 0.8,
            top_k: 40,
            top_p: 0.95,
        }
    }
}

// ============================================================================
// Internal API types
// ============================================================================

#[derive(Debug, Serialize)]
struct ApiRequest {
    prompt: String,
    n_predict: usize,
    temperature: f32,
    top_k: u32,
    top_p: f32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stop: Vec<String>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    content: String,
}
