//! Model gateway boundary.
//!
//! Everything the engine wants from a language model is a single
//! asynchronous call: prompt in, completion text out. The trait keeps the
//! engine independent of the concrete client, and lets tests substitute a
//! scripted gateway.

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by a model gateway.
///
/// No gateway error is fatal to a game: every call site absorbs failures
/// into an inert verdict or a canned reply.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(String),

    #[error("model server error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed completion response: {0}")]
    Parse(String),
}

/// Sampling knobs for one completion call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionParams {
    pub n_predict: usize,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
}

impl CompletionParams {
    /// Low-temperature preset for the single-word mood verdict.
    pub fn classification() -> Self {
        Self {
            n_predict: 4,
            temperature: 0.1,
            top_k: 40,
            top_p: 0.9,
        }
    }

    /// Preset for free-text replies.
    pub fn generation() -> Self {
        Self {
            n_predict: 50,
            temperature: 0.85,
            top_k: 40,
            top_p: 0.9,
        }
    }
}

/// An asynchronous text-completion capability.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Complete `prompt` under `params`, returning the raw generated text.
    async fn create_completion(
        &self,
        prompt: &str,
        params: &CompletionParams,
    ) -> Result<String, GatewayError>;
}

impl From<llamacpp::Error> for GatewayError {
    fn from(e: llamacpp::Error) -> Self {
        match e {
            llamacpp::Error::Api { status, message } => GatewayError::Api { status, message },
            llamacpp::Error::Parse(message) => GatewayError::Parse(message),
            other => GatewayError::Network(other.to_string()),
        }
    }
}

#[async_trait]
impl ModelGateway for llamacpp::Llama {
    async fn create_completion(
        &self,
        prompt: &str,
        params: &CompletionParams,
    ) -> Result<String, GatewayError> {
        let request = llamacpp::Request::new(prompt)
            .with_n_predict(params.n_predict)
            .with_sampling(llamacpp::Sampling {
                temperature: params.temperature,
                top_k: params.top_k,
                top_p: params.top_p,
            });

        Ok(self.complete(request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_preset_is_cold() {
        let params = CompletionParams::classification();
        assert!(params.temperature < 0.5);
        assert!(params.n_predict <= 8);
    }

    #[test]
    fn test_generation_preset() {
        let params = CompletionParams::generation();
        assert_eq!(params.n_predict, 50);
        assert_eq!(params.temperature, 0.85);
        assert_eq!(params.top_k, 40);
        assert_eq!(params.top_p, 0.9);
    }

    #[test]
    fn test_error_conversion() {
        let e = llamacpp::Error::Api {
            status: 503,
            message: "loading model".to_string(),
        };
        match GatewayError::from(e) {
            GatewayError::Api { status, .. } => assert_eq!(status, 503),
            other => panic!("unexpected conversion: {other:?}"),
        }
    }
}
