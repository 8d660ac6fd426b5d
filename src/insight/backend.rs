//! Core trait for text-generation backends.

use crate::error::InsightError;
use async_trait::async_trait;

/// A single prompt plus the sampling options sent with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    /// Thinking token budget; `Some(0)` disables thinking.
    pub thinking_budget: Option<u32>,
}

impl GenerationRequest {
    /// Create a request with backend-default sampling.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_thinking_budget(mut self, budget: u32) -> Self {
        self.thinking_budget = Some(budget);
        self
    }
}

/// Prompt-to-text service.
///
/// Implementations make one attempt per call and never retry.
#[async_trait]
pub trait InsightBackend: Send + Sync {
    /// Backend identifier (model name).
    fn id(&self) -> &str;

    /// Generate text for a prompt.
    async fn generate(&self, request: GenerationRequest) -> Result<String, InsightError>;
}
