//! The two insight actions offered by the dashboard.

use super::backend::{GenerationRequest, InsightBackend};
use super::prompts::{community_prompt, member_tip_prompt};
use crate::config::ModelConfig;
use crate::error::InsightError;
use crate::models::MemberSummary;
use std::sync::Arc;
use tracing::info;

/// Sampling options applied to the community analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisSampling {
    pub temperature: f32,
    pub top_p: f32,
    pub thinking_budget: u32,
}

impl From<&ModelConfig> for AnalysisSampling {
    fn from(config: &ModelConfig) -> Self {
        Self {
            temperature: config.temperature,
            top_p: config.top_p,
            thinking_budget: config.thinking_budget,
        }
    }
}

/// Builds prompts and forwards them to a backend.
#[derive(Clone)]
pub struct InsightRequestor {
    backend: Arc<dyn InsightBackend>,
    sampling: AnalysisSampling,
}

impl InsightRequestor {
    pub fn new(backend: Arc<dyn InsightBackend>, sampling: AnalysisSampling) -> Self {
        Self { backend, sampling }
    }

    /// Backend identifier, for logs and report metadata.
    pub fn model(&self) -> &str {
        self.backend.id()
    }

    /// Ask for a community-wide strategy summary.
    pub async fn request_community_insight(
        &self,
        members: &[MemberSummary],
    ) -> Result<String, InsightError> {
        info!(
            "Requesting community insight for {} members from {}",
            members.len(),
            self.backend.id()
        );

        let prompt = community_prompt(members).map_err(|e| InsightError::Request(e.to_string()))?;
        let request = GenerationRequest::new(prompt)
            .with_temperature(self.sampling.temperature)
            .with_top_p(self.sampling.top_p)
            .with_thinking_budget(self.sampling.thinking_budget);

        non_empty(self.backend.generate(request).await?)
    }

    /// Ask for a short personalized tip. Uses backend-default sampling.
    pub async fn request_member_tip(&self, member: &MemberSummary) -> Result<String, InsightError> {
        info!("Requesting wellness tip for {}", member.name);

        let request = GenerationRequest::new(member_tip_prompt(member));
        non_empty(self.backend.generate(request).await?)
    }
}

fn non_empty(text: String) -> Result<String, InsightError> {
    if text.trim().is_empty() {
        Err(InsightError::Empty)
    } else {
        Ok(text)
    }
}

/// Split response text into display paragraphs, one per non-blank line.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
