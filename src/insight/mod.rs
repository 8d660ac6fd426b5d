//! AI insight modules.
//!
//! This module provides the prompt-to-text boundary used by the dashboard's
//! two insight actions: the community analysis and the per-member tip.

pub mod backend;
pub mod gemini;
pub mod prompts;
pub mod requestor;

#[cfg(test)]
pub mod mock;

pub use gemini::GeminiBackend;
pub use requestor::{split_paragraphs, AnalysisSampling, InsightRequestor};
