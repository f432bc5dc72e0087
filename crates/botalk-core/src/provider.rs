//! Text Generation Provider Strategy
//!
//! Defines a common interface for remote text-generation backends (Gemini
//! today) so the orchestrator can escalate unanswered questions without
//! knowing which service sits behind it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use botalk_core::provider::{GenerationOptions, TextGenerator};
//!
//! let provider = GeminiProvider::from_env()?;
//! let completion = provider.generate(&prompt, &GenerationOptions::default()).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Sampling parameters sent with every generation request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Model identifier (e.g., "gemini-pro")
    #[serde(default = "default_model")]
    pub model: String,

    /// Temperature for sampling (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Top-k sampling
    #[serde(default = "default_top_k")]
    pub top_k: u32,

    /// Top-p nucleus sampling
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Maximum tokens to generate
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

fn default_model() -> String { "gemini-pro".into() }
const fn default_temperature() -> f32 { 0.7 }
const fn default_top_k() -> u32 { 40 }
const fn default_top_p() -> f32 { 0.95 }
const fn default_max_output_tokens() -> u32 { 1024 }

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            top_k: default_top_k(),
            top_p: default_top_p(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

/// Response from a generation call
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Completion {
    /// The generated text
    pub content: String,

    /// Model that generated this response
    pub model: String,

    /// Token usage statistics (if available)
    pub usage: Option<TokenUsage>,

    /// Finish reason
    pub finish_reason: Option<FinishReason>,
}

/// Token usage statistics
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Reason for completion finishing
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Other,
}

/// Provider metadata
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "Gemini")
    pub name: String,

    /// Base URL the provider talks to
    pub endpoint: String,
}

/// Strategy trait for remote text generators
///
/// Implement this trait to add support for new generation backends.
/// The orchestrator works exclusively through this interface.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider information
    fn info(&self) -> ProviderInfo;

    /// Generate a completion for a single-turn prompt.
    ///
    /// Implementations make exactly one request: no retries, no streaming.
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<Completion>;

    /// Estimate token count for text
    fn estimate_tokens(&self, text: &str) -> u32 {
        // ~4 chars per token
        u32::try_from(text.len() / 4).unwrap_or(u32::MAX)
    }
}
