//! Response Orchestrator
//!
//! Decides, per message, where the answer comes from:
//!
//! ```text
//! message ─▶ resolver ──hit──▶ Local
//!               │
//!             miss ──(Remote mode)──▶ generator ──ok──▶ Remote
//!               │                         │
//!               │                       error/timeout ──▶ Fallback (NO_MATCH)
//!               └──(LocalOnly)──────────────────────────▶ Local (NO_MATCH)
//! ```
//!
//! At most one network call per message. Remote failures are logged and
//! never reach the caller.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::demo::SCRIPTED_REPLY;
use crate::error::ChatError;
use crate::knowledge::FactBase;
use crate::prompt::grounding_prompt;
use crate::provider::{GenerationOptions, TextGenerator};
use crate::resolver::{is_no_match, resolve};

/// How the orchestrator answers, decided once at construction
#[derive(Clone)]
pub enum ResponseMode {
    /// Answer from the fact base only
    LocalOnly,

    /// Escalate resolver misses to a remote generator
    Remote(Arc<dyn TextGenerator>),

    /// Demo widget behaviour: every message gets the same canned reply
    Scripted(String),
}

impl ResponseMode {
    /// Scripted mode with the stock widget reply
    pub fn scripted() -> Self {
        Self::Scripted(SCRIPTED_REPLY.into())
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::LocalOnly => "local",
            Self::Remote(_) => "remote",
            Self::Scripted(_) => "scripted",
        }
    }
}

impl fmt::Debug for ResponseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(generator) => f.debug_tuple("Remote").field(&generator.info().name).finish(),
            other => f.write_str(other.name()),
        }
    }
}

/// Orchestrator configuration
#[derive(Clone, Debug)]
pub struct OrchestratorConfig {
    /// Sampling parameters for remote generation
    pub generation: GenerationOptions,

    /// Upper bound on a single remote call
    pub remote_timeout: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            generation: GenerationOptions::default(),
            remote_timeout: Duration::from_secs(30),
        }
    }
}

/// Where a reply came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    /// Fact base (including the no-match message in local-only mode)
    Local,
    /// Remote generator
    Remote,
    /// Remote generation failed; the no-match message was returned instead
    Fallback,
    /// Canned demo reply
    Scripted,
}

/// An answer to one user message
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

impl Reply {
    fn new(text: impl Into<String>, source: ReplySource) -> Self {
        Self { text: text.into(), source }
    }
}

/// Answers user messages from the fact base, escalating misses when allowed
pub struct Orchestrator {
    facts: Arc<FactBase>,
    mode: ResponseMode,
    config: OrchestratorConfig,
}

impl Orchestrator {
    /// Create a new orchestrator
    pub const fn new(facts: Arc<FactBase>, mode: ResponseMode, config: OrchestratorConfig) -> Self {
        Self { facts, mode, config }
    }

    /// Local-only orchestrator with default configuration
    pub fn local(facts: Arc<FactBase>) -> Self {
        Self::new(facts, ResponseMode::LocalOnly, OrchestratorConfig::default())
    }

    /// Remote-fallback orchestrator with default configuration
    pub fn with_generator(facts: Arc<FactBase>, generator: Arc<dyn TextGenerator>) -> Self {
        Self::new(facts, ResponseMode::Remote(generator), OrchestratorConfig::default())
    }

    pub const fn mode(&self) -> &ResponseMode {
        &self.mode
    }

    /// Answer a message, reporting where the answer came from
    pub async fn respond(&self, message: &str) -> Reply {
        let generator = match &self.mode {
            ResponseMode::Scripted(reply) => return Reply::new(reply.as_str(), ReplySource::Scripted),
            ResponseMode::LocalOnly => None,
            ResponseMode::Remote(generator) => Some(generator),
        };

        let local = resolve(message, &self.facts);
        if !is_no_match(&local) {
            return Reply::new(local, ReplySource::Local);
        }

        let Some(generator) = generator else {
            return Reply::new(local, ReplySource::Local);
        };

        match self.generate(generator.as_ref(), message).await {
            Ok(text) => Reply::new(text, ReplySource::Remote),
            Err(e) => {
                tracing::warn!(
                    provider = %generator.info().name,
                    error = %e,
                    retryable = e.is_retryable(),
                    "Remote generation failed, answering from fact base"
                );
                Reply::new(local, ReplySource::Fallback)
            }
        }
    }

    /// Answer a message with text only
    pub async fn answer(&self, message: &str) -> String {
        self.respond(message).await.text
    }

    async fn generate(&self, generator: &dyn TextGenerator, message: &str) -> Result<String, ChatError> {
        let prompt = grounding_prompt(&self.facts, message)?;
        tracing::debug!(
            tokens = generator.estimate_tokens(&prompt),
            "Escalating to remote generator"
        );

        let timeout = self.config.remote_timeout;
        let completion = tokio::time::timeout(timeout, generator.generate(&prompt, &self.config.generation))
            .await
            .map_err(|_| ChatError::Timeout(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)))??;

        Ok(completion.content)
    }
}
