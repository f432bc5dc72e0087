//! Server Configuration
//!
//! Everything is read from the environment (after `.env` is loaded).

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use botalk_core::{FactBase, GenerationOptions, Orchestrator, OrchestratorConfig, ResponseMode};
use botalk_runtime::{GeminiConfig, GeminiProvider};

/// Requested answering mode (`BOTALK_MODE`)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeSetting {
    /// Remote fallback when a credential is present, local-only otherwise
    Auto,
    Local,
    Remote,
    Scripted,
}

impl ModeSetting {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "" | "auto" => Some(Self::Auto),
            "local" => Some(Self::Local),
            "remote" => Some(Self::Remote),
            "scripted" | "demo" => Some(Self::Scripted),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub static_dir: PathBuf,
    pub facts_path: Option<PathBuf>,
    pub mode: ModeSetting,
    pub model: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let mode = match std::env::var("BOTALK_MODE") {
            Ok(value) => ModeSetting::parse(&value)
                .with_context(|| format!("BOTALK_MODE must be auto, local, remote or scripted (got {value:?})"))?,
            Err(_) => ModeSetting::Auto,
        };

        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into()),
            static_dir: std::env::var("BOTALK_STATIC_DIR")
                .unwrap_or_else(|_| "static".into())
                .into(),
            facts_path: std::env::var("BOTALK_FACTS_PATH").ok().map(PathBuf::from),
            mode,
            model: std::env::var("GEMINI_MODEL").ok().filter(|m| !m.trim().is_empty()),
        })
    }

    /// Load the fact base: the JSON file when configured, the built-in data otherwise
    pub fn load_facts(&self) -> anyhow::Result<Arc<FactBase>> {
        let facts = match &self.facts_path {
            Some(path) => FactBase::from_path(path)
                .with_context(|| format!("loading fact base from {}", path.display()))?,
            None => FactBase::botalk(),
        };
        Ok(Arc::new(facts))
    }

    /// Build the orchestrator. The answering mode is fixed here, once.
    ///
    /// `gemini` is the already-resolved credential (see [`GeminiConfig::from_env`]).
    pub fn build_orchestrator(
        &self,
        facts: Arc<FactBase>,
        gemini: Option<GeminiConfig>,
    ) -> anyhow::Result<Orchestrator> {
        let mut config = OrchestratorConfig::default();
        if let Some(model) = &self.model {
            config.generation = GenerationOptions {
                model: model.clone(),
                ..GenerationOptions::default()
            };
        }

        let mode = match (self.mode, gemini) {
            (ModeSetting::Local, _) => ResponseMode::LocalOnly,
            (ModeSetting::Scripted, _) => ResponseMode::scripted(),
            (ModeSetting::Remote | ModeSetting::Auto, Some(gemini)) => remote_mode(gemini, &mut config)?,
            (ModeSetting::Remote, None) => anyhow::bail!("BOTALK_MODE=remote needs GEMINI_API_KEY"),
            (ModeSetting::Auto, None) => {
                tracing::warn!("GEMINI_API_KEY not set - answering from the fact base only");
                ResponseMode::LocalOnly
            }
        };

        Ok(Orchestrator::new(facts, mode, config))
    }
}

fn remote_mode(gemini: GeminiConfig, config: &mut OrchestratorConfig) -> anyhow::Result<ResponseMode> {
    // Orchestrator bound sits just above the HTTP client's own timeout
    let remote_timeout = Duration::from_secs(gemini.timeout_secs.saturating_add(1));
    let provider = GeminiProvider::from_config(gemini)?;
    config.remote_timeout = remote_timeout;
    Ok(ResponseMode::Remote(Arc::new(provider)))
}
