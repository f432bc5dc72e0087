//! # botalk-runtime
//!
//! Remote generation providers for the Botalk demo assistant.
//!
//! ## Providers
//!
//! - **Gemini** (default): Google Generative Language `generateContent`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use botalk_runtime::GeminiProvider;
//!
//! let provider = GeminiProvider::from_env()?;
//! let orchestrator = Orchestrator::with_generator(facts, Arc::new(provider));
//! ```

#[cfg(feature = "gemini")]
pub mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::{GeminiConfig, GeminiProvider, MAX_TIMEOUT_SECS};

// Re-export core types for convenience
pub use botalk_core::{
    ChatError, FactBase, GenerationOptions, Orchestrator, Reply, ReplySource, ResponseMode,
    Result, TextGenerator,
};
