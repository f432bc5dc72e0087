//! # botalk-core
//!
//! Knowledge lookup and response orchestration behind the Botalk demo
//! assistant.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Orchestrator                             │
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────────────┐  │
//! │  │  FactBase   │──▶│  Resolver   │──▶│   TextGenerator     │  │
//! │  │ (read-only) │   │ (keywords)  │   │   (on miss only)    │  │
//! │  └─────────────┘   └─────────────┘   └─────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `TextGenerator` trait keeps the orchestrator independent of the
//! remote service; concrete providers live in `botalk-runtime`.

pub mod demo;
pub mod error;
pub mod knowledge;
pub mod orchestrator;
pub mod prompt;
pub mod provider;
pub mod resolver;

pub use error::{ChatError, Result};
pub use knowledge::FactBase;
pub use orchestrator::{Orchestrator, OrchestratorConfig, Reply, ReplySource, ResponseMode};
pub use provider::{GenerationOptions, TextGenerator};
pub use resolver::{NO_MATCH, resolve};
