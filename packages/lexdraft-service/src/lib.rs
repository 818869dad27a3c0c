//! Section drafting: retrieval, sanitizing, generation and validation wired together.

pub mod diagnostics;
pub mod draft;
pub mod retry;

mod error;

pub use diagnostics::{DiagnosticRecord, DiagnosticSink, FileDiagnosticSink, NoopSink};
pub use draft::{Contract, DraftService, Prompt, PromptBuilder, SectionDraft};
pub use error::{Error, Result};
pub use retry::{
	Decision, GenerationAttempt, GenerationRequest, GenerationResult, RetryController,
	RetryInstruction, RetryPolicy,
};

use std::sync::Arc;

use lexdraft_config::{LlmProviderConfig, Sampling};
use lexdraft_providers::{ChatMessage, chat};

/// The external generation call. Errors are never retried by the controller.
pub trait Generator
where
	Self: Send + Sync,
{
	fn generate(&self, system: &str, user: &str, sampling: Sampling) -> Result<String>;
}

impl<G> Generator for Arc<G>
where
	G: Generator + ?Sized,
{
	fn generate(&self, system: &str, user: &str, sampling: Sampling) -> Result<String> {
		(**self).generate(system, user, sampling)
	}
}

/// Generates through the configured chat-completions endpoint.
#[derive(Clone, Debug)]
pub struct ChatGenerator {
	cfg: LlmProviderConfig,
}
impl ChatGenerator {
	pub fn new(cfg: LlmProviderConfig) -> Self {
		Self { cfg }
	}
}
impl Generator for ChatGenerator {
	fn generate(&self, system: &str, user: &str, sampling: Sampling) -> Result<String> {
		let messages = [ChatMessage::system(system), ChatMessage::user(user)];

		Ok(chat::generate(&self.cfg, &messages, sampling)?)
	}
}
