use std::sync::Arc;

use uuid::Uuid;

use crate::{
	ChatGenerator, Error, Generator, Result,
	diagnostics::{DiagnosticSink, FileDiagnosticSink, NoopSink},
	retry::{GenerationRequest, RetryController, RetryInstruction, RetryPolicy},
};
use lexdraft_config::Config;
use lexdraft_domain::{CorpusRecord, ErrorKind, FormInput, SectionKind, validate};
use lexdraft_retrieval::{RetrievalRequest, Retriever};
use lexdraft_sanitizer::{CleanReport, Sanitizer};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Prompt {
	pub system: String,
	pub user: String,
}

/// Turns cleaned precedents and the form into generator input.
pub trait PromptBuilder {
	fn build(&self, section: SectionKind, form: &FormInput, precedents: &[String]) -> Prompt;

	fn retry_instruction(&self, section: SectionKind) -> &dyn RetryInstruction;
}

/// The outcome of drafting one section, accepted or not.
#[derive(Clone, Debug)]
pub struct SectionDraft {
	pub run_id: Uuid,
	pub section: SectionKind,
	pub text: String,
	pub error: Option<ErrorKind>,
	pub attempts_used: u32,
	pub retrieved: Vec<String>,
	pub cleaned: Vec<String>,
	pub report: CleanReport,
	pub prompt: Prompt,
}
impl SectionDraft {
	pub fn is_accepted(&self) -> bool {
		self.error.is_none()
	}
}

/// Accepted sections in drafting order.
#[derive(Clone, Debug, Default)]
pub struct Contract {
	pub sections: Vec<SectionDraft>,
}
impl Contract {
	/// Sections under their headings, separated by a blank line.
	pub fn text(&self) -> String {
		self.sections
			.iter()
			.map(|draft| format!("{}\n{}", draft.section.heading(), draft.text.trim()))
			.collect::<Vec<_>>()
			.join("\n\n")
	}
}

pub struct DraftService {
	cfg: Config,
	retriever: Retriever,
	sanitizer: Sanitizer,
	controller: RetryController,
	generator: Arc<dyn Generator>,
	sink: Arc<dyn DiagnosticSink>,
}
impl DraftService {
	/// Generates through the configured endpoint and records failures under
	/// `diagnostics.dir` when one is set.
	pub fn new(cfg: Config) -> Result<Self> {
		let generator = Arc::new(ChatGenerator::new(cfg.providers.llm.clone()));
		let sink: Arc<dyn DiagnosticSink> = match cfg.diagnostics.dir.as_deref() {
			Some(dir) => Arc::new(FileDiagnosticSink::new(dir)),
			None => Arc::new(NoopSink),
		};

		Self::with_parts(cfg, generator, sink)
	}

	pub fn with_parts(
		cfg: Config,
		generator: Arc<dyn Generator>,
		sink: Arc<dyn DiagnosticSink>,
	) -> Result<Self> {
		Ok(Self {
			retriever: Retriever::new(&cfg.retrieval)?,
			sanitizer: Sanitizer::new(&cfg.sanitizer)?,
			controller: RetryController::new(RetryPolicy::from(&cfg.generation)),
			cfg,
			generator,
			sink,
		})
	}

	pub fn cfg(&self) -> &Config {
		&self.cfg
	}

	pub fn draft_section(
		&self,
		section: SectionKind,
		form: &FormInput,
		corpus: &[CorpusRecord],
		prompts: &dyn PromptBuilder,
	) -> Result<SectionDraft> {
		let run_id = Uuid::new_v4();
		let span = tracing::info_span!("draft_section", run_id = %run_id, section = %section);
		let _guard = span.enter();
		let rules = section.rules(&self.cfg.sections);
		let request = RetrievalRequest::for_section(section, form, &self.cfg.retrieval, rules);
		let retrieved = self.retriever.retrieve(&request, corpus);
		let (cleaned, report) = self.sanitizer.clean(
			&retrieved,
			self.cfg.sanitizer.min_chars as usize,
			rules.precedent_max_chars as usize,
		);
		let prompt = prompts.build(section, form, &cleaned);
		let validator = validate::for_section(section, &self.cfg.sections, form)?;
		let result = self.controller.generate_with_retry(
			self.generator.as_ref(),
			&GenerationRequest {
				label: section.as_str(),
				system: &prompt.system,
				user: &prompt.user,
				validator: validator.as_ref(),
				instruction: prompts.retry_instruction(section),
			},
			self.sink.as_ref(),
		)?;

		tracing::info!(
			retrieved = retrieved.len(),
			cleaned = cleaned.len(),
			attempts_used = result.attempts_used,
			accepted = result.is_accepted(),
			"Section drafted."
		);

		Ok(SectionDraft {
			run_id,
			section,
			text: result.text,
			error: result.error,
			attempts_used: result.attempts_used,
			retrieved,
			cleaned,
			report,
			prompt,
		})
	}

	/// Drafts `sections` in order and stops at the first rejected one.
	///
	/// `on_draft` sees every draft, including the rejected one, before the error is returned.
	pub fn draft_sections(
		&self,
		sections: &[SectionKind],
		form: &FormInput,
		corpus: &[CorpusRecord],
		prompts: &dyn PromptBuilder,
		mut on_draft: impl FnMut(&SectionDraft),
	) -> Result<Contract> {
		if sections.is_empty() {
			return Err(Error::InvalidRequest {
				message: "At least one section must be drafted.".to_string(),
			});
		}

		let mut contract = Contract::default();

		for &section in sections {
			let draft = self.draft_section(section, form, corpus, prompts)?;

			on_draft(&draft);

			if let Some(kind) = draft.error {
				return Err(Error::SectionRejected {
					section,
					kind,
					attempts: draft.attempts_used,
				});
			}

			contract.sections.push(draft);
		}

		Ok(contract)
	}

	/// Payment terms, then delivery terms.
	pub fn draft_contract(
		&self,
		form: &FormInput,
		corpus: &[CorpusRecord],
		prompts: &dyn PromptBuilder,
	) -> Result<Contract> {
		self.draft_sections(&SectionKind::ORDERED, form, corpus, prompts, |_| {})
	}
}
