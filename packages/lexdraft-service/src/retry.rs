//! Bounded regeneration driven by validation outcomes.
//!
//! [`decide`] is the whole policy: it looks at the previous attempt and says whether to generate
//! again, accept, or give up. [`RetryController`] only executes those decisions.

use std::time::Instant;

use crate::{
	Generator, Result,
	diagnostics::{DiagnosticRecord, DiagnosticSink},
};
use lexdraft_config::{Generation, Sampling};
use lexdraft_domain::{ErrorKind, Validator};

/// Text appended to the user prompt when an attempt is retried.
pub trait RetryInstruction {
	fn instruction(&self, kind: ErrorKind) -> String;
}
impl RetryInstruction for &str {
	fn instruction(&self, _kind: ErrorKind) -> String {
		self.to_string()
	}
}

impl RetryInstruction for String {
	fn instruction(&self, _kind: ErrorKind) -> String {
		self.clone()
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RetryPolicy {
	pub max_retries: u32,
	pub base: Sampling,
	pub retry: Sampling,
}
impl RetryPolicy {
	pub fn max_attempts(&self) -> u32 {
		self.max_retries + 1
	}
}
impl Default for RetryPolicy {
	fn default() -> Self {
		Self::from(&Generation::default())
	}
}
impl From<&Generation> for RetryPolicy {
	fn from(cfg: &Generation) -> Self {
		Self { max_retries: cfg.max_retries, base: cfg.base, retry: cfg.retry }
	}
}

/// One call to the generator and what the validator made of it.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationAttempt {
	/// Zero-based.
	pub index: u32,
	pub sampling: Sampling,
	pub text: String,
	pub outcome: Option<ErrorKind>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationResult {
	/// The last produced text, accepted or not.
	pub text: String,
	pub error: Option<ErrorKind>,
	pub attempts_used: u32,
}
impl GenerationResult {
	pub fn is_accepted(&self) -> bool {
		self.error.is_none()
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Decision {
	Generate {
		index: u32,
		sampling: Sampling,
		/// Set on retries. Its instruction is appended to the user prompt.
		feedback: Option<ErrorKind>,
	},
	Accept,
	Reject {
		kind: ErrorKind,
		exhausted: bool,
	},
}

pub fn decide(policy: &RetryPolicy, last: Option<&GenerationAttempt>) -> Decision {
	let Some(last) = last else {
		return Decision::Generate { index: 0, sampling: policy.base, feedback: None };
	};
	let Some(kind) = last.outcome else {
		return Decision::Accept;
	};

	if !kind.is_retryable() {
		return Decision::Reject { kind, exhausted: false };
	}
	if last.index >= policy.max_retries {
		return Decision::Reject { kind, exhausted: true };
	}

	Decision::Generate { index: last.index + 1, sampling: policy.retry, feedback: Some(kind) }
}

/// The user prompt for an attempt.
pub fn user_prompt(user: &str, instruction: Option<&str>) -> String {
	match instruction {
		Some(instruction) => format!("{user}\n\n{}\n", instruction.trim()),
		None => user.to_string(),
	}
}

/// Everything one generation request needs besides the generator.
pub struct GenerationRequest<'a> {
	/// Names the diagnostic files written on failure.
	pub label: &'a str,
	pub system: &'a str,
	pub user: &'a str,
	pub validator: &'a dyn Validator,
	pub instruction: &'a dyn RetryInstruction,
}

#[derive(Clone, Debug, Default)]
pub struct RetryController {
	policy: RetryPolicy,
}
impl RetryController {
	pub fn new(policy: RetryPolicy) -> Self {
		Self { policy }
	}

	pub fn policy(&self) -> &RetryPolicy {
		&self.policy
	}

	/// Generates until the validator accepts, a terminal kind appears, or attempts run out.
	///
	/// Validation failures come back inside the result. Generator errors are returned at once
	/// and are never retried. On failure the last text goes to `sink`; a sink error is logged
	/// and does not change the result.
	pub fn generate_with_retry(
		&self,
		generator: &dyn Generator,
		request: &GenerationRequest<'_>,
		sink: &dyn DiagnosticSink,
	) -> Result<GenerationResult> {
		let mut last: Option<GenerationAttempt> = None;

		loop {
			match decide(&self.policy, last.as_ref()) {
				Decision::Generate { index, sampling, feedback } => {
					let instruction = feedback.map(|kind| request.instruction.instruction(kind));
					let user = user_prompt(request.user, instruction.as_deref());
					let started = Instant::now();
					let text = generator.generate(request.system, &user, sampling)?;
					let outcome = request.validator.validate(&text).err();

					tracing::info!(
						label = request.label,
						attempt = index,
						temperature = sampling.temperature,
						top_p = sampling.top_p,
						elapsed_ms = started.elapsed().as_millis() as u64,
						accepted = outcome.is_none(),
						"Generation attempt finished."
					);

					if let Some(kind) = outcome {
						tracing::warn!(
							label = request.label,
							attempt = index,
							kind = %kind,
							class = ?kind.class(),
							"Generated text was rejected."
						);
					}

					last = Some(GenerationAttempt { index, sampling, text, outcome });
				},
				Decision::Accept => {
					let (attempts_used, text) = finish(last.take());

					return Ok(GenerationResult { text, error: None, attempts_used });
				},
				Decision::Reject { kind, exhausted } => {
					let (attempts_used, text) = finish(last.take());
					let result = GenerationResult { text, error: Some(kind), attempts_used };

					tracing::warn!(
						label = request.label,
						kind = %kind,
						attempts_used,
						exhausted,
						"Generation failed validation."
					);

					let record = DiagnosticRecord {
						label: request.label,
						text: &result.text,
						error_kind: kind,
						attempts_used,
					};

					if let Err(err) = sink.record(&record) {
						tracing::warn!(
							label = request.label,
							error = %err,
							"Failed to record diagnostics."
						);
					}

					return Ok(result);
				},
			}
		}
	}
}

fn finish(last: Option<GenerationAttempt>) -> (u32, String) {
	last.map(|attempt| (attempt.index + 1, attempt.text)).unwrap_or_default()
}
