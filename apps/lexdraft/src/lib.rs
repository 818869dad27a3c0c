pub mod prompt;
pub mod tidy;

use std::{
	fs,
	path::{Path, PathBuf},
	sync::Arc,
};

use clap::Parser;
use color_eyre::eyre;
use tracing_subscriber::EnvFilter;

use crate::{prompt::ContractPrompts, tidy::TidyGenerator};
use lexdraft_config::Config;
use lexdraft_domain::{CorpusRecord, FormInput, SectionKind};
use lexdraft_service::{
	ChatGenerator, DiagnosticSink, DraftService, FileDiagnosticSink, NoopSink, SectionDraft,
};

const DUMP_SEPARATOR: &str =
	"\n\n============================================================\n\n";

#[derive(Debug, Parser)]
#[command(
	version = lexdraft_cli::VERSION,
	rename_all = "kebab",
	styles = lexdraft_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Drafting parameters as JSON.
	#[arg(long, short = 'f', value_name = "FILE")]
	pub form: PathBuf,
	/// Precedent clauses, one JSON record per line.
	#[arg(long, value_name = "FILE")]
	pub corpus: PathBuf,
	#[arg(long, short = 'o', value_name = "FILE", default_value = "out.txt")]
	pub out: PathBuf,
	/// Receives precedents, prompts and rejected outputs per section.
	#[arg(long, value_name = "DIR")]
	pub debug_dir: Option<PathBuf>,
	/// Drafts only this section, e.g. `delivery_terms`.
	#[arg(long, value_name = "SECTION", value_parser = parse_section)]
	pub section: Option<SectionKind>,
}

pub fn run(args: Args) -> color_eyre::Result<()> {
	let config = lexdraft_config::load(&args.config)?;

	init_tracing(&config)?;

	let form = load_form(&args.form)?;
	let corpus = load_corpus(&args.corpus)?;
	let sections = match args.section {
		Some(section) => vec![section],
		None => SectionKind::ORDERED.to_vec(),
	};

	if let Some(dir) = &args.debug_dir {
		fs::create_dir_all(dir)?;
	}

	let prompts = ContractPrompts::new(form.language_mode, &config.sections)?;
	let generator = TidyGenerator::new(ChatGenerator::new(config.providers.llm.clone()))?;
	let sink = diagnostic_sink(&config, args.debug_dir.as_deref());
	let service = DraftService::with_parts(config, Arc::new(generator), sink)?;

	tracing::info!(
		records = corpus.len(),
		sections = sections.len(),
		language = %form.language_mode,
		"Drafting contract."
	);

	let contract = service.draft_sections(&sections, &form, &corpus, &prompts, |draft| {
		if let Some(dir) = args.debug_dir.as_deref()
			&& let Err(err) = dump_draft(dir, draft)
		{
			tracing::warn!(section = %draft.section, error = %err, "Failed to write debug files.");
		}
	})?;

	fs::write(&args.out, contract.text())?;

	tracing::info!(out = %args.out.display(), "Contract written.");

	Ok(())
}

pub fn load_form(path: &Path) -> color_eyre::Result<FormInput> {
	let raw = fs::read_to_string(path)?;

	Ok(serde_json::from_str(&raw)?)
}

pub fn load_corpus(path: &Path) -> color_eyre::Result<Vec<CorpusRecord>> {
	let raw = fs::read_to_string(path)?;

	parse_corpus(&raw)
}

/// Parses JSONL, skipping blank lines.
pub fn parse_corpus(raw: &str) -> color_eyre::Result<Vec<CorpusRecord>> {
	let mut records = Vec::new();

	for (idx, line) in raw.lines().enumerate() {
		let line = line.trim();

		if line.is_empty() {
			continue;
		}

		let record = serde_json::from_str(line)
			.map_err(|err| eyre::eyre!("Invalid corpus record on line {}: {err}", idx + 1))?;

		records.push(record);
	}

	if records.is_empty() {
		return Err(eyre::eyre!("Corpus must include at least one record."));
	}

	Ok(records)
}

fn diagnostic_sink(config: &Config, debug_dir: Option<&Path>) -> Arc<dyn DiagnosticSink> {
	match diagnostics_dir(config, debug_dir) {
		Some(dir) => Arc::new(FileDiagnosticSink::new(dir)),
		None => Arc::new(NoopSink),
	}
}

/// Rejected outputs go to the configured diagnostics directory, else to the debug directory.
fn diagnostics_dir(config: &Config, debug_dir: Option<&Path>) -> Option<PathBuf> {
	let configured = config.diagnostics.dir.as_deref().map(PathBuf::from);

	configured.or_else(|| debug_dir.map(Path::to_path_buf))
}

fn dump_draft(dir: &Path, draft: &SectionDraft) -> color_eyre::Result<()> {
	let section = draft.section.as_str();

	fs::write(
		dir.join(format!("{section}_precedents_raw.txt")),
		draft.retrieved.join(DUMP_SEPARATOR),
	)?;
	fs::write(
		dir.join(format!("{section}_precedents_clean.txt")),
		draft.cleaned.join(DUMP_SEPARATOR),
	)?;
	fs::write(
		dir.join(format!("{section}_clean_report.json")),
		serde_json::to_string_pretty(&draft.report)?,
	)?;
	fs::write(dir.join(format!("{section}_prompt.txt")), &draft.prompt.user)?;
	fs::write(
		dir.join(format!("{section}_llm_used_attempts.txt")),
		draft.attempts_used.to_string(),
	)?;

	Ok(())
}

fn parse_section(raw: &str) -> Result<SectionKind, String> {
	SectionKind::parse(raw).ok_or_else(|| {
		let known = SectionKind::ORDERED.map(SectionKind::as_str).join(", ");

		format!("unknown section `{raw}`, expected one of: {known}")
	})
}

fn init_tracing(config: &Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn section_flag_accepts_known_names() {
		assert_eq!(parse_section("payment_terms"), Ok(SectionKind::PaymentTerms));
		assert_eq!(parse_section(" delivery_terms "), Ok(SectionKind::DeliveryTerms));

		let err = parse_section("disputes").expect_err("Expected an unknown section.");

		assert!(err.contains("payment_terms, delivery_terms"));
	}

	#[test]
	fn args_use_kebab_case_flags() {
		let args = Args::try_parse_from([
			"lexdraft",
			"-c",
			"lexdraft.toml",
			"-f",
			"form.json",
			"--corpus",
			"corpus.jsonl",
			"--debug-dir",
			"debug",
			"--section",
			"payment_terms",
		])
		.expect("Failed to parse args.");

		assert_eq!(args.out, PathBuf::from("out.txt"));
		assert_eq!(args.debug_dir, Some(PathBuf::from("debug")));
		assert_eq!(args.section, Some(SectionKind::PaymentTerms));
	}

	#[test]
	fn configured_diagnostics_dir_wins_over_debug_dir() {
		let mut config = lexdraft_testkit::sample_config();

		assert_eq!(diagnostics_dir(&config, None), None);
		assert_eq!(
			diagnostics_dir(&config, Some(Path::new("debug"))),
			Some(PathBuf::from("debug"))
		);

		config.diagnostics.dir = Some("diag".to_string());

		assert_eq!(
			diagnostics_dir(&config, Some(Path::new("debug"))),
			Some(PathBuf::from("diag"))
		);
	}
}
