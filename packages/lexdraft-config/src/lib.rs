mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, Diagnostics, Diversity, Generation, LlmProviderConfig, Providers, Retrieval, Sampling,
	Sanitizer, SectionRules, Sections, Service,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::invalid("service.log_level", "must be non-empty."));
	}

	validate_retrieval(&cfg.retrieval)?;
	validate_generation(&cfg.generation)?;

	let llm = &cfg.providers.llm;

	if llm.api_base.trim().is_empty() {
		return Err(Error::invalid("providers.llm.api_base", "must be non-empty."));
	}
	if llm.model.trim().is_empty() {
		return Err(Error::invalid("providers.llm.model", "must be non-empty."));
	}
	if llm.max_tokens == 0 {
		return Err(Error::invalid("providers.llm.max_tokens", "must be greater than zero."));
	}
	if llm.timeout_ms == 0 {
		return Err(Error::invalid("providers.llm.timeout_ms", "must be greater than zero."));
	}
	if llm.default_headers.values().any(|value| !value.is_string()) {
		return Err(Error::invalid("providers.llm.default_headers", "values must be strings."));
	}
	if cfg.sanitizer.min_chars == 0 {
		return Err(Error::invalid("sanitizer.min_chars", "must be greater than zero."));
	}
	if cfg.sanitizer.line_window == 0 {
		return Err(Error::invalid("sanitizer.line_window", "must be greater than zero."));
	}

	for (name, rules) in [
		("payment_terms", &cfg.sections.payment_terms),
		("delivery_terms", &cfg.sections.delivery_terms),
	] {
		validate_section(name, rules, cfg.sanitizer.min_chars)?;
	}

	if cfg.sections.delivery_terms.forbidden_topic_threshold.is_none() {
		return Err(Error::invalid(
			"sections.delivery_terms.forbidden_topic_threshold",
			"must be set.",
		));
	}

	Ok(())
}

fn validate_retrieval(retrieval: &Retrieval) -> Result<()> {
	if !retrieval.k1.is_finite() || retrieval.k1 <= 0.0 {
		return Err(Error::invalid("retrieval.k1", "must be a positive finite number."));
	}
	if !(0.0..=1.0).contains(&retrieval.b) {
		return Err(Error::invalid("retrieval.b", "must be in the range 0.0-1.0."));
	}
	if retrieval.overfetch_factor == 0 {
		return Err(Error::invalid("retrieval.overfetch_factor", "must be greater than zero."));
	}
	if retrieval.top_k == 0 {
		return Err(Error::invalid("retrieval.top_k", "must be greater than zero."));
	}
	if retrieval.max_doc_chars <= retrieval.min_doc_chars {
		return Err(Error::invalid(
			"retrieval.max_doc_chars",
			"must be greater than retrieval.min_doc_chars.",
		));
	}
	if retrieval.diversity.shingle_size == 0 {
		return Err(Error::invalid("retrieval.diversity.shingle_size", "must be greater than zero."));
	}

	let threshold = retrieval.diversity.similarity_threshold;

	if !threshold.is_finite() || threshold <= 0.0 || threshold > 1.0 {
		return Err(Error::invalid(
			"retrieval.diversity.similarity_threshold",
			"must be in the range (0.0, 1.0].",
		));
	}

	Ok(())
}

fn validate_generation(generation: &Generation) -> Result<()> {
	let samplings = [("generation.base", generation.base), ("generation.retry", generation.retry)];

	for (key, sampling) in samplings {
		if !sampling.temperature.is_finite() || sampling.temperature < 0.0 {
			return Err(Error::invalid(
				format!("{key}.temperature"),
				"must be zero or a positive finite number.",
			));
		}
		if !sampling.top_p.is_finite() || sampling.top_p <= 0.0 || sampling.top_p > 1.0 {
			return Err(Error::invalid(format!("{key}.top_p"), "must be in the range (0.0, 1.0]."));
		}
	}

	if generation.retry.temperature < generation.base.temperature {
		return Err(Error::invalid(
			"generation.retry.temperature",
			"must not be lower than generation.base.temperature.",
		));
	}
	if generation.retry.top_p < generation.base.top_p {
		return Err(Error::invalid(
			"generation.retry.top_p",
			"must not be lower than generation.base.top_p.",
		));
	}
	if generation.retry.temperature == generation.base.temperature
		&& generation.retry.top_p == generation.base.top_p
	{
		return Err(Error::invalid(
			"generation.retry",
			"must raise temperature or top_p above generation.base.",
		));
	}

	Ok(())
}

fn validate_section(name: &str, rules: &SectionRules, sanitizer_min_chars: u32) -> Result<()> {
	let key = |field: &str| format!("sections.{name}.{field}");

	if rules.numbering_prefix.is_empty()
		|| !rules.numbering_prefix.chars().all(|ch| ch.is_ascii_digit())
	{
		return Err(Error::invalid(key("numbering_prefix"), "must consist of ASCII digits."));
	}
	if rules.min_subclauses == 0 {
		return Err(Error::invalid(key("min_subclauses"), "must be greater than zero."));
	}
	if rules.min_chars_no_spaces == 0 {
		return Err(Error::invalid(key("min_chars_no_spaces"), "must be greater than zero."));
	}
	if rules.max_docs == 0 {
		return Err(Error::invalid(key("max_docs"), "must be greater than zero."));
	}
	if rules.precedent_max_chars <= sanitizer_min_chars {
		return Err(Error::invalid(
			key("precedent_max_chars"),
			"must be greater than sanitizer.min_chars.",
		));
	}
	if rules.forbidden_topic_threshold == Some(0) {
		return Err(Error::invalid(key("forbidden_topic_threshold"), "must be greater than zero."));
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.service.log_level = cfg.service.log_level.trim().to_string();
	cfg.providers.llm.api_base = cfg.providers.llm.api_base.trim_end_matches('/').to_string();

	if cfg.providers.llm.api_key.as_deref().is_some_and(|key| key.trim().is_empty()) {
		cfg.providers.llm.api_key = None;
	}
	if cfg.diagnostics.dir.as_deref().is_some_and(|dir| dir.trim().is_empty()) {
		cfg.diagnostics.dir = None;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(raw: &str) -> Config {
		let mut cfg: Config = toml::from_str(raw).expect("Failed to parse config.");

		normalize(&mut cfg);

		cfg
	}

	const MINIMAL: &str = r#"
[service]
log_level = "info"

[providers.llm]
provider_id = "llama-cpp"
api_base = "http://127.0.0.1:8080/"
api_key = "  "
path = "/v1/chat/completions"
model = "local"
max_tokens = 1200
timeout_ms = 600000
"#;

	#[test]
	fn minimal_config_fills_defaults() {
		let cfg = parse(MINIMAL);

		assert!(validate(&cfg).is_ok());
		assert_eq!(cfg.retrieval.top_k, 7);
		assert_eq!(cfg.retrieval.overfetch_factor, 8);
		assert_eq!(cfg.retrieval.diversity.shingle_size, 7);
		assert_eq!(cfg.generation.max_retries, 2);
		assert_eq!(cfg.sections.delivery_terms.numbering_prefix, "2");
		assert_eq!(cfg.sections.delivery_terms.forbidden_topic_threshold, Some(3));
		assert_eq!(cfg.providers.llm.api_base, "http://127.0.0.1:8080");
		assert!(cfg.providers.llm.api_key.is_none());
	}

	#[test]
	fn rejects_non_digit_numbering_prefix() {
		let mut cfg = parse(MINIMAL);

		cfg.sections.payment_terms.numbering_prefix = "I".to_string();

		let err = validate(&cfg).expect_err("Expected validation error.");

		assert!(err.to_string().starts_with("sections.payment_terms.numbering_prefix"));
	}
}
