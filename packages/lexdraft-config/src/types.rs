use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	#[serde(default)]
	pub retrieval: Retrieval,
	#[serde(default)]
	pub sanitizer: Sanitizer,
	#[serde(default)]
	pub generation: Generation,
	pub providers: Providers,
	#[serde(default)]
	pub sections: Sections,
	#[serde(default)]
	pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Retrieval {
	/// Term-frequency saturation.
	#[serde(default = "default_k1")]
	pub k1: f32,
	/// Length normalization strength, 0.0 disables it.
	#[serde(default = "default_b")]
	pub b: f32,
	/// The index is searched for `top_k * overfetch_factor` hits before selection.
	#[serde(default = "default_overfetch_factor")]
	pub overfetch_factor: u32,
	#[serde(default = "default_top_k")]
	pub top_k: u32,
	/// Corpus texts shorter than this are not indexed.
	#[serde(default = "default_min_doc_chars")]
	pub min_doc_chars: u32,
	#[serde(default = "default_max_doc_chars")]
	pub max_doc_chars: u32,
	#[serde(default)]
	pub diversity: Diversity,
}
impl Default for Retrieval {
	fn default() -> Self {
		Self {
			k1: default_k1(),
			b: default_b(),
			overfetch_factor: default_overfetch_factor(),
			top_k: default_top_k(),
			min_doc_chars: default_min_doc_chars(),
			max_doc_chars: default_max_doc_chars(),
			diversity: Diversity::default(),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Diversity {
	#[serde(default = "default_shingle_size")]
	pub shingle_size: u32,
	/// Candidates at or above this Jaccard similarity to an accepted one are skipped.
	#[serde(default = "default_similarity_threshold")]
	pub similarity_threshold: f32,
}
impl Default for Diversity {
	fn default() -> Self {
		Self {
			shingle_size: default_shingle_size(),
			similarity_threshold: default_similarity_threshold(),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sanitizer {
	#[serde(default = "default_min_chars")]
	pub min_chars: u32,
	/// Number of recent lines checked for case-insensitive repeats.
	#[serde(default = "default_line_window")]
	pub line_window: u32,
}
impl Default for Sanitizer {
	fn default() -> Self {
		Self { min_chars: default_min_chars(), line_window: default_line_window() }
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Generation {
	#[serde(default = "default_max_retries")]
	pub max_retries: u32,
	#[serde(default = "default_base_sampling")]
	pub base: Sampling,
	#[serde(default = "default_retry_sampling")]
	pub retry: Sampling,
}
impl Default for Generation {
	fn default() -> Self {
		Self {
			max_retries: default_max_retries(),
			base: default_base_sampling(),
			retry: default_retry_sampling(),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Sampling {
	pub temperature: f32,
	pub top_p: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Providers {
	pub llm: LlmProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	/// Optional. Blank values are treated as absent.
	#[serde(default)]
	pub api_key: Option<String>,
	pub path: String,
	pub model: String,
	pub max_tokens: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sections {
	#[serde(default = "default_payment_terms")]
	pub payment_terms: SectionRules,
	#[serde(default = "default_delivery_terms")]
	pub delivery_terms: SectionRules,
}
impl Default for Sections {
	fn default() -> Self {
		Self { payment_terms: default_payment_terms(), delivery_terms: default_delivery_terms() }
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectionRules {
	/// Minimum output length counted without whitespace.
	pub min_chars_no_spaces: u32,
	pub min_subclauses: u32,
	/// Top-level clause number the section's subclauses hang from, e.g. "1" for "1.3.".
	pub numbering_prefix: String,
	pub max_docs: u32,
	pub precedent_max_chars: u32,
	/// Only consulted by sections that scan for foreign topics.
	#[serde(default)]
	pub forbidden_topic_threshold: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Diagnostics {
	#[serde(default)]
	pub dir: Option<String>,
}

fn default_k1() -> f32 {
	1.5
}

fn default_b() -> f32 {
	0.75
}

fn default_overfetch_factor() -> u32 {
	8
}

fn default_top_k() -> u32 {
	7
}

fn default_min_doc_chars() -> u32 {
	80
}

fn default_max_doc_chars() -> u32 {
	2_600
}

fn default_shingle_size() -> u32 {
	7
}

fn default_similarity_threshold() -> f32 {
	0.55
}

fn default_min_chars() -> u32 {
	120
}

fn default_line_window() -> u32 {
	30
}

fn default_max_retries() -> u32 {
	2
}

fn default_base_sampling() -> Sampling {
	Sampling { temperature: 0.25, top_p: 0.9 }
}

fn default_retry_sampling() -> Sampling {
	Sampling { temperature: 0.35, top_p: 0.92 }
}

fn default_payment_terms() -> SectionRules {
	SectionRules {
		min_chars_no_spaces: 900,
		min_subclauses: 20,
		numbering_prefix: "1".to_string(),
		max_docs: 800,
		precedent_max_chars: 1_800,
		forbidden_topic_threshold: None,
	}
}

fn default_delivery_terms() -> SectionRules {
	SectionRules {
		min_chars_no_spaces: 1_100,
		min_subclauses: 20,
		numbering_prefix: "2".to_string(),
		max_docs: 1_200,
		precedent_max_chars: 2_200,
		forbidden_topic_threshold: Some(3),
	}
}
