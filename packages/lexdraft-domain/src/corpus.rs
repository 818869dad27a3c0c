use std::fmt;

use serde::{Deserialize, Serialize};
use whatlang::Lang;

/// Language a draft is requested in, or a corpus record is written in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageMode {
	#[default]
	Ru,
	En,
	Bilingual,
}
impl LanguageMode {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Ru => "ru",
			Self::En => "en",
			Self::Bilingual => "bilingual",
		}
	}

	/// Unknown tags map to `None` so callers can decide between detection and rejection.
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"ru" => Some(Self::Ru),
			"en" => Some(Self::En),
			"bilingual" => Some(Self::Bilingual),
			_ => None,
		}
	}

	/// Whether a record written in `record` may serve a request in `self`.
	pub fn accepts(self, record: Self) -> bool {
		match self {
			Self::Ru | Self::En => record == self || record == Self::Bilingual,
			Self::Bilingual => true,
		}
	}
}
impl fmt::Display for LanguageMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One precedent clause as it appears in the corpus file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusRecord {
	#[serde(default)]
	pub text: String,
	#[serde(default, alias = "contract_id")]
	pub doc_id: String,
	#[serde(default)]
	pub title: String,
	#[serde(default, alias = "section_group")]
	pub group_tag: String,
	#[serde(default, alias = "section_id")]
	pub section_tag: String,
	#[serde(default)]
	pub language: String,
}
impl CorpusRecord {
	/// Resolves the language tag, detecting it from the text when the tag is blank.
	///
	/// Tags outside the known modes resolve to `None`, which no request accepts.
	pub fn language_mode(&self) -> Option<LanguageMode> {
		if self.language.trim().is_empty() {
			return Some(detect_language(&self.text));
		}

		LanguageMode::parse(&self.language)
	}

	pub fn has_section_tag(&self, tag: &str) -> bool {
		self.section_tag.trim().eq_ignore_ascii_case(tag)
	}
}

fn detect_language(text: &str) -> LanguageMode {
	match whatlang::detect_lang(text) {
		Some(Lang::Eng) => LanguageMode::En,
		_ => LanguageMode::Ru,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn language_filter_matrix() {
		use LanguageMode::*;

		assert!(Ru.accepts(Ru));
		assert!(Ru.accepts(Bilingual));
		assert!(!Ru.accepts(En));
		assert!(En.accepts(En));
		assert!(!En.accepts(Ru));
		assert!(Bilingual.accepts(Ru));
		assert!(Bilingual.accepts(En));
		assert!(Bilingual.accepts(Bilingual));
	}

	#[test]
	fn legacy_field_names_deserialize() {
		let record: CorpusRecord = serde_json::from_str(
			r#"{"text":"Оплата производится","contract_id":"c-1","section_group":"commercial","section_id":"payment_terms","language":"ru"}"#,
		)
		.expect("Failed to parse record.");

		assert_eq!(record.doc_id, "c-1");
		assert_eq!(record.group_tag, "commercial");
		assert!(record.has_section_tag("payment_terms"));
		assert_eq!(record.language_mode(), Some(LanguageMode::Ru));
	}

	#[test]
	fn blank_language_is_detected() {
		let record = CorpusRecord {
			text: "The Buyer shall pay each invoice within thirty days after the date of its receipt by wire transfer.".to_string(),
			..Default::default()
		};

		assert_eq!(record.language_mode(), Some(LanguageMode::En));
	}

	#[test]
	fn unknown_language_tag_is_rejected() {
		let record = CorpusRecord { language: "de".to_string(), ..Default::default() };

		assert_eq!(record.language_mode(), None);
	}
}
