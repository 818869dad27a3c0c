use regex::Regex;

use crate::Result;
use lexdraft_domain::{CorpusRecord, LanguageMode};

/// Share of the character budget before which no truncation boundary is searched.
const TAIL_ZONE_START: f32 = 0.65;

/// A corpus record after cleanup, ready for the pre-filter and the index.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
	pub doc_id: String,
	pub title: String,
	pub section_tag: String,
	pub language: LanguageMode,
	pub text: String,
}
impl Document {
	/// Title and body, the text the index and the keyword filter see.
	pub fn searchable_text(&self) -> String {
		format!("{}\n{}", self.title, self.text)
	}
}

/// Repairs common extraction damage in corpus texts before they are indexed.
#[derive(Debug)]
pub struct CorpusNormalizer {
	min_chars: usize,
	max_chars: usize,
	blank_lines: Regex,
	template_placeholder: Regex,
	glued: Vec<Regex>,
	horizontal_space: Regex,
}
impl CorpusNormalizer {
	pub fn new(cfg: &lexdraft_config::Retrieval) -> Result<Self> {
		let letter = "A-Za-zА-Яа-яЁё";

		Ok(Self {
			min_chars: cfg.min_doc_chars as usize,
			max_chars: cfg.max_doc_chars as usize,
			blank_lines: Regex::new(r"\n{3,}")?,
			template_placeholder: Regex::new(r"\[[^\]]{1,120}\]")?,
			glued: vec![
				Regex::new(&format!("([,;:])([{letter}])"))?,
				Regex::new(&format!(r"([{letter}])(\d)"))?,
				Regex::new(&format!(r"(\d)([{letter}])"))?,
				Regex::new("([А-Яа-яЁё])([A-Za-z])")?,
				Regex::new("([A-Za-z])([А-Яа-яЁё])")?,
			],
			horizontal_space: Regex::new(r"[ \t\x0B\x0C]+")?,
		})
	}

	/// Cleans every record and keeps those long enough and in an accepted language.
	pub fn prepare(&self, records: &[CorpusRecord], language: LanguageMode) -> Vec<Document> {
		records
			.iter()
			.filter_map(|record| {
				let record_language = record.language_mode()?;

				if !language.accepts(record_language) {
					return None;
				}

				let text = self.normalize(&record.text)?;

				Some(Document {
					doc_id: record.doc_id.trim().to_string(),
					title: record.title.trim().to_string(),
					section_tag: record.section_tag.trim().to_string(),
					language: record_language,
					text,
				})
			})
			.collect()
	}

	/// `None` when the raw text is below the minimum length.
	pub fn normalize(&self, raw: &str) -> Option<String> {
		let text = raw.trim();

		if text.chars().count() < self.min_chars {
			return None;
		}

		let text = text.replace("\r\n", "\n").replace('\r', "\n");
		let text = self.blank_lines.replace_all(&text, "\n\n");
		let mut text = self.template_placeholder.replace_all(&text, "").into_owned();

		for pattern in &self.glued {
			text = pattern.replace_all(&text, "${1} ${2}").into_owned();
		}

		let text = self.collapse_space(&text);
		let text = self.collapse_space(&squash_repeated_sentences(&text));

		Some(smart_truncate(&text, self.max_chars))
	}

	fn collapse_space(&self, text: &str) -> String {
		self.horizontal_space.replace_all(text, " ").trim().to_string()
	}
}

/// Drops a sentence when it repeats the one right before it.
pub fn squash_repeated_sentences(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	let mut previous: Option<&str> = None;

	for segment in sentence_segments(text) {
		let sentence = segment.trim();

		if !sentence.is_empty() && previous == Some(sentence) {
			continue;
		}
		if !sentence.is_empty() {
			previous = Some(sentence);
		}

		out.push_str(segment);
	}

	out
}

/// Sentences with their trailing whitespace attached, so concatenation restores the input.
fn sentence_segments(text: &str) -> Vec<&str> {
	let mut segments = Vec::new();
	let mut start = 0;
	let mut chars = text.char_indices().peekable();

	while let Some((_, ch)) = chars.next() {
		if !matches!(ch, '.' | '!' | '?') {
			continue;
		}

		let mut end = None;

		while let Some(&(idx, next)) = chars.peek() {
			if !next.is_whitespace() {
				break;
			}

			chars.next();

			end = Some(idx + next.len_utf8());
		}

		if let Some(end) = end {
			segments.push(&text[start..end]);

			start = end;
		}
	}

	if start < text.len() {
		segments.push(&text[start..]);
	}

	segments
}

/// Shortens `text` to at most `max_chars` characters plus an ellipsis.
///
/// The cut lands after the last `. ! ? ; :` or newline in the final 35% of the budget, or at
/// the budget itself when the tail has none.
pub fn smart_truncate(text: &str, max_chars: usize) -> String {
	let text = text.trim();

	if text.chars().count() <= max_chars {
		return text.to_string();
	}

	let budget_end = byte_offset(text, max_chars);
	let tail_start = byte_offset(text, (max_chars as f32 * TAIL_ZONE_START) as usize);
	let cut = text[tail_start..budget_end]
		.char_indices()
		.filter(|(_, ch)| matches!(ch, '.' | '!' | '?' | ';' | ':' | '\n'))
		.last()
		.map(|(idx, ch)| tail_start + idx + ch.len_utf8())
		.unwrap_or(budget_end);
	let mut truncated = text[..cut].trim_end().to_string();

	if truncated.chars().last().is_some_and(|ch| !matches!(ch, '.' | '!' | '?' | '…')) {
		truncated.push('…');
	}

	truncated
}

fn byte_offset(text: &str, chars: usize) -> usize {
	text.char_indices().nth(chars).map(|(idx, _)| idx).unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn normalizer() -> CorpusNormalizer {
		let cfg = lexdraft_config::Retrieval { min_doc_chars: 10, ..Default::default() };

		CorpusNormalizer::new(&cfg).expect("Failed to build normalizer.")
	}

	#[test]
	fn glued_tokens_are_separated() {
		let text = normalizer()
			.normalize("Оплата,в течение30дней по invoiceсчету:USD")
			.expect("Text is long enough.");

		assert_eq!(text, "Оплата, в течение 30 дней по invoice счету: USD");
	}

	#[test]
	fn template_placeholders_and_extra_space_are_removed() {
		let text = normalizer()
			.normalize("Покупатель [наименование]  оплачивает\t\tсчет.\r\n\r\n\r\n\r\nСрок оплаты.")
			.expect("Text is long enough.");

		assert_eq!(text, "Покупатель оплачивает счет.\n\nСрок оплаты.");
	}

	#[test]
	fn short_texts_are_dropped() {
		assert_eq!(normalizer().normalize("  short  "), None);
	}

	#[test]
	fn repeated_sentences_collapse() {
		assert_eq!(
			squash_repeated_sentences("Pay on time. Pay on time. Pay on time. Then ship."),
			"Pay on time. Then ship."
		);
	}

	#[test]
	fn truncation_prefers_sentence_boundary_in_tail() {
		let text = format!("{} Second sentence here. Third part keeps going on", "a".repeat(60));
		let truncated = smart_truncate(&text, 90);

		assert_eq!(truncated, format!("{} Second sentence here.", "a".repeat(60)));
	}

	#[test]
	fn truncation_without_boundary_appends_ellipsis() {
		let truncated = smart_truncate(&"слово ".repeat(40), 50);

		assert!(truncated.ends_with('…'));
		assert!(truncated.chars().count() <= 51);
	}

	#[test]
	fn language_filter_applies_during_preparation() {
		let records = vec![
			CorpusRecord {
				text: "Payment is due within thirty days.".to_string(),
				language: "en".to_string(),
				..Default::default()
			},
			CorpusRecord {
				text: "Оплата производится в течение тридцати дней.".to_string(),
				language: "ru".to_string(),
				..Default::default()
			},
			CorpusRecord {
				text: "Двуязычный текст, bilingual text.".to_string(),
				language: "bilingual".to_string(),
				..Default::default()
			},
		];
		let docs = normalizer().prepare(&records, LanguageMode::En);

		assert_eq!(docs.len(), 2);
		assert_eq!(docs[0].language, LanguageMode::En);
		assert_eq!(docs[1].language, LanguageMode::Bilingual);
	}
}
