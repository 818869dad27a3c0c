//! Turns retrieved precedents into fact-free style references.
//!
//! Each candidate is normalized, stripped of heading echoes and repeated lines, anonymized and
//! truncated on a sentence boundary. Survivors are deduplicated across the whole call.

pub mod anonymize;
pub mod normalize;
pub mod truncate;

mod error;

pub use anonymize::{Anonymizer, PLACEHOLDERS};
pub use error::{Error, Result};

use std::collections::HashSet;

use serde::Serialize;

use normalize::SpaceNormalizer;

/// Counters describing one `clean` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CleanReport {
	pub input_count: usize,
	pub output_count: usize,
	pub dropped_empty: usize,
	pub dropped_duplicates: usize,
	pub total_replacements: usize,
}

/// One cleaned candidate before cross-candidate deduplication.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CleanedPrecedent {
	pub text: String,
	pub replacements: usize,
}

#[derive(Debug)]
pub struct Sanitizer {
	line_window: usize,
	spaces: SpaceNormalizer,
	anonymizer: Anonymizer,
}
impl Sanitizer {
	pub fn new(cfg: &lexdraft_config::Sanitizer) -> Result<Self> {
		Ok(Self {
			line_window: cfg.line_window as usize,
			spaces: SpaceNormalizer::new()?,
			anonymizer: Anonymizer::new()?,
		})
	}

	/// Cleans every candidate, keeping input order and dropping case-folded duplicates.
	pub fn clean<S>(
		&self,
		candidates: &[S],
		min_chars: usize,
		max_chars: usize,
	) -> (Vec<String>, CleanReport)
	where
		S: AsRef<str>,
	{
		let mut report = CleanReport { input_count: candidates.len(), ..Default::default() };
		let mut seen = HashSet::new();
		let mut cleaned = Vec::new();

		for candidate in candidates {
			let Some(precedent) = self.clean_one(candidate.as_ref(), min_chars, max_chars) else {
				report.dropped_empty += 1;

				continue;
			};

			report.total_replacements += precedent.replacements;

			if !seen.insert(precedent.text.to_lowercase()) {
				report.dropped_duplicates += 1;

				continue;
			}

			cleaned.push(precedent.text);
		}

		report.output_count = cleaned.len();

		tracing::info!(
			input = report.input_count,
			output = report.output_count,
			dropped_empty = report.dropped_empty,
			dropped_duplicates = report.dropped_duplicates,
			replacements = report.total_replacements,
			"Cleaned precedents."
		);

		(cleaned, report)
	}

	/// `None` when the candidate is too short before anonymization or empty after truncation.
	pub fn clean_one(&self, raw: &str, min_chars: usize, max_chars: usize) -> Option<CleanedPrecedent> {
		let text = self.anonymizer.strip_placeholders(raw);
		let text = self.spaces.normalize(&text);
		let text = normalize::strip_heading_echo(&text);
		let text = normalize::dedupe_line_window(&text, self.line_window);

		if text.chars().count() < min_chars {
			return None;
		}

		let (text, replacements) = self.anonymizer.anonymize(&text);
		let text = truncate::truncate_sentence_safe(&self.spaces.normalize(&text), max_chars);

		if text.is_empty() {
			return None;
		}

		Some(CleanedPrecedent { text, replacements })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const LONG: &str = "Покупатель оплачивает каждый счет Поставщика банковским переводом на расчетный счет, \
		указанный в счете. Обязательство по оплате считается исполненным в момент зачисления средств.";

	fn sanitizer() -> Sanitizer {
		Sanitizer::new(&lexdraft_config::Sanitizer::default()).expect("Failed to build sanitizer.")
	}

	#[test]
	fn report_counts_drops_and_duplicates() {
		let candidates = [LONG.to_string(), LONG.to_uppercase(), "Коротко.".to_string(), "   ".to_string()];
		let (cleaned, report) = sanitizer().clean(&candidates, 120, 1800);

		assert_eq!(cleaned, vec![LONG.to_string()]);
		assert_eq!(
			report,
			CleanReport {
				input_count: 4,
				output_count: 1,
				dropped_empty: 2,
				dropped_duplicates: 1,
				total_replacements: 0,
			}
		);
	}

	#[test]
	fn minimum_length_applies_before_anonymization() {
		let sanitizer = sanitizer();

		assert!(sanitizer.clean_one("Оплата 30 дней.", 16, 100).is_none());
		assert_eq!(
			sanitizer.clean_one("Оплата 30 дней.", 15, 100),
			Some(CleanedPrecedent { text: "Оплата [TERM_DAYS].".to_string(), replacements: 1 })
		);
	}

	#[test]
	fn incoming_placeholders_do_not_survive() {
		let cleaned = sanitizer()
			.clean_one("Сумма [AMOUNT] уплачивается в [CURRENCY] в течение 10 дней.", 0, 500)
			.expect("Candidate is long enough.");

		assert_eq!(cleaned.text, "Сумма уплачивается в в течение [TERM_DAYS].");
		assert_eq!(cleaned.replacements, 1);
	}

	#[test]
	fn nested_incoming_placeholders_do_not_survive() {
		let cleaned = sanitizer()
			.clean_one("Оплата производится на сумму [AM[AMOUNT]OUNT] банковским переводом.", 0, 500)
			.expect("Candidate is long enough.");

		assert_eq!(cleaned.text, "Оплата производится на сумму банковским переводом.");
		assert_eq!(cleaned.replacements, 0);
		assert!(PLACEHOLDERS.iter().all(|token| !cleaned.text.contains(token)));
	}

	#[test]
	fn outputs_respect_the_character_budget() {
		let text = format!("{LONG} {LONG}");
		let (cleaned, _) = sanitizer().clean(&[text], 0, 120);

		assert_eq!(cleaned.len(), 1);
		assert!(cleaned[0].chars().count() <= 120);
		assert!(cleaned[0].ends_with('.'));
	}
}
