use regex::Regex;

use crate::{
	ErrorKind, Result,
	validate::{Validator, chars_without_whitespace, count_matching_lines},
};
use lexdraft_config::SectionRules;

const DEFAULT_FORBIDDEN_TOPIC_THRESHOLD: u32 = 3;

/// Markers of payment and dispute clauses leaking into a delivery section.
const FORBIDDEN_TOPICS: &[&str] = &[
	r"\bоплат",
	r"\bплат[её]ж",
	r"\bсч[её]т\b",
	r"\binvoic",
	r"\bпен[яи]\b",
	r"\bнеусто(?:йка|ек)\b",
	r"\bштраф",
	r"\bсуд\b",
	r"\bарбитраж",
	r"\bпретензи",
	r"\bpayments?\b",
	r"\bpenalt",
	r"\bcourts?\b",
	r"\barbitration\b",
	r"\bclaims?\b",
];

/// Checks a drafted delivery-terms section.
///
/// Subclause numbering is lenient: "2.7.", "2.7)", "2.7 -" and "2.7" all count.
#[derive(Debug)]
pub struct DeliveryTermsValidator {
	min_chars_no_spaces: usize,
	min_subclauses: usize,
	forbidden_topic_threshold: usize,
	subclause: Regex,
	forbidden_topics: Regex,
}
impl DeliveryTermsValidator {
	pub fn new(rules: &SectionRules) -> Result<Self> {
		let prefix = regex::escape(&rules.numbering_prefix);

		Ok(Self {
			min_chars_no_spaces: rules.min_chars_no_spaces as usize,
			min_subclauses: rules.min_subclauses as usize,
			forbidden_topic_threshold: rules
				.forbidden_topic_threshold
				.unwrap_or(DEFAULT_FORBIDDEN_TOPIC_THRESHOLD) as usize,
			subclause: Regex::new(&format!(r"^{prefix}\.\d{{1,3}}\s*[.)\-–]?\s+"))?,
			forbidden_topics: Regex::new(&format!("(?i){}", FORBIDDEN_TOPICS.join("|")))?,
		})
	}

	/// Number of forbidden-topic occurrences, counting repeats.
	pub fn forbidden_topic_hits(&self, text: &str) -> usize {
		self.forbidden_topics.find_iter(text).count()
	}
}
impl Validator for DeliveryTermsValidator {
	fn validate(&self, text: &str) -> Result<(), ErrorKind> {
		let text = text.trim();

		if text.is_empty() {
			return Err(ErrorKind::EmptyOutput);
		}
		if chars_without_whitespace(text) < self.min_chars_no_spaces {
			return Err(ErrorKind::TooShort);
		}
		if count_matching_lines(text, &self.subclause) < self.min_subclauses {
			return Err(ErrorKind::TooFewListItems);
		}
		if self.forbidden_topic_hits(text) >= self.forbidden_topic_threshold {
			return Err(ErrorKind::ForbiddenTopicDetected);
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use lexdraft_testkit::clauses;

	fn validator() -> DeliveryTermsValidator {
		DeliveryTermsValidator::new(&SectionRules {
			min_chars_no_spaces: 300,
			min_subclauses: 20,
			numbering_prefix: "2".to_string(),
			max_docs: 1_200,
			precedent_max_chars: 2_200,
			forbidden_topic_threshold: Some(3),
		})
		.expect("Failed to build validator.")
	}

	#[test]
	fn well_formed_section_passes() {
		assert_eq!(validator().validate(&clauses::delivery_section("2", 20)), Ok(()));
	}

	#[test]
	fn lenient_numbering_variants_count() {
		let text = clauses::DELIVERY
			.iter()
			.take(20)
			.enumerate()
			.map(|(idx, clause)| match idx % 3 {
				0 => format!("2.{}. {clause}", idx + 1),
				1 => format!("2.{}) {clause}", idx + 1),
				_ => format!("2.{} – {clause}", idx + 1),
			})
			.collect::<Vec<_>>()
			.join("\n");

		assert_eq!(validator().validate(&text), Ok(()));
	}

	#[test]
	fn wrong_prefix_is_too_few() {
		assert_eq!(
			validator().validate(&clauses::delivery_section("1", 20)),
			Err(ErrorKind::TooFewListItems)
		);
	}

	#[test]
	fn forbidden_topics_are_counted_with_repeats() {
		let two = format!(
			"{}\n2.21. Payment for storage follows the payment section.",
			clauses::delivery_section("2", 20)
		);
		let three = format!(
			"{}\n2.21. Payment for storage follows the payment section and the invoice.",
			clauses::delivery_section("2", 20)
		);

		assert_eq!(validator().forbidden_topic_hits(&two), 2);
		assert_eq!(validator().validate(&two), Ok(()));
		assert_eq!(validator().validate(&three), Err(ErrorKind::ForbiddenTopicDetected));
	}

	#[test]
	fn russian_topics_are_detected() {
		let text = format!(
			"{}\n2.21. Оплата хранения производится по счету; споры передаются в суд.",
			clauses::delivery_section("2", 20)
		);

		assert_eq!(validator().forbidden_topic_hits(&text), 2);

		let text = format!("{text}\n2.22. Претензии по оплате не принимаются.");

		assert_eq!(validator().validate(&text), Err(ErrorKind::ForbiddenTopicDetected));
	}
}
