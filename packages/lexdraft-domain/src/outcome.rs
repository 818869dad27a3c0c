use std::fmt;

use serde::{Deserialize, Serialize};

/// How the retry controller treats a rejection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
	/// Another sample may fix it: the output was missing, short, thin, or looping.
	Retryable,
	/// Re-sampling with the same prompt is not expected to help.
	Terminal,
}

/// Validation outcome vocabulary shared by every section validator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
	EmptyOutput,
	TooShort,
	TooFewListItems,
	RepetitionDetected,
	ContainsPlaceholders,
	MixedPartyTerms,
	ContainsBoilerplate,
	ContainsOutOfScopeTopics,
	ContainsPenalty,
	ContainsBankDetails,
	ConflictingPaymentDateDefinition,
	WrongNumberingFormat,
	ForbiddenTopicDetected,
}
impl ErrorKind {
	pub const ALL: [Self; 13] = [
		Self::EmptyOutput,
		Self::TooShort,
		Self::TooFewListItems,
		Self::RepetitionDetected,
		Self::ContainsPlaceholders,
		Self::MixedPartyTerms,
		Self::ContainsBoilerplate,
		Self::ContainsOutOfScopeTopics,
		Self::ContainsPenalty,
		Self::ContainsBankDetails,
		Self::ConflictingPaymentDateDefinition,
		Self::WrongNumberingFormat,
		Self::ForbiddenTopicDetected,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::EmptyOutput => "empty_output",
			Self::TooShort => "too_short",
			Self::TooFewListItems => "too_few_list_items",
			Self::RepetitionDetected => "repetition_detected",
			Self::ContainsPlaceholders => "contains_placeholders",
			Self::MixedPartyTerms => "mixed_party_terms",
			Self::ContainsBoilerplate => "contains_boilerplate",
			Self::ContainsOutOfScopeTopics => "contains_out_of_scope_topics",
			Self::ContainsPenalty => "contains_penalty",
			Self::ContainsBankDetails => "contains_bank_details",
			Self::ConflictingPaymentDateDefinition => "conflicting_payment_date_definition",
			Self::WrongNumberingFormat => "wrong_numbering_format",
			Self::ForbiddenTopicDetected => "forbidden_topic_detected",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|kind| kind.as_str() == raw)
	}

	pub fn class(self) -> ErrorClass {
		match self {
			Self::EmptyOutput
			| Self::TooShort
			| Self::TooFewListItems
			| Self::RepetitionDetected => ErrorClass::Retryable,
			_ => ErrorClass::Terminal,
		}
	}

	pub fn is_retryable(self) -> bool {
		self.class() == ErrorClass::Retryable
	}
}
impl fmt::Display for ErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn exactly_four_kinds_are_retryable() {
		let retryable: Vec<_> = ErrorKind::ALL.into_iter().filter(|kind| kind.is_retryable()).collect();

		assert_eq!(
			retryable,
			vec![
				ErrorKind::EmptyOutput,
				ErrorKind::TooShort,
				ErrorKind::TooFewListItems,
				ErrorKind::RepetitionDetected,
			]
		);
	}

	#[test]
	fn wire_names_match_serde() {
		for kind in ErrorKind::ALL {
			let json = serde_json::to_string(&kind).expect("Failed to serialize kind.");

			assert_eq!(json, format!("\"{}\"", kind.as_str()));
			assert_eq!(ErrorKind::parse(kind.as_str()), Some(kind));
		}
	}
}
