//! Section validators.
//!
//! A validator returns the first failing check as an [`ErrorKind`]. Checks run in a fixed
//! order per section, so the reported kind is deterministic for a given text.

mod delivery_terms;
mod payment_terms;
mod repetition;

pub use delivery_terms::DeliveryTermsValidator;
pub use payment_terms::PaymentTermsValidator;
pub use repetition::RepetitionDetector;

use regex::Regex;

use crate::{ErrorKind, Result, form::FormInput, section::SectionKind};
use lexdraft_config::Sections;

pub trait Validator {
	fn validate(&self, text: &str) -> Result<(), ErrorKind>;
}
impl<F> Validator for F
where
	F: Fn(&str) -> Result<(), ErrorKind>,
{
	fn validate(&self, text: &str) -> Result<(), ErrorKind> {
		self(text)
	}
}

/// Builds the validator for `section` from its configured rules and the request's flags.
pub fn for_section(
	section: SectionKind,
	sections: &Sections,
	form: &FormInput,
) -> crate::Result<Box<dyn Validator + Send + Sync>> {
	Ok(match section {
		SectionKind::PaymentTerms =>
			Box::new(PaymentTermsValidator::new(&sections.payment_terms, &form.payment)?),
		SectionKind::DeliveryTerms =>
			Box::new(DeliveryTermsValidator::new(&sections.delivery_terms)?),
	})
}

/// Length as the section rules count it: every non-whitespace character.
pub(crate) fn chars_without_whitespace(text: &str) -> usize {
	text.chars().filter(|ch| !ch.is_whitespace()).count()
}

pub(crate) fn count_matching_lines(text: &str, pattern: &Regex) -> usize {
	text.lines().map(str::trim).filter(|line| !line.is_empty() && pattern.is_match(line)).count()
}
