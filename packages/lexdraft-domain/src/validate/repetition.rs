use std::collections::HashMap;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::Result;

const MIN_UNITS: usize = 6;
const MIN_UNIT_CHARS: usize = 40;
const MIN_OCCURRENCES: usize = 2;

/// Flags outputs that loop: the same list item or sentence emitted twice.
///
/// Texts with list markers ("3)" or "1.3.") are split into item bodies with the marker
/// removed, anything else into sentences. Short texts and short units are never flagged.
#[derive(Debug)]
pub struct RepetitionDetector {
	list_marker: Regex,
	clause_punctuation: Regex,
}
impl RepetitionDetector {
	pub fn new() -> Result<Self> {
		Ok(Self {
			list_marker: Regex::new(r"(?m)^[ \t]*(?:\d{1,3}\)|\d{1,3}(?:\.\d{1,3})+\.?)\s+")?,
			clause_punctuation: Regex::new(r"[,:;]+")?,
		})
	}

	pub fn detect(&self, text: &str) -> bool {
		let units = self.split_units(text);

		if units.len() < MIN_UNITS {
			return false;
		}

		let normalized: Vec<String> = units
			.iter()
			.map(|unit| self.normalize_unit(unit))
			.filter(|unit| unit.chars().count() >= MIN_UNIT_CHARS)
			.collect();

		if normalized.len() < MIN_UNITS {
			return false;
		}

		let mut counts: HashMap<&str, usize> = HashMap::new();

		for unit in &normalized {
			let count = counts.entry(unit.as_str()).or_default();

			*count += 1;

			if *count >= MIN_OCCURRENCES {
				return true;
			}
		}

		false
	}

	fn split_units<'a>(&self, text: &'a str) -> Vec<&'a str> {
		let text = text.trim();

		if !self.list_marker.is_match(text) {
			return split_sentences(text);
		}

		let mut units = Vec::new();
		let mut start = 0;

		for marker in self.list_marker.find_iter(text) {
			units.push(&text[start..marker.start()]);

			start = marker.end();
		}

		units.push(&text[start..]);
		units.into_iter().map(str::trim).filter(|unit| !unit.is_empty()).collect()
	}

	fn normalize_unit(&self, unit: &str) -> String {
		let folded: String = unit
			.nfkc()
			.flat_map(char::to_lowercase)
			.map(|ch| if ch == 'ё' { 'е' } else { ch })
			.filter(|ch| !matches!(ch, '«' | '»' | '"' | '“' | '”' | '„' | '(' | ')' | '[' | ']'))
			.collect();
		let collapsed = folded.split_whitespace().collect::<Vec<_>>().join(" ");

		self.clause_punctuation.replace_all(&collapsed, ",").into_owned()
	}
}

/// Splits after `.`, `!`, or `?` when whitespace follows.
fn split_sentences(text: &str) -> Vec<&str> {
	let mut sentences = Vec::new();
	let mut start = 0;
	let mut chars = text.char_indices().peekable();

	while let Some((_, ch)) = chars.next() {
		if !matches!(ch, '.' | '!' | '?') {
			continue;
		}
		if let Some(&(next_idx, next)) = chars.peek()
			&& next.is_whitespace()
		{
			sentences.push(&text[start..next_idx]);

			start = next_idx;
		}
	}

	sentences.push(&text[start..]);
	sentences.into_iter().map(str::trim).filter(|sentence| !sentence.is_empty()).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn detector() -> RepetitionDetector {
		RepetitionDetector::new().expect("Failed to build detector.")
	}

	#[test]
	fn duplicated_list_item_is_detected() {
		let text = "\
1.1. The Buyer pays every invoice within the agreed period of time.
1.2. Payment is made by wire transfer in the currency of the contract.
1.3. The payment date is the date the funds reach the Supplier's account.
1.4. THE BUYER PAYS EVERY INVOICE   within the agreed period of time.
1.5. Partial payments are allowed only with the written consent of the Supplier.
1.6. Each party bears the transfer fees charged by its own servicing institution.
1.7. The Supplier issues invoices no earlier than the shipment of the goods.
1.8. Amounts are stated exclusive of any sales tax unless the invoice says otherwise.";

		assert!(detector().detect(text));
	}

	#[test]
	fn distinct_items_pass() {
		let text = "\
1) The Buyer pays every invoice within the agreed period of time.
2) Payment is made by wire transfer in the currency of the contract.
3) The payment date is the date the funds reach the Supplier's account.
4) Partial payments are allowed only with the written consent of the Supplier.
5) Each party bears the transfer fees charged by its own servicing institution.
6) The Supplier issues invoices no earlier than the shipment of the goods.";

		assert!(!detector().detect(text));
	}

	#[test]
	fn too_few_units_never_flag() {
		let sentence = "Оплата производится в течение срока, установленного в счете Поставщика.";
		let text = format!("{sentence} {sentence} {sentence}");

		assert!(!detector().detect(&text));
	}

	#[test]
	fn short_units_are_ignored() {
		let text = "Да. Да. Да. Да. Да. Да. Да. Да.";

		assert!(!detector().detect(text));
	}

	#[test]
	fn yo_and_punctuation_variants_collide() {
		let detector = detector();
		let text = "\
Счёт выставляется Поставщиком после отгрузки каждой партии товара. \
Покупатель оплачивает счет в течение срока; указанного в спецификации к договору. \
Датой оплаты считается дата поступления денежных средств на счет Поставщика. \
Частичная оплата допускается только с письменного согласия Поставщика по договору. \
Расходы банка Покупателя оплачивает Покупатель, расходы иных банков несет Поставщик. \
Покупатель оплачивает «счет» в течение срока, указанного в спецификации к договору.";

		assert!(detector.detect(text));
	}

	#[test]
	fn sentence_split_keeps_terminal_punctuation() {
		assert_eq!(split_sentences("One. Two!  Three?"), vec!["One.", "Two!", "Three?"]);
		assert_eq!(split_sentences("v1.2 stays whole."), vec!["v1.2 stays whole."]);
	}
}
