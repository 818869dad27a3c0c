/// Lowercased maximal runs of alphanumeric characters, in text order.
pub fn tokenize(text: &str) -> Vec<String> {
	text.split(|ch: char| !ch.is_alphanumeric())
		.filter(|token| !token.is_empty())
		.map(str::to_lowercase)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_on_non_alphanumerics_and_lowercases() {
		assert_eq!(
			tokenize("Оплата: 30 дней, VAT-free (set-off)."),
			vec!["оплата", "30", "дней", "vat", "free", "set", "off"]
		);
	}

	#[test]
	fn empty_and_punctuation_only_inputs_yield_nothing() {
		assert!(tokenize("").is_empty());
		assert!(tokenize(" -- ... ").is_empty());
	}
}
