use unicode_segmentation::UnicodeSegmentation;

/// Keeps the longest run of whole sentences that fits in `max_chars` characters.
///
/// Whitespace is collapsed to single spaces once the text is over budget. When even the first
/// sentence does not fit it is cut at the last word boundary inside the budget, which may leave
/// nothing.
pub fn truncate_sentence_safe(text: &str, max_chars: usize) -> String {
	let text = text.trim();

	if text.chars().count() <= max_chars {
		return text.to_string();
	}

	let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
	let mut kept = String::new();
	let mut kept_chars = 0;

	for sentence in split_sentences(&flat) {
		let sentence_chars = sentence.chars().count();
		let joined_chars = if kept.is_empty() { sentence_chars } else { kept_chars + 1 + sentence_chars };

		if joined_chars > max_chars {
			break;
		}
		if !kept.is_empty() {
			kept.push(' ');
		}

		kept.push_str(sentence);

		kept_chars = joined_chars;
	}

	if !kept.is_empty() {
		return kept;
	}

	let first = split_sentences(&flat).into_iter().next().unwrap_or_default();

	cut_at_word_boundary(first, max_chars)
}

/// Splits after `.`, `!` or `?` followed by whitespace and an uppercase letter or a digit.
pub fn split_sentences(text: &str) -> Vec<&str> {
	let mut sentences = Vec::new();
	let mut start = 0;
	let mut chars = text.char_indices().peekable();

	while let Some((idx, ch)) = chars.next() {
		if !matches!(ch, '.' | '!' | '?') {
			continue;
		}

		let end = idx + ch.len_utf8();
		let mut next_start = None;

		while let Some(&(next_idx, next)) = chars.peek() {
			if next.is_whitespace() {
				chars.next();

				continue;
			}
			if next_idx > end && (next.is_uppercase() || next.is_ascii_digit()) {
				next_start = Some(next_idx);
			}

			break;
		}

		if let Some(next_start) = next_start {
			sentences.push(text[start..end].trim());

			start = next_start;
		}
	}

	let rest = text[start..].trim();

	if !rest.is_empty() {
		sentences.push(rest);
	}

	sentences.retain(|sentence| !sentence.is_empty());

	sentences
}

fn cut_at_word_boundary(text: &str, max_chars: usize) -> String {
	let mut cut = 0;

	for (idx, segment) in text.split_word_bound_indices() {
		let end = idx + segment.len();

		if text[..end].chars().count() > max_chars {
			break;
		}

		cut = end;
	}

	text[..cut].trim_end().to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn short_text_is_returned_trimmed() {
		assert_eq!(truncate_sentence_safe("  Оплата по счету.  ", 100), "Оплата по счету.");
	}

	#[test]
	fn whole_sentences_fill_the_budget() {
		let text = "Первое предложение. Второе предложение длиннее. 3 пункт.";

		assert_eq!(truncate_sentence_safe(text, 40), "Первое предложение.");
		assert_eq!(
			truncate_sentence_safe(text, 48),
			"Первое предложение. Второе предложение длиннее."
		);
	}

	#[test]
	fn lowercase_after_period_is_not_a_boundary() {
		assert_eq!(
			split_sentences("Payment, e.g. by wire. Then delivery."),
			vec!["Payment, e.g. by wire.", "Then delivery."]
		);
	}

	#[test]
	fn single_long_sentence_is_cut_between_words() {
		let cut = truncate_sentence_safe("слово слово слово слово", 13);

		assert_eq!(cut, "слово слово");
	}

	#[test]
	fn an_overlong_first_word_leaves_nothing() {
		assert_eq!(truncate_sentence_safe("Сверхдлинноеслово и еще", 5), "");
	}

	#[test]
	fn output_never_ends_inside_a_word() {
		let text = "The Buyer pays every invoice within the agreed term by bank transfer. \
			Partial payments are permitted with prior notice to the Supplier.";

		for max_chars in 10..text.len() {
			let cut = truncate_sentence_safe(text, max_chars);

			assert!(cut.chars().count() <= max_chars);
			assert!(
				text.starts_with(&cut),
				"Cut at {max_chars} produced a partial word: {cut:?}."
			);

			let next = text[cut.len()..].chars().next();

			assert!(next.is_none_or(|ch| !ch.is_alphanumeric()), "Cut at {max_chars}: {cut:?}.");
		}
	}
}
