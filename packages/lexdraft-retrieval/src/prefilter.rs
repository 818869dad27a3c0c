use std::collections::HashSet;

use crate::normalize::Document;
use lexdraft_domain::SectionProfile;

/// Characters of the body that take part in the duplicate key.
const MERGE_KEY_PREFIX_CHARS: usize = 160;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeywordHits {
	pub positive: usize,
	pub negative: usize,
}

/// Counts distinct profile keywords present in title and body, case-insensitively.
pub fn keyword_hits(profile: &SectionProfile, document: &Document) -> KeywordHits {
	let lowered = document.searchable_text().to_lowercase();

	KeywordHits {
		positive: profile.positive.iter().filter(|keyword| lowered.contains(*keyword)).count(),
		negative: profile.negative.iter().filter(|keyword| lowered.contains(*keyword)).count(),
	}
}

pub fn is_relevant(profile: &SectionProfile, document: &Document) -> bool {
	let hits = keyword_hits(profile, document);

	if hits.positive < profile.min_positive {
		return false;
	}

	hits.negative < profile.negative_cutoff || hits.positive >= profile.strong_positive
}

/// The documents a section's index is built from, capped at `max_docs`.
///
/// When the profile prefers a section tag, documents carrying it come first, followed by the
/// keyword-relevant ones, without duplicates.
pub fn working_set(
	profile: &SectionProfile,
	documents: Vec<Document>,
	max_docs: usize,
) -> Vec<Document> {
	let (preferred, rest): (Vec<Document>, Vec<Document>) = match profile.preferred_section_tag {
		Some(tag) => documents
			.into_iter()
			.partition(|document| document.section_tag.eq_ignore_ascii_case(tag)),
		None => (Vec::new(), documents),
	};
	let relevant = rest.into_iter().filter(|document| is_relevant(profile, document));
	let mut seen = HashSet::new();
	let mut selected = Vec::new();

	for document in preferred.into_iter().chain(relevant) {
		if seen.insert(merge_key(&document)) {
			selected.push(document);
		}
	}

	selected.truncate(max_docs);

	selected
}

fn merge_key(document: &Document) -> blake3::Hash {
	let prefix: String = document.text.chars().take(MERGE_KEY_PREFIX_CHARS).collect();
	let mut hasher = blake3::Hasher::new();

	for part in [&document.doc_id, &document.section_tag, &document.title, &prefix] {
		hasher.update(&(part.len() as u64).to_le_bytes());
		hasher.update(part.as_bytes());
	}

	hasher.finalize()
}

#[cfg(test)]
mod tests {
	use super::*;
	use lexdraft_domain::{LanguageMode, SectionKind};

	fn document(doc_id: &str, section_tag: &str, text: &str) -> Document {
		Document {
			doc_id: doc_id.to_string(),
			title: String::new(),
			section_tag: section_tag.to_string(),
			language: LanguageMode::Ru,
			text: text.to_string(),
		}
	}

	#[test]
	fn three_positive_keywords_are_not_enough() {
		let profile = SectionKind::PaymentTerms.profile();
		let doc = document("a", "", "Invoice payment by bank.");

		assert_eq!(keyword_hits(profile, &doc), KeywordHits { positive: 3, negative: 0 });
		assert!(!is_relevant(profile, &doc));
	}

	#[test]
	fn negative_keywords_need_strong_positive_support() {
		let profile = SectionKind::PaymentTerms.profile();
		let weak = document(
			"a",
			"",
			"Оплата товара по счету банковским переводом с НДС; приемка и качество продукции.",
		);
		let strong = document(
			"b",
			"",
			"Оплата товара по счету банковским переводом, предоплата и аванс, НДС, пеня за просрочку; приемка и качество продукции.",
		);

		assert!(!is_relevant(profile, &weak));
		assert!(is_relevant(profile, &strong));
	}

	#[test]
	fn tagged_delivery_records_come_first_without_duplicates() {
		let profile = SectionKind::DeliveryTerms.profile();
		let relevant = "Delivery date, shipment by carrier, packaging and marking, risk passes.";
		let docs = vec![
			document("1", "", relevant),
			document("2", "delivery_terms", "Short tagged text."),
			document("3", "other", "Nothing related here at all."),
			document("2", "delivery_terms", "Short tagged text."),
		];
		let set = working_set(profile, docs, 10);

		assert_eq!(set.iter().map(|doc| doc.doc_id.as_str()).collect::<Vec<_>>(), vec!["2", "1"]);
	}

	#[test]
	fn working_set_is_capped() {
		let profile = SectionKind::PaymentTerms.profile();
		let docs = (0..5)
			.map(|idx| document(&idx.to_string(), "", "Payment of the invoice by bank transfer, VAT."))
			.collect();

		assert_eq!(working_set(profile, docs, 3).len(), 3);
	}
}
