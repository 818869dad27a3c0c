use lexdraft_config::{Retrieval, Sections};
use lexdraft_domain::{CorpusRecord, FormInput, LanguageMode, PaymentForm, SectionKind};
use lexdraft_retrieval::{
	RetrievalRequest, Retriever,
	diversity::{jaccard, shingles},
};
use lexdraft_testkit::corpus;

fn records() -> Vec<CorpusRecord> {
	corpus::ROWS
		.iter()
		.map(|row| CorpusRecord {
			text: row.text.to_string(),
			doc_id: row.doc_id.to_string(),
			title: row.title.to_string(),
			group_tag: "commercial".to_string(),
			section_tag: row.section_tag.to_string(),
			language: row.language.to_string(),
		})
		.collect()
}

fn retriever() -> Retriever {
	Retriever::new(&Retrieval::default()).expect("Failed to build retriever.")
}

fn request(section: SectionKind, form: &FormInput) -> RetrievalRequest {
	let sections = Sections::default();
	let rules = match section {
		SectionKind::PaymentTerms => &sections.payment_terms,
		SectionKind::DeliveryTerms => &sections.delivery_terms,
	};

	RetrievalRequest::for_section(section, form, &Retrieval::default(), rules)
}

fn doc_ids(section: SectionKind, form: &FormInput) -> Vec<String> {
	retriever()
		.retrieve_scored(&request(section, form), &records())
		.into_iter()
		.map(|precedent| precedent.doc_id)
		.collect()
}

#[test]
fn russian_payment_request_sees_only_russian_payment_clauses() {
	let mut ids = doc_ids(SectionKind::PaymentTerms, &FormInput::default());

	ids.sort();

	assert_eq!(ids, vec!["c-001", "c-002"]);
}

#[test]
fn english_payment_request_uses_english_corpus() {
	let form = FormInput { language_mode: LanguageMode::En, ..Default::default() };

	assert_eq!(doc_ids(SectionKind::PaymentTerms, &form), vec!["c-003"]);
}

#[test]
fn prepayment_flag_promotes_advance_clause() {
	let form = FormInput {
		payment: PaymentForm { prepayment_required: true, ..Default::default() },
		..Default::default()
	};
	let ids = doc_ids(SectionKind::PaymentTerms, &form);

	assert!(ids.contains(&"c-002".to_string()));
}

#[test]
fn delivery_prefers_tagged_records() {
	assert_eq!(doc_ids(SectionKind::DeliveryTerms, &FormInput::default()), vec!["c-010"]);
}

#[test]
fn bilingual_delivery_draws_from_both_languages() {
	let form = FormInput { language_mode: LanguageMode::Bilingual, ..Default::default() };
	let mut ids = doc_ids(SectionKind::DeliveryTerms, &form);

	ids.sort();

	assert_eq!(ids, vec!["c-010", "c-011"]);
}

#[test]
fn scores_are_positive_and_ordered() {
	let form = FormInput { language_mode: LanguageMode::Bilingual, ..Default::default() };
	let precedents =
		retriever().retrieve_scored(&request(SectionKind::PaymentTerms, &form), &records());

	assert!(!precedents.is_empty());
	assert!(precedents.iter().all(|precedent| precedent.score > 0.0));
	assert!(precedents.windows(2).all(|pair| pair[0].score >= pair[1].score));
}

#[test]
fn returned_precedents_are_pairwise_diverse() {
	let mut records = records();

	for (source, copy, extra) in [
		("c-001", "c-101", " Счет выставляется после отгрузки товара."),
		("c-003", "c-103", " Invoices are issued after shipment."),
	] {
		let mut record = records
			.iter()
			.find(|record| record.doc_id == source)
			.cloned()
			.expect("Source record must exist.");

		record.doc_id = copy.to_string();
		record.text.push_str(extra);
		records.push(record);
	}

	let form = FormInput { language_mode: LanguageMode::Bilingual, ..Default::default() };
	let precedents =
		retriever().retrieve_scored(&request(SectionKind::PaymentTerms, &form), &records);
	let ids: Vec<&str> = precedents.iter().map(|precedent| precedent.doc_id.as_str()).collect();

	assert!(!precedents.is_empty());
	assert!(!(ids.contains(&"c-001") && ids.contains(&"c-101")));
	assert!(!(ids.contains(&"c-003") && ids.contains(&"c-103")));

	for (idx, a) in precedents.iter().enumerate() {
		for b in &precedents[idx + 1..] {
			let similarity = jaccard(&shingles(&a.text, 7), &shingles(&b.text, 7));

			assert!(similarity < 0.55, "{} and {} are {similarity} similar.", a.doc_id, b.doc_id);
		}
	}
}

#[test]
fn top_k_caps_the_result() {
	let form = FormInput { language_mode: LanguageMode::Bilingual, ..Default::default() };
	let mut request = request(SectionKind::PaymentTerms, &form);

	request.top_k = 1;

	assert_eq!(retriever().retrieve(&request, &records()).len(), 1);
}

#[test]
fn empty_corpus_yields_nothing() {
	let request = request(SectionKind::PaymentTerms, &FormInput::default());

	assert!(retriever().retrieve(&request, &[]).is_empty());
}
