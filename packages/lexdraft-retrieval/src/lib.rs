//! Lexical precedent retrieval.
//!
//! Corpus records are cleaned, narrowed to the section's domain, indexed with BM25, and the
//! best hits are diversified so that near-identical clauses are offered only once.

pub mod diversity;
pub mod index;
pub mod normalize;
pub mod prefilter;
pub mod tokenize;

mod error;

pub use diversity::{Candidate, DiversityPolicy};
pub use error::{Error, Result};
pub use index::{Bm25Params, LexicalIndex, ScoredCandidate};
pub use normalize::{CorpusNormalizer, Document};

use lexdraft_config::{Retrieval, SectionRules};
use lexdraft_domain::{CorpusRecord, FormInput, LanguageMode, SectionKind};

/// What to retrieve for one section draft.
#[derive(Clone, Debug, PartialEq)]
pub struct RetrievalRequest {
	pub section: SectionKind,
	pub language: LanguageMode,
	pub query: String,
	pub top_k: usize,
	pub max_docs: usize,
}
impl RetrievalRequest {
	pub fn for_section(
		section: SectionKind,
		form: &FormInput,
		cfg: &Retrieval,
		rules: &SectionRules,
	) -> Self {
		Self {
			section,
			language: form.language_mode,
			query: section.profile().query(form),
			top_k: cfg.top_k as usize,
			max_docs: rules.max_docs as usize,
		}
	}
}

/// A selected precedent with the score it was ranked by.
#[derive(Clone, Debug, PartialEq)]
pub struct RetrievedPrecedent {
	pub doc_id: String,
	pub score: f32,
	pub text: String,
}

#[derive(Debug)]
pub struct Retriever {
	params: Bm25Params,
	diversity: DiversityPolicy,
	overfetch_factor: usize,
	normalizer: CorpusNormalizer,
}
impl Retriever {
	pub fn new(cfg: &Retrieval) -> Result<Self> {
		Ok(Self {
			params: Bm25Params::from(cfg),
			diversity: DiversityPolicy::from(&cfg.diversity),
			overfetch_factor: cfg.overfetch_factor.max(1) as usize,
			normalizer: CorpusNormalizer::new(cfg)?,
		})
	}

	/// Up to `top_k` precedent texts, best first.
	pub fn retrieve(&self, request: &RetrievalRequest, records: &[CorpusRecord]) -> Vec<String> {
		self.retrieve_scored(request, records).into_iter().map(|precedent| precedent.text).collect()
	}

	pub fn retrieve_scored(
		&self,
		request: &RetrievalRequest,
		records: &[CorpusRecord],
	) -> Vec<RetrievedPrecedent> {
		let profile = request.section.profile();
		let documents = self.normalizer.prepare(records, request.language);
		let prepared = documents.len();
		let documents = prefilter::working_set(profile, documents, request.max_docs);

		tracing::debug!(
			section = %request.section,
			records = records.len(),
			prepared,
			working_set = documents.len(),
			"Prepared retrieval working set."
		);

		if documents.is_empty() || request.top_k == 0 {
			return Vec::new();
		}

		let searchable: Vec<String> = documents.iter().map(Document::searchable_text).collect();
		let index = LexicalIndex::build(self.params, searchable.iter().map(String::as_str));
		let hits = index.search(&request.query, request.top_k * self.overfetch_factor);
		let selected = diversity::select_diverse(
			hits.iter().map(|hit| Candidate {
				doc_id: documents[hit.index].doc_id.as_str(),
				text: documents[hit.index].text.as_str(),
			}),
			self.diversity,
			request.top_k,
		);
		let precedents: Vec<RetrievedPrecedent> = selected
			.into_iter()
			.map(|position| {
				let hit = hits[position];
				let document = &documents[hit.index];

				RetrievedPrecedent {
					doc_id: document.doc_id.clone(),
					score: hit.score,
					text: document.text.clone(),
				}
			})
			.collect();

		tracing::info!(
			section = %request.section,
			hits = hits.len(),
			selected = precedents.len(),
			"Retrieved precedents."
		);

		precedents
	}
}
