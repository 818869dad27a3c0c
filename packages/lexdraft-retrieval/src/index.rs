use std::collections::HashMap;

use crate::tokenize::tokenize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bm25Params {
	pub k1: f32,
	pub b: f32,
}
impl Default for Bm25Params {
	fn default() -> Self {
		Self { k1: 1.5, b: 0.75 }
	}
}
impl From<&lexdraft_config::Retrieval> for Bm25Params {
	fn from(cfg: &lexdraft_config::Retrieval) -> Self {
		Self { k1: cfg.k1, b: cfg.b }
	}
}

#[derive(Debug)]
pub struct IndexedDocument {
	term_freq: HashMap<String, u32>,
	length: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoredCandidate {
	/// Position of the document in insertion order.
	pub index: usize,
	pub score: f32,
}

/// In-memory BM25 index, rebuilt for every retrieval request.
#[derive(Debug)]
pub struct LexicalIndex {
	params: Bm25Params,
	documents: Vec<IndexedDocument>,
	doc_freq: HashMap<String, u32>,
	avg_doc_len: f32,
}
impl LexicalIndex {
	pub fn build<'a>(params: Bm25Params, texts: impl IntoIterator<Item = &'a str>) -> Self {
		let mut documents = Vec::new();
		let mut doc_freq: HashMap<String, u32> = HashMap::new();
		let mut total_len = 0_usize;

		for text in texts {
			let tokens = tokenize(text);
			let mut term_freq: HashMap<String, u32> = HashMap::new();

			for token in &tokens {
				*term_freq.entry(token.clone()).or_default() += 1;
			}
			for term in term_freq.keys() {
				*doc_freq.entry(term.clone()).or_default() += 1;
			}

			total_len += tokens.len();

			documents.push(IndexedDocument { term_freq, length: tokens.len() });
		}

		let avg_doc_len = if documents.is_empty() || total_len == 0 {
			1.0
		} else {
			total_len as f32 / documents.len() as f32
		};

		Self { params, documents, doc_freq, avg_doc_len }
	}

	pub fn len(&self) -> usize {
		self.documents.len()
	}

	pub fn is_empty(&self) -> bool {
		self.documents.is_empty()
	}

	pub fn avg_doc_len(&self) -> f32 {
		self.avg_doc_len
	}

	/// Zero for terms no document contains.
	pub fn idf(&self, term: &str) -> f32 {
		let Some(&df) = self.doc_freq.get(term) else {
			return 0.0;
		};
		let n = self.documents.len() as f32;
		let df = df as f32;

		(1.0 + (n - df + 0.5) / (df + 0.5)).ln()
	}

	/// Repeated query tokens contribute once per occurrence.
	pub fn score(&self, query_tokens: &[String], index: usize) -> f32 {
		let Some(document) = self.documents.get(index) else {
			return 0.0;
		};
		let Bm25Params { k1, b } = self.params;
		let length_norm = 1.0 - b + b * document.length as f32 / self.avg_doc_len;

		query_tokens
			.iter()
			.filter_map(|term| {
				let tf = *document.term_freq.get(term)? as f32;

				Some(self.idf(term) * tf * (k1 + 1.0) / (tf + k1 * length_norm))
			})
			.sum()
	}

	/// Positive-scoring documents, best first, at most `limit` of them.
	///
	/// Equal scores keep insertion order.
	pub fn search(&self, query: &str, limit: usize) -> Vec<ScoredCandidate> {
		let query_tokens = tokenize(query);

		if query_tokens.is_empty() || limit == 0 {
			return Vec::new();
		}

		let mut hits: Vec<ScoredCandidate> = (0..self.documents.len())
			.map(|index| ScoredCandidate { index, score: self.score(&query_tokens, index) })
			.filter(|hit| hit.score > 0.0)
			.collect();

		hits.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.index.cmp(&b.index)));
		hits.truncate(limit);

		hits
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn index(texts: &[&str]) -> LexicalIndex {
		LexicalIndex::build(Bm25Params::default(), texts.iter().copied())
	}

	#[test]
	fn idf_follows_smoothed_formula() {
		let index = index(&["payment invoice", "delivery terms", "payment schedule"]);
		let expected = (1.0_f32 + (3.0 - 2.0 + 0.5) / (2.0 + 0.5)).ln();

		assert!((index.idf("payment") - expected).abs() < 1e-6);
		assert_eq!(index.idf("arbitration"), 0.0);
	}

	#[test]
	fn empty_index_has_unit_average_length() {
		let index = index(&[]);

		assert!(index.is_empty());
		assert_eq!(index.avg_doc_len(), 1.0);
		assert!(index.search("payment", 10).is_empty());
	}

	#[test]
	fn results_are_positive_and_descending() {
		let index = index(&[
			"delivery of goods by carrier",
			"payment of the invoice by bank transfer, payment due in thirty days",
			"the invoice is issued on shipment",
			"payment",
		]);
		let hits = index.search("payment invoice", 10);

		assert!(hits.iter().all(|hit| hit.score > 0.0));
		assert!(hits.windows(2).all(|pair| pair[0].score >= pair[1].score));
		assert!(!hits.iter().any(|hit| hit.index == 0));
		assert_eq!(hits[0].index, 1);
	}

	#[test]
	fn ties_keep_insertion_order() {
		let index = index(&["invoice terms", "unrelated text", "invoice terms"]);
		let hits = index.search("invoice", 10);

		assert_eq!(hits.iter().map(|hit| hit.index).collect::<Vec<_>>(), vec![0, 2]);
	}

	#[test]
	fn limit_truncates_and_empty_query_returns_nothing() {
		let index = index(&["invoice a", "invoice b", "invoice c"]);

		assert_eq!(index.search("invoice", 2).len(), 2);
		assert!(index.search("...", 2).is_empty());
	}

	#[test]
	fn higher_term_frequency_scores_higher_at_equal_length() {
		let index = index(&[
			"invoice pad pad pad",
			"invoice invoice pad pad",
			"invoice invoice invoice pad",
			"delivery of the goods",
		]);
		let query = vec!["invoice".to_string()];
		let scores: Vec<f32> = (0..3).map(|idx| index.score(&query, idx)).collect();

		assert!(scores[0] > 0.0);
		assert!(scores[0] < scores[1]);
		assert!(scores[1] < scores[2]);
	}

	#[test]
	fn document_with_both_terms_outranks_one_with_a_single_mention() {
		let index = index(&[
			"payment invoice payment invoice payment invoice terms",
			"payment is made once under this clause",
			"delivery of goods by carrier",
		]);
		let hits = index.search("payment invoice", 10);

		assert_eq!(hits.iter().map(|hit| hit.index).collect::<Vec<_>>(), vec![0, 1]);
		assert!(hits[0].score > hits[1].score);
		assert_eq!(index.score(&["payment".to_string(), "invoice".to_string()], 2), 0.0);
	}

	#[test]
	fn shorter_documents_score_higher_for_equal_tf() {
		let index = index(&["invoice", "invoice with many other words around the single term"]);
		let hits = index.search("invoice", 10);

		assert_eq!(hits[0].index, 0);
		assert!(hits[0].score > hits[1].score);
	}
}
