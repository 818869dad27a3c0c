use std::collections::HashSet;

use crate::tokenize::tokenize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiversityPolicy {
	pub shingle_size: usize,
	/// Candidates at or above this similarity to an accepted text are skipped.
	pub similarity_threshold: f32,
}
impl Default for DiversityPolicy {
	fn default() -> Self {
		Self { shingle_size: 7, similarity_threshold: 0.55 }
	}
}
impl From<&lexdraft_config::Diversity> for DiversityPolicy {
	fn from(cfg: &lexdraft_config::Diversity) -> Self {
		Self {
			shingle_size: cfg.shingle_size as usize,
			similarity_threshold: cfg.similarity_threshold,
		}
	}
}

/// Contiguous `size`-token windows. Empty when the text has fewer than `size` tokens.
pub fn shingles(text: &str, size: usize) -> HashSet<String> {
	let tokens = tokenize(text);

	if size == 0 || tokens.len() < size {
		return HashSet::new();
	}

	tokens.windows(size).map(|window| window.join(" ")).collect()
}

/// Jaccard similarity of two shingle sets, 0 when either is empty.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f32 {
	if a.is_empty() || b.is_empty() {
		return 0.0;
	}

	let intersection = a.intersection(b).count();
	let union = a.len() + b.len() - intersection;

	intersection as f32 / union as f32
}

/// One ranked candidate offered to [`select_diverse`].
#[derive(Clone, Copy, Debug)]
pub struct Candidate<'a> {
	pub doc_id: &'a str,
	pub text: &'a str,
}

/// Greedy selection in rank order, returning positions in the candidate sequence.
///
/// A candidate is skipped when its document already contributed, or when it is too similar to
/// any text accepted so far. Stops after `limit` acceptances.
pub fn select_diverse<'a>(
	candidates: impl IntoIterator<Item = Candidate<'a>>,
	policy: DiversityPolicy,
	limit: usize,
) -> Vec<usize> {
	let mut accepted = Vec::new();
	let mut accepted_shingles: Vec<HashSet<String>> = Vec::new();
	let mut used_doc_ids: HashSet<&'a str> = HashSet::new();

	for (position, candidate) in candidates.into_iter().enumerate() {
		if accepted.len() >= limit {
			break;
		}
		if !candidate.doc_id.is_empty() && used_doc_ids.contains(candidate.doc_id) {
			continue;
		}

		let candidate_shingles = shingles(candidate.text, policy.shingle_size);

		if accepted_shingles
			.iter()
			.any(|prev| jaccard(&candidate_shingles, prev) >= policy.similarity_threshold)
		{
			continue;
		}
		if !candidate.doc_id.is_empty() {
			used_doc_ids.insert(candidate.doc_id);
		}

		accepted.push(position);
		accepted_shingles.push(candidate_shingles);
	}

	accepted
}
