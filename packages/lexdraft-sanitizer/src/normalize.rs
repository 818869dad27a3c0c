use std::collections::{HashSet, VecDeque};

use regex::Regex;

use crate::Result;

/// Longest line still treated as a heading.
const HEADING_MAX_CHARS: usize = 90;
const HEADING_MIN_LETTERS: usize = 4;
const HEADING_UPPERCASE_RATIO: f32 = 0.88;

/// Collapses horizontal whitespace and caps blank-line runs at one.
#[derive(Debug)]
pub struct SpaceNormalizer {
	horizontal: Regex,
	blank_lines: Regex,
}
impl SpaceNormalizer {
	pub fn new() -> Result<Self> {
		Ok(Self { horizontal: Regex::new(r"[ \t]+")?, blank_lines: Regex::new(r"\n{3,}")? })
	}

	pub fn normalize(&self, text: &str) -> String {
		let text = text.replace(['\u{00A0}', '\u{202F}'], " ").replace("\r\n", "\n");
		let text = self.horizontal.replace_all(&text, " ");
		let text = self.blank_lines.replace_all(&text, "\n\n");

		text.trim().to_string()
	}
}

/// Drops leading lines that repeat the section title in capitals.
///
/// Blank lines are removed and the remaining lines are trimmed.
pub fn strip_heading_echo(text: &str) -> String {
	let lines: Vec<&str> = text.lines().map(str::trim).filter(|line| !line.is_empty()).collect();
	let skip = lines.iter().take_while(|line| looks_like_heading(line)).count();

	lines[skip..].join("\n")
}

fn looks_like_heading(line: &str) -> bool {
	if line.chars().count() > HEADING_MAX_CHARS {
		return false;
	}

	let letters: Vec<char> = line.chars().filter(|ch| is_heading_letter(*ch)).collect();

	if letters.len() < HEADING_MIN_LETTERS {
		return false;
	}

	let upper = letters.iter().filter(|ch| ch.is_uppercase()).count();

	upper as f32 / letters.len() as f32 >= HEADING_UPPERCASE_RATIO
}

fn is_heading_letter(ch: char) -> bool {
	ch.is_ascii_alphabetic() || matches!(ch, 'А'..='я' | 'Ё' | 'ё')
}

/// Drops a line when its case-folded form is among the last `window` kept lines.
pub fn dedupe_line_window(text: &str, window: usize) -> String {
	let mut recent: VecDeque<String> = VecDeque::with_capacity(window + 1);
	let mut recent_set: HashSet<String> = HashSet::new();
	let mut kept = Vec::new();

	for line in text.lines() {
		let line = line.trim();

		if line.is_empty() {
			continue;
		}

		let key = line.to_lowercase();

		if recent_set.contains(&key) {
			continue;
		}

		kept.push(line);
		recent.push_back(key.clone());
		recent_set.insert(key);

		if recent.len() > window
			&& let Some(oldest) = recent.pop_front()
		{
			recent_set.remove(&oldest);
		}
	}

	kept.join("\n")
}
