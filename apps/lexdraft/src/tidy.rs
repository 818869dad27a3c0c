use regex::Regex;

use lexdraft_config::Sampling;
use lexdraft_service::{Generator, Result};

/// Removes layout noise from generated sections before they are validated.
///
/// Blank lines are dropped, subclause numbers get exactly one trailing space and horizontal
/// whitespace runs are collapsed.
pub struct TidyGenerator<G> {
	inner: G,
	blank_lines: Regex,
	numbering: Regex,
	spaces: Regex,
}
impl<G> TidyGenerator<G>
where
	G: Generator,
{
	pub fn new(inner: G) -> std::result::Result<Self, regex::Error> {
		Ok(Self {
			inner,
			blank_lines: Regex::new(r"\n[ \t]*(?:\n[ \t]*)+")?,
			numbering: Regex::new(r"(?m)^[ \t]*(\d+\.\d+\.)[ \t]*")?,
			spaces: Regex::new(r"[ \t]+")?,
		})
	}

	pub fn tidy(&self, text: &str) -> String {
		let text = text.replace("\r\n", "\n");
		let text = self.blank_lines.replace_all(text.trim(), "\n");
		let text = self.numbering.replace_all(&text, "${1} ");
		let text = self.spaces.replace_all(&text, " ");

		text.trim().to_string()
	}
}
impl<G> Generator for TidyGenerator<G>
where
	G: Generator,
{
	fn generate(&self, system: &str, user: &str, sampling: Sampling) -> Result<String> {
		let raw = self.inner.generate(system, user, sampling)?;

		Ok(self.tidy(&raw))
	}
}
