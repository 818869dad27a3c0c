pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid pattern for rule {rule}: {source}")]
	Rule { rule: &'static str, source: regex::Error },
	#[error(transparent)]
	Pattern(#[from] regex::Error),
}
