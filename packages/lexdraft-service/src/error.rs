use lexdraft_domain::{ErrorKind, SectionKind};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Model is unavailable: {message}")]
	ModelUnavailable { message: String },
	#[error("Pattern error: {message}")]
	Pattern { message: String },
	#[error("Diagnostics error: {message}")]
	Diagnostics { message: String },
	#[error("Section {section} was rejected with {kind} after {attempts} attempt(s).")]
	SectionRejected { section: SectionKind, kind: ErrorKind, attempts: u32 },
}
impl From<lexdraft_providers::Error> for Error {
	fn from(err: lexdraft_providers::Error) -> Self {
		match err {
			lexdraft_providers::Error::ModelUnavailable { message } =>
				Self::ModelUnavailable { message },
			other => Self::Provider { message: other.to_string() },
		}
	}
}

impl From<lexdraft_domain::Error> for Error {
	fn from(err: lexdraft_domain::Error) -> Self {
		Self::Pattern { message: err.to_string() }
	}
}

impl From<lexdraft_retrieval::Error> for Error {
	fn from(err: lexdraft_retrieval::Error) -> Self {
		Self::Pattern { message: err.to_string() }
	}
}

impl From<lexdraft_sanitizer::Error> for Error {
	fn from(err: lexdraft_sanitizer::Error) -> Self {
		Self::Pattern { message: err.to_string() }
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Diagnostics { message: err.to_string() }
	}
}
