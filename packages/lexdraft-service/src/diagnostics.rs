use std::{
	fs,
	path::{Path, PathBuf},
};

use serde::Serialize;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{Error, Result};
use lexdraft_domain::ErrorKind;

/// The last rejected output of a generation request.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticRecord<'a> {
	pub label: &'a str,
	pub text: &'a str,
	pub error_kind: ErrorKind,
	pub attempts_used: u32,
}

pub trait DiagnosticSink
where
	Self: Send + Sync,
{
	fn record(&self, record: &DiagnosticRecord<'_>) -> Result<()>;
}

/// Discards every record.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;
impl DiagnosticSink for NoopSink {
	fn record(&self, _record: &DiagnosticRecord<'_>) -> Result<()> {
		Ok(())
	}
}

/// Writes `<label>_llm_bad.txt` and `<label>_llm_bad.meta.json` into a directory.
#[derive(Clone, Debug)]
pub struct FileDiagnosticSink {
	dir: PathBuf,
}
impl FileDiagnosticSink {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	pub fn text_path(&self, label: &str) -> PathBuf {
		self.dir.join(format!("{label}_llm_bad.txt"))
	}

	pub fn meta_path(&self, label: &str) -> PathBuf {
		self.dir.join(format!("{label}_llm_bad.meta.json"))
	}
}
impl DiagnosticSink for FileDiagnosticSink {
	fn record(&self, record: &DiagnosticRecord<'_>) -> Result<()> {
		let recorded_at = OffsetDateTime::now_utc()
			.format(&Rfc3339)
			.map_err(|err| Error::Diagnostics { message: err.to_string() })?;
		let meta = DiagnosticMeta {
			label: record.label,
			error_kind: record.error_kind,
			attempts_used: record.attempts_used,
			recorded_at,
		};
		let meta = serde_json::to_string_pretty(&meta)
			.map_err(|err| Error::Diagnostics { message: err.to_string() })?;

		fs::create_dir_all(&self.dir)?;
		fs::write(self.text_path(record.label), record.text)?;
		fs::write(self.meta_path(record.label), meta)?;

		tracing::info!(
			label = record.label,
			dir = %self.dir.display(),
			"Recorded rejected generation."
		);

		Ok(())
	}
}

#[derive(Serialize)]
struct DiagnosticMeta<'a> {
	label: &'a str,
	error_kind: ErrorKind,
	attempts_used: u32,
	recorded_at: String,
}
