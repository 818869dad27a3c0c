//! Fixtures shared by the workspace's tests.

pub mod clauses;
pub mod corpus;

mod error;

pub use error::{Error, Result};

use std::{
	env, fs,
	path::{Path, PathBuf},
};

use serde_json::Map;
use uuid::Uuid;

use lexdraft_config::{
	Config, Diagnostics, Generation, LlmProviderConfig, Providers, Retrieval, Sanitizer, Sections,
	Service,
};

/// Scratch directory removed on drop.
pub struct TempDir {
	path: PathBuf,
}
impl TempDir {
	pub fn new(prefix: &str) -> Result<Self> {
		let path = env::temp_dir().join(format!("{prefix}_{}", Uuid::new_v4().simple()));

		fs::create_dir_all(&path).map_err(|err| {
			Error::Message(format!("Failed to create temp dir {}: {err}.", path.display()))
		})?;

		Ok(Self { path })
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}
impl Drop for TempDir {
	fn drop(&mut self) {
		let _ = fs::remove_dir_all(&self.path);
	}
}

/// A complete configuration with default tuning and an unreachable local endpoint.
pub fn sample_config() -> Config {
	Config {
		service: Service { log_level: "info".to_string() },
		retrieval: Retrieval::default(),
		sanitizer: Sanitizer::default(),
		generation: Generation::default(),
		providers: Providers {
			llm: LlmProviderConfig {
				provider_id: "stub".to_string(),
				api_base: "http://127.0.0.1:9".to_string(),
				api_key: None,
				path: "/v1/chat/completions".to_string(),
				model: "stub".to_string(),
				max_tokens: 1_200,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
		},
		sections: Sections::default(),
		diagnostics: Diagnostics::default(),
	}
}
