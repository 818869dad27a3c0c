use std::time::{Duration, Instant};

use reqwest::{StatusCode, blocking::Client};
use serde::Serialize;
use serde_json::Value;

use crate::{Error, Result};
use lexdraft_config::{LlmProviderConfig, Sampling};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
	pub role: &'static str,
	pub content: String,
}
impl ChatMessage {
	pub fn system(content: impl Into<String>) -> Self {
		Self { role: "system", content: content.into() }
	}

	pub fn user(content: impl Into<String>) -> Self {
		Self { role: "user", content: content.into() }
	}
}

/// One blocking chat completion, returning the trimmed content of the first choice.
pub fn generate(
	cfg: &LlmProviderConfig,
	messages: &[ChatMessage],
	sampling: Sampling,
) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"messages": messages,
		"temperature": sampling.temperature,
		"top_p": sampling.top_p,
		"max_tokens": cfg.max_tokens,
	});
	let started = Instant::now();
	let res = client
		.post(&url)
		.headers(crate::auth_headers(cfg.api_key.as_deref(), &cfg.default_headers)?)
		.json(&body)
		.send()
		.map_err(|err| unavailable_or(err, &url))?;

	if res.status() == StatusCode::NOT_FOUND {
		return Err(Error::ModelUnavailable {
			message: format!("{url} returned 404 for model {}.", cfg.model),
		});
	}

	let json: Value = res.error_for_status()?.json()?;
	let content = parse_choice_content(&json)?;

	tracing::debug!(
		provider_id = %cfg.provider_id,
		model = %cfg.model,
		elapsed_ms = started.elapsed().as_millis() as u64,
		chars = content.chars().count(),
		"Chat completion finished."
	);

	Ok(content)
}

fn unavailable_or(err: reqwest::Error, url: &str) -> Error {
	if err.is_connect() {
		return Error::ModelUnavailable { message: format!("Cannot connect to {url}: {err}.") };
	}

	Error::Reqwest(err)
}

fn parse_choice_content(json: &Value) -> Result<String> {
	json.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.map(|content| content.trim().to_string())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Chat response is missing choices[0].message.content.".to_string(),
		})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_choice_content() {
		let json = serde_json::json!({
			"choices": [
				{ "message": { "role": "assistant", "content": "  1.1. Оплата.\n" } }
			]
		});

		assert_eq!(parse_choice_content(&json).expect("Parse failed."), "1.1. Оплата.");
	}

	#[test]
	fn missing_content_is_an_invalid_response() {
		let json = serde_json::json!({ "choices": [] });

		assert!(matches!(parse_choice_content(&json), Err(Error::InvalidResponse { .. })));
	}

	#[test]
	fn messages_serialize_with_roles() {
		let value = serde_json::to_value([ChatMessage::system("s"), ChatMessage::user("u")])
			.expect("Failed to serialize messages.");

		assert_eq!(value[0]["role"], "system");
		assert_eq!(value[1]["content"], "u");
	}
}
